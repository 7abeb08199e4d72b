// Sprite render state consumed by the renderer

/// Per-actor sprite flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteState {
    /// Sprite is flipped horizontally (actor faces left)
    pub mirrored: bool,
    pub visible: bool,
}

impl Default for SpriteState {
    fn default() -> Self {
        Self {
            mirrored: false,
            visible: true,
        }
    }
}

impl SpriteState {
    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.mirrored = mirrored;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
