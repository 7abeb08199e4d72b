// Marker sprite that follows its owner (the exclamation mark above the head)

/// Timed visual cue attached to an actor
#[derive(Debug, Clone, Default)]
pub struct FollowableMarker {
    remaining_ms: u32,
}

impl FollowableMarker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the marker for the given time, restarting any running display
    pub fn activate(&mut self, duration_ms: u32) {
        self.remaining_ms = duration_ms;
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0
    }

    pub fn update(&mut self, elapsed_ms: u32) {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
    }
}
