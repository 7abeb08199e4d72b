// Frame-based animation playback with observer notifications

use std::collections::HashMap;

use log::warn;

use super::observer::{ObserverId, ObserverList};

/// Default duration of a single frame in milliseconds
pub const DEFAULT_FRAME_MS: u32 = 100;

/// A single frame of an animation clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFrame {
    /// How long the frame stays on screen
    pub duration_ms: u32,
    /// Gameplay effect should fire when this frame is reached
    pub has_event: bool,
}

/// A named sequence of frames
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "stand", "swipe", "jumppistol")
    pub name: String,
    pub frames: Vec<AnimationFrame>,
    /// Whether the animation restarts after its last frame
    pub looping: bool,
}

impl AnimationClip {
    /// Create a new animation clip with evenly timed frames
    pub fn new(name: &str, frame_count: usize, frame_ms: u32, looping: bool) -> Self {
        let frame = AnimationFrame {
            duration_ms: frame_ms,
            has_event: false,
        };
        Self {
            name: name.to_string(),
            frames: vec![frame; frame_count.max(1)],
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, frame_ms: u32) -> Self {
        Self::new(name, frame_count, frame_ms, true)
    }

    /// Create a one-shot animation (plays once and holds the last frame)
    pub fn one_shot(name: &str, frame_count: usize, frame_ms: u32) -> Self {
        Self::new(name, frame_count, frame_ms, false)
    }

    /// Mark frames that carry an action marker
    pub fn with_action_frames(mut self, indices: &[usize]) -> Self {
        for &idx in indices {
            if let Some(frame) = self.frames.get_mut(idx) {
                frame.has_event = true;
            }
        }
        self
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn last_frame_index(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration_ms(&self) -> u32 {
        self.frames.iter().map(|f| f.duration_ms).sum()
    }
}

/// Notification sent to animation observers.
///
/// `is_loop_boundary` separates the two notification kinds: a frame change
/// carries the new frame, a loop completion carries the frame that just
/// finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationEvent {
    pub clip_name: String,
    pub frame_index: usize,
    pub has_action_marker: bool,
    pub is_last_frame: bool,
    pub is_loop_boundary: bool,
}

impl AnimationEvent {
    /// A frame-changed notification
    pub fn frame(
        clip_name: &str,
        frame_index: usize,
        has_action_marker: bool,
        is_last_frame: bool,
    ) -> Self {
        Self {
            clip_name: clip_name.to_string(),
            frame_index,
            has_action_marker,
            is_last_frame,
            is_loop_boundary: false,
        }
    }

    /// A loop-completed notification
    pub fn looped(clip_name: &str, last_frame: usize) -> Self {
        Self {
            clip_name: clip_name.to_string(),
            frame_index: last_frame,
            has_action_marker: false,
            is_last_frame: true,
            is_loop_boundary: true,
        }
    }
}

/// Manages animation playback for one actor
#[derive(Debug)]
pub struct AnimationPlayer {
    /// All available animations
    animations: HashMap<String, AnimationClip>,
    /// Currently playing animation name
    current_animation: String,
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer_ms: u32,
    paused: bool,
    /// A one-shot clip reached its end
    finished: bool,
    observers: ObserverList<AnimationEvent>,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
            current_animation: String::new(),
            current_frame: 0,
            frame_timer_ms: 0,
            paused: false,
            finished: false,
            observers: ObserverList::new(),
        }
    }

    /// Create an animation player with every clip the player character uses
    pub fn with_character_clips() -> Self {
        let mut player = Self::new();

        // Movement
        player.add_animation(AnimationClip::looping("stand", 8, 150));
        player.add_animation(AnimationClip::looping("idle", 12, 120));
        player.add_animation(AnimationClip::looping("walk", 10, 80));
        player.add_animation(AnimationClip::looping("jump", 6, DEFAULT_FRAME_MS));
        player.add_animation(AnimationClip::looping("fall", 4, DEFAULT_FRAME_MS));
        player.add_animation(AnimationClip::looping("duck", 1, DEFAULT_FRAME_MS));
        player.add_animation(AnimationClip::looping("lookup", 1, DEFAULT_FRAME_MS));
        player.add_animation(AnimationClip::looping("climb", 12, 70));
        player.add_animation(AnimationClip::looping("swing", 8, DEFAULT_FRAME_MS));

        // Melee. "swipe" has no marker, its hit fires on frame 3.
        player.add_animation(AnimationClip::looping("swipe", 6, 70));
        player.add_animation(AnimationClip::looping("kick", 5, 70).with_action_frames(&[2]));
        player.add_animation(AnimationClip::looping("uppercut", 6, 70).with_action_frames(&[3]));
        player.add_animation(AnimationClip::looping("jumpswipe", 5, 70).with_action_frames(&[2]));
        player.add_animation(AnimationClip::looping("duckswipe", 5, 70).with_action_frames(&[2]));

        // Ranged
        for name in [
            "pistol",
            "magic",
            "postdynamite",
            "jumppistol",
            "jumpmagic",
            "jumpdynamite",
            "duckpistol",
            "duckmagic",
            "duckpostdynamite",
        ] {
            player.add_animation(AnimationClip::looping(name, 4, 80).with_action_frames(&[1]));
        }
        for name in [
            "emptypistol",
            "emptymagic",
            "emptydynamite",
            "emptyjumppistol",
            "emptyjumpmagic",
            "emptyjumpdynamite",
            "duckemptypistol",
            "duckemptymagic",
            "duckemptydynamite",
        ] {
            player.add_animation(AnimationClip::looping(name, 3, 80));
        }

        // Damage and death
        player.add_animation(AnimationClip::looping("damage1", 3, DEFAULT_FRAME_MS));
        player.add_animation(AnimationClip::looping("damage2", 3, DEFAULT_FRAME_MS));
        player.add_animation(AnimationClip::looping("spikedeath", 10, DEFAULT_FRAME_MS));

        player.play("stand");

        player
    }

    /// Add an animation clip
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    pub fn has_animation(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    /// Play an animation by name. Playing the current clip again is a no-op,
    /// an unknown name keeps the current clip.
    pub fn play(&mut self, name: &str) -> bool {
        if self.current_animation == name {
            return true;
        }
        if !self.animations.contains_key(name) {
            warn!("Animation '{}' not found, keeping '{}'", name, self.current_animation);
            return false;
        }
        self.current_animation = name.to_string();
        self.current_frame = 0;
        self.frame_timer_ms = 0;
        self.paused = false;
        self.finished = false;
        true
    }

    /// Pause the current animation
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume the current animation
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Register an observer for frame and loop notifications
    pub fn add_observer(&mut self) -> ObserverId {
        self.observers.add()
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Take pending notifications for one observer
    pub fn take_events(&mut self, id: ObserverId) -> Vec<AnimationEvent> {
        self.observers.take(id)
    }

    /// Advance playback, queueing notifications for observers
    pub fn update(&mut self, elapsed_ms: u32) {
        if self.paused || self.finished {
            return;
        }

        let Some(clip) = self.animations.get(&self.current_animation) else {
            return;
        };

        self.frame_timer_ms += elapsed_ms;

        loop {
            let frame_ms = clip.frames[self.current_frame].duration_ms.max(1);
            if self.frame_timer_ms < frame_ms {
                break;
            }
            self.frame_timer_ms -= frame_ms;

            let last = clip.last_frame_index();
            if self.current_frame < last {
                self.current_frame += 1;
            } else if clip.looping {
                self.observers.notify(AnimationEvent::looped(&clip.name, last));
                self.current_frame = 0;
            } else {
                // Hold the last frame
                self.observers.notify(AnimationEvent::looped(&clip.name, last));
                self.finished = true;
                self.frame_timer_ms = 0;
                break;
            }

            let frame = clip.frames[self.current_frame];
            self.observers.notify(AnimationEvent::frame(
                &clip.name,
                self.current_frame,
                frame.has_event,
                self.current_frame == last,
            ));
        }
    }

    /// Get the current animation name
    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Check if a one-shot animation has finished
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Check if the current frame is the last one of the clip
    pub fn is_at_last_frame(&self) -> bool {
        self.current_clip()
            .map_or(false, |clip| self.current_frame == clip.last_frame_index())
    }

    /// Get the clip info for the current animation
    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.animations.get(&self.current_animation)
    }
}
