//! Gesture state machine.
//!
//! A gesture runs Idle -> InProgress(direction) -> committed or cancelled,
//! and the machine is back at Idle afterwards, ready for the next one. The
//! dispatcher only decides; the caller executes the returned effects
//! (narration previews, seek-loop control, player commands).

/// Stroke directions on the 3x3 gesture pad.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Gesture {
    UpLeft,
    Up,
    UpRight,
    Left,
    Center,
    Right,
    DownLeft,
    Down,
    DownRight,
}

/// Player operations a committed gesture maps to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    TogglePlayPause,
    NextTrack,
    PrevTrack,
    NextAlbum,
    PrevAlbum,
    NextArtist,
    PrevArtist,
}

/// Directions that act continuously while the gesture is held.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SeekDirection {
    Backward,
    Forward,
}

/// What the runtime should do in response to a direction change.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GestureEffect {
    /// Narrate the prospective target of the action without committing it.
    Preview(PlayerAction),
    /// Keep nudging the playback position while the gesture is held.
    Seek(SeekDirection),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    // The direction is unknown right after touch-down.
    InProgress(Option<Gesture>),
}

#[derive(Debug)]
pub struct GestureDispatcher {
    phase: Phase,
}

impl Default for GestureDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureDispatcher {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn in_progress(&self) -> bool {
        matches!(self.phase, Phase::InProgress(_))
    }

    pub fn current(&self) -> Option<Gesture> {
        match self.phase {
            Phase::InProgress(g) => g,
            Phase::Idle => None,
        }
    }

    /// Begin a gesture. Returns false when one is already in progress.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::InProgress(None);
                true
            }
            Phase::InProgress(_) => false,
        }
    }

    /// Update the polled direction, starting the gesture if needed. Any
    /// change cancels a held seek first; the returned effect may start a
    /// new one.
    pub fn change(&mut self, gesture: Gesture) -> GestureEffect {
        self.phase = Phase::InProgress(Some(gesture));
        effect_for(gesture)
    }

    /// Commit the gesture. Seek directions already did their work while
    /// held and commit nothing; every other direction maps to an action.
    pub fn finish(&mut self) -> Option<PlayerAction> {
        let committed = self.current();
        self.phase = Phase::Idle;
        committed.and_then(action_for)
    }

    /// Abandon the gesture without committing anything.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }
}

fn effect_for(gesture: Gesture) -> GestureEffect {
    match gesture {
        Gesture::Up => GestureEffect::Seek(SeekDirection::Backward),
        Gesture::Down => GestureEffect::Seek(SeekDirection::Forward),
        Gesture::UpLeft => GestureEffect::Preview(PlayerAction::PrevArtist),
        Gesture::UpRight => GestureEffect::Preview(PlayerAction::NextArtist),
        Gesture::Left => GestureEffect::Preview(PlayerAction::PrevTrack),
        Gesture::Center => GestureEffect::Preview(PlayerAction::TogglePlayPause),
        Gesture::Right => GestureEffect::Preview(PlayerAction::NextTrack),
        Gesture::DownLeft => GestureEffect::Preview(PlayerAction::PrevAlbum),
        Gesture::DownRight => GestureEffect::Preview(PlayerAction::NextAlbum),
    }
}

fn action_for(gesture: Gesture) -> Option<PlayerAction> {
    match gesture {
        Gesture::UpLeft => Some(PlayerAction::PrevArtist),
        Gesture::UpRight => Some(PlayerAction::NextArtist),
        Gesture::Left => Some(PlayerAction::PrevTrack),
        Gesture::Center => Some(PlayerAction::TogglePlayPause),
        Gesture::Right => Some(PlayerAction::NextTrack),
        Gesture::DownLeft => Some(PlayerAction::PrevAlbum),
        Gesture::DownRight => Some(PlayerAction::NextAlbum),
        Gesture::Up | Gesture::Down => None,
    }
}
