/// What the host should do to the cat after a pointer or interaction change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverAction {
    Pause,
    Resume,
    Nothing,
}

/// Host-side state that isn't the cat's.
pub struct AppState {
    /// Mouse events reach the overlay; hovering the cat pauses it.
    interactive: bool,
    /// The current pause was caused by hovering, so leaving may undo it.
    hover_paused: bool,
    pub status_line: String,
}

impl AppState {
    pub fn new(interactive: bool) -> Self {
        Self {
            interactive,
            hover_paused: false,
            status_line: "the cat is stretching".to_string(),
        }
    }

    pub fn interactive(&self) -> bool {
        self.interactive
    }

    pub fn hover_paused(&self) -> bool {
        self.hover_paused
    }

    /// The pointer moved; `over` says whether it is on the cat and `paused`
    /// whether the cat is paused right now.
    ///
    /// Leaving the cat only resumes a pause that hovering caused.
    pub fn pointer_moved(&mut self, over: bool, paused: bool) -> HoverAction {
        if !self.interactive {
            return HoverAction::Nothing;
        }
        if over && !paused {
            self.hover_paused = true;
            HoverAction::Pause
        } else if !over && self.hover_paused {
            self.hover_paused = false;
            HoverAction::Resume
        } else {
            HoverAction::Nothing
        }
    }

    /// An explicit pause or resume; the pointer leaving no longer undoes it.
    pub fn explicit_pause_change(&mut self) {
        self.hover_paused = false;
    }

    /// Turning interaction off releases a pause that hovering caused.
    pub fn set_interactive(&mut self, interactive: bool) -> HoverAction {
        self.interactive = interactive;
        if !interactive && self.hover_paused {
            self.hover_paused = false;
            HoverAction::Resume
        } else {
            HoverAction::Nothing
        }
    }
}
