// Remap state machine

use super::button::{Button, CANCEL_KEY};

/// Whether a remap is pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemapState {
    #[default]
    Idle,

    /// Waiting for a new key for this button
    WaitingForInput(Button),
}

/// Result of feeding a key code to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The key code should now resolve to the button
    Bound { key_code: u32, button: Button },

    /// The cancel key was pressed; nothing is bound
    Cancelled,

    /// No remap was pending
    Ignored,
}

/// Tracks the single pending remap request
#[derive(Debug, Default)]
pub struct RemapStateMachine {
    state: RemapState,
}

impl RemapStateMachine {
    /// Create an idle state machine
    pub fn new() -> Self {
        Self::default()
    }

    /// Start waiting for a new key for `button`
    /// Returns the button whose request was replaced, if any
    pub fn enable_remap(&mut self, button: Button) -> Option<Button> {
        let replaced = self.target();
        self.state = RemapState::WaitingForInput(button);
        replaced
    }

    /// Drop the pending request
    /// Returns false if nothing was pending
    pub fn cancel(&mut self) -> bool {
        let was_waiting = self.is_waiting();
        self.state = RemapState::Idle;
        was_waiting
    }

    /// Resolve the pending request with a key code
    pub fn capture(&mut self, key_code: u32) -> CaptureOutcome {
        let Some(button) = self.target() else {
            return CaptureOutcome::Ignored;
        };

        self.state = RemapState::Idle;
        if key_code == CANCEL_KEY {
            CaptureOutcome::Cancelled
        } else {
            CaptureOutcome::Bound { key_code, button }
        }
    }

    /// Current state
    pub fn state(&self) -> RemapState {
        self.state
    }

    /// Check if a remap is pending
    pub fn is_waiting(&self) -> bool {
        matches!(self.state, RemapState::WaitingForInput(_))
    }

    /// Button awaiting a new key
    pub fn target(&self) -> Option<Button> {
        match self.state {
            RemapState::Idle => None,
            RemapState::WaitingForInput(button) => Some(button),
        }
    }
}
