// Transient status messages with auto-hide

use std::time::{Duration, Instant};

/// How long a non-held message stays visible
pub const MESSAGE_AUTOHIDE: Duration = Duration::from_secs(3);

/// A user-facing status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    pub text: String,

    /// Held messages stay until replaced or hidden explicitly
    pub held: bool,
}

/// Single-slot message banner
///
/// Holds at most one message and at most one pending hide deadline. Every
/// emit replaces both.
#[derive(Debug)]
pub struct MessageBanner {
    message: Option<TransientMessage>,
    visible: bool,
    hide_at: Option<Instant>,
    autohide: Duration,
}

impl MessageBanner {
    /// Create an empty banner using `MESSAGE_AUTOHIDE`
    pub fn new() -> Self {
        Self::with_autohide(MESSAGE_AUTOHIDE)
    }

    /// Create an empty banner with a custom auto-hide delay
    pub fn with_autohide(autohide: Duration) -> Self {
        Self {
            message: None,
            visible: false,
            hide_at: None,
            autohide,
        }
    }

    /// Show a message, superseding the current one
    pub fn emit(&mut self, text: impl Into<String>, held: bool, now: Instant) {
        self.message = Some(TransientMessage {
            text: text.into(),
            held,
        });
        self.visible = true;
        self.hide_at = if held { None } else { Some(now + self.autohide) };
    }

    /// Hide the current message and drop any pending deadline
    pub fn hide(&mut self) {
        self.visible = false;
        self.hide_at = None;
    }

    /// Hide the message if its deadline has passed
    /// Returns true if this call hid it
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.hide();
                true
            }
            _ => false,
        }
    }

    /// When the current message will auto-hide, if ever
    pub fn next_deadline(&self) -> Option<Instant> {
        self.hide_at
    }

    /// Check if a message is showing
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Text of the showing message
    pub fn text(&self) -> Option<&str> {
        if self.visible {
            self.message.as_ref().map(|m| m.text.as_str())
        } else {
            None
        }
    }

    /// The last emitted message, visible or not
    pub fn current(&self) -> Option<&TransientMessage> {
        self.message.as_ref()
    }

    /// The configured auto-hide delay
    pub fn autohide(&self) -> Duration {
        self.autohide
    }
}

impl Default for MessageBanner {
    fn default() -> Self {
        Self::new()
    }
}
