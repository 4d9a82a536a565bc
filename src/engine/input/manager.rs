// Input mapper - routes raw key events to remapping or to the host

use super::button::Button;
use super::config::MapperConfig;
use super::events::{KeyEventHub, RawKeyEvent, Subscription};
use super::keymap::KeyMap;
use super::label::format_key_label;
use super::message::MessageBanner;
use super::remap::{CaptureOutcome, RemapState, RemapStateMachine};
use super::storage::{KeyValueStore, MappingStore};
use log::{debug, info, trace};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

/// A key event translated to a logical button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalInputEvent {
    pub button: Button,
    pub pressed: bool,
}

/// The application receiving logical input
pub trait Host {
    /// Called once per mapped raw key event
    fn on_input(&mut self, event: LogicalInputEvent);

    /// Called when a remap starts and keyboard focus is needed
    fn request_focus(&mut self) {}
}

/// Remapping overlay core
///
/// Owns the key map, the remap state machine and the message banner. Every
/// raw key event either resolves a pending remap or is translated and
/// forwarded to the host.
pub struct InputMapper<H: Host, S: KeyValueStore> {
    config: MapperConfig,
    keymap: KeyMap,
    store: MappingStore<S>,
    remap: RemapStateMachine,
    banner: MessageBanner,
    host: H,
}

impl<H: Host, S: KeyValueStore> InputMapper<H, S> {
    /// Create a mapper, restoring the key map from `store`
    pub fn new(config: MapperConfig, store: S, host: H) -> Self {
        let store = MappingStore::new(store);
        let keymap = store.load(&config.storage_key);
        info!(
            "Input mapper ready with {} bindings (storage key '{}')",
            keymap.len(),
            config.storage_key
        );

        Self {
            config,
            keymap,
            store,
            remap: RemapStateMachine::new(),
            banner: MessageBanner::new(),
            host,
        }
    }

    /// Process one raw key event
    pub fn handle_key_event(&mut self, event: RawKeyEvent) {
        if self.remap.is_waiting() {
            if event.state.is_pressed() {
                self.capture(event.key_code);
            } else {
                trace!("Ignoring release of {} while remapping", event.key_code);
            }
            return;
        }

        match self.keymap.get(event.key_code) {
            Some(button) => self.host.on_input(LogicalInputEvent {
                button,
                pressed: event.state.is_pressed(),
            }),
            None => trace!("Key code {} is not mapped", event.key_code),
        }
    }

    /// Wait for the next key press and bind it to `button`
    pub fn enable_remap(&mut self, button: Button) {
        if let Some(replaced) = self.remap.enable_remap(button) {
            debug!("Remap of {} replaced by {}", replaced, button);
        }

        let text = format!("Press any key to remap \"{}\".", button);
        self.banner.emit(text, true, Instant::now());
        self.host.request_focus();
    }

    /// Abandon a pending remap
    pub fn cancel_remap(&mut self) {
        if self.remap.cancel() {
            debug!("Remap cancelled");
            self.banner.hide();
        }
    }

    fn capture(&mut self, key_code: u32) {
        match self.remap.capture(key_code) {
            CaptureOutcome::Bound { key_code, button } => {
                let label = format_key_label(key_code);
                if let Some(previous) = self.keymap.bind(key_code, button) {
                    debug!("Key code {} moved from {} to {}", key_code, previous, button);
                }
                info!("Mapped {} to key code {} ({})", button, key_code, label);

                let text = format!("Mapped \"{}\" to {}.", button, label);
                self.banner.emit(text, false, Instant::now());
                self.store.save(&self.config.storage_key, &self.keymap);
            }
            CaptureOutcome::Cancelled => {
                debug!("Remap cancelled with cancel key");
                self.banner.hide();
            }
            CaptureOutcome::Ignored => {}
        }
    }

    /// Hide an expired message; call whenever `next_deadline` passes
    pub fn tick(&mut self, now: Instant) -> bool {
        self.banner.tick(now)
    }

    /// When `tick` next needs to run
    pub fn next_deadline(&self) -> Option<Instant> {
        self.banner.next_deadline()
    }

    /// Get the current key map
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Get the remap state
    pub fn remap_state(&self) -> RemapState {
        self.remap.state()
    }

    /// Get the message banner
    pub fn banner(&self) -> &MessageBanner {
        &self.banner
    }

    /// Get the configuration
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Get the host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Get the backing store
    pub fn store(&self) -> &S {
        self.store.store()
    }
}

impl<H: Host + 'static, S: KeyValueStore + 'static> InputMapper<H, S> {
    /// Listen to `hub` until the returned subscription is dropped
    pub fn attach(mapper: &Rc<RefCell<Self>>, hub: &KeyEventHub) -> Subscription {
        let mapper = Rc::downgrade(mapper);
        hub.subscribe(move |event| {
            if let Some(mapper) = mapper.upgrade() {
                mapper.borrow_mut().handle_key_event(*event);
            }
        })
    }
}
