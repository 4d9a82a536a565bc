// Input remapping system
//
// This module turns raw keyboard events into logical controller buttons and
// lets the user rebind any button at runtime, persisting the result.
//
// ## Architecture
//
// - `button`: Logical buttons and the default key bindings
// - `keymap`: Key code -> button mapping and its reverse view
// - `label`: Human-readable key labels
// - `storage`: Key-value stores and key map persistence
// - `message`: Transient status messages with auto-hide
// - `remap`: Remap state machine
// - `events`: Raw key events and scoped listener registration
// - `keycode`: winit key translation
// - `config`: Mapper configuration
// - `manager`: The input mapper coordinating everything
//
// ## Usage Example
//
// ```rust
// use input_mapper::engine::input::{InputMapper, MapperConfig, MemoryStore, RawKeyEvent};
//
// let mut mapper = InputMapper::new(MapperConfig::new("controller.svg"), MemoryStore::new(), host);
//
// // Feed key events from the platform
// mapper.handle_key_event(RawKeyEvent::pressed(65)); // host receives LEFT pressed
//
// // Rebind a button: the next key press becomes its new binding
// mapper.enable_remap(Button::Up);
// mapper.handle_key_event(RawKeyEvent::pressed(32));
// ```

pub mod button;
pub mod config;
pub mod events;
pub mod keycode;
pub mod keymap;
pub mod label;
pub mod manager;
pub mod message;
pub mod remap;
pub mod storage;

// Re-export commonly used types
pub use button::{Button, CANCEL_KEY};
pub use config::{MapperConfig, DEFAULT_STORAGE_KEY};
pub use events::{KeyEventHub, KeyState, RawKeyEvent, Subscription};
pub use keymap::KeyMap;
pub use label::format_key_label;
pub use manager::{Host, InputMapper, LogicalInputEvent};
pub use message::{MessageBanner, TransientMessage, MESSAGE_AUTOHIDE};
pub use remap::{RemapState, RemapStateMachine};
pub use storage::{FileStore, KeyValueStore, MappingStore, MemoryStore, StorageError};
