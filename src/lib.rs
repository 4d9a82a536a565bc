// On-screen keyboard-to-controller remapping overlay

pub mod engine;
pub mod overlay;
