//! CLI command implementations.

pub mod common;
pub mod devices;
pub mod listen;
pub mod presets;
pub mod profiles;
