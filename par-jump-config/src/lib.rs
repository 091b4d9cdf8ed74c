//! Configuration for par-jump.
//!
//! The CLI parses its flags once into a [`Config`] value which is then passed
//! by reference to every component that needs it. Nothing in here is global.

pub mod config;
pub mod defaults;
pub mod error;
pub mod region;

pub use config::{Config, JumpStyle};
pub use error::ConfigError;
pub use region::Region;
