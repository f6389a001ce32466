// em4x70-rs/em4x70/src/prelude.rs

//! Convenience re-exports for consumers of the crate.

pub use crate::hal::LfHal;
pub use crate::protocol::{Air, Command, Edge, HalAir};
pub use crate::reader::{Em4x70Reader, Session};
pub use crate::tag::{TagImage, TagInfo};
pub use crate::{
    AuthResponse, CryptKey, Error, Frnd, KeyBlock, ParityMode, RecoveredKey, Result, Rnd, Status,
    TagVariant,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, reflect16, reflect8};
