// em4x70-rs/em4x70/src/utils/mod.rs
//! Small helpers: bit reflection and hex formatting.

mod hex;
mod reflect;

pub use hex::{bytes_to_hex, bytes_to_hex_spaced};
pub use reflect::{reflect8, reflect16};
