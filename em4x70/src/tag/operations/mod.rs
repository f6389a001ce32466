// em4x70-rs/em4x70/src/tag/operations/mod.rs

//! High-level tag operations, each running inside an active
//! [`crate::reader::Session`].

pub mod auth;
pub mod brute;
pub mod info;
pub mod read;
pub mod unlock;
pub mod write;

pub use auth::authenticate;
pub use brute::{brute_force, candidate_rnd};
pub use info::identify;
pub use read::{read_id, read_um1, read_um2};
pub use unlock::unlock_pin;
pub use write::{write_block, write_key, write_pin};
