// em4x70-rs/em4x70/src/protocol/mod.rs

//! The EM4x70 air interface: pulse measurement, bitstream construction,
//! listen-window alignment, demodulation, and the transaction shapes that
//! tie them together.

pub mod air;
pub mod bitstream;
pub mod commands;
pub mod exchange;
pub mod liw;
pub mod receive;
pub mod tracelog;

pub use air::{check_pulse_length, Air, Edge, HalAir};
pub use bitstream::{nibble_parity, pack_bits, unpack_bits, Bitstream, CommandBitstream};
pub use commands::Command;
pub use exchange::check_ack;
pub use liw::find_listen_window;
pub use receive::receive;
pub use tracelog::TransactionLog;
