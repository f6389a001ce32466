// em4x70-rs/em4x70/src/protocol/commands/mod.rs

//! Per-command bitstream builders.
//!
//! Every reader command is a [`Command`] variant; `build` produces the
//! exact bit sequence the tag expects, including the command parity
//! variant when [`ParityMode::Even`] is selected. New commands get a
//! variant here and a builder in their own module.

pub mod auth;
pub mod pin;
pub mod read;
pub mod write;

pub use auth::build_auth;
pub use pin::build_send_pin;
pub use read::{build_read_id, build_read_um1, build_read_um2};
pub use write::build_write;

use crate::protocol::bitstream::{Bitstream, CommandBitstream};
use crate::types::{Frnd, ParityMode, Rnd};

/// A reader command and its parameters.
#[derive(Debug, Clone)]
pub enum Command {
    /// Read the 32-bit tag ID.
    ReadId,
    /// Read user memory 1 (lock bits + 30 user bits).
    ReadUm1,
    /// Read user memory 2 (EM4170 only, 64 bits).
    ReadUm2,
    /// Challenge/response authentication.
    Auth {
        /// 56-bit challenge.
        rnd: Rnd,
        /// 28-bit reader cipher output.
        frnd: Frnd,
    },
    /// Send the unlock PIN. Requires the tag ID from a prior read.
    SendPin {
        /// Tag ID bytes, little-endian as stored in the tag image.
        tag_id: [u8; 4],
        /// 32-bit PIN.
        pin: u32,
    },
    /// Write one 16-bit word to a block address.
    Write {
        /// Word to store.
        word: u16,
        /// Block address 0..=15.
        address: u8,
    },
}

impl Command {
    /// The three-bit command id.
    pub fn command_code(&self) -> u8 {
        match self {
            Self::ReadId => crate::constants::CMD_ID,
            Self::ReadUm1 => crate::constants::CMD_UM1,
            Self::ReadUm2 => crate::constants::CMD_UM2,
            Self::Auth { .. } => crate::constants::CMD_AUTH,
            Self::SendPin { .. } => crate::constants::CMD_PIN,
            Self::Write { .. } => crate::constants::CMD_WRITE,
        }
    }

    /// Build the full send bitstream for this command.
    pub fn build(&self, parity: ParityMode) -> CommandBitstream {
        match self {
            Self::ReadId => build_read_id(parity),
            Self::ReadUm1 => build_read_um1(parity),
            Self::ReadUm2 => build_read_um2(parity),
            Self::Auth { rnd, frnd } => build_auth(rnd, frnd, parity),
            Self::SendPin { tag_id, pin } => build_send_pin(tag_id, *pin, parity),
            Self::Write { word, address } => build_write(*word, *address, parity),
        }
    }
}

/// Append the 4-bit command field: without parity the 3-bit id is
/// zero-extended on the left; with parity the three id bits are followed
/// by their even parity bit.
pub(crate) fn push_command_bits(bits: &mut Bitstream, code: u8, parity: ParityMode) {
    if parity.enabled() {
        let mut p = 0u8;
        for shift in (0..3).rev() {
            let bit = (code >> shift) & 1;
            bits.push_bit(bit);
            p ^= bit;
        }
        bits.push_bit(p);
    } else {
        bits.push_bit(0);
        for shift in (0..3).rev() {
            bits.push_bit((code >> shift) & 1);
        }
    }
}
