// em4x70-rs/em4x70/src/tag/operations/write.rs

use crate::constants::{PIN_WORD_LOWER, PIN_WORD_UPPER};
use crate::error::{Error, Result};
use crate::protocol::air::Air;
use crate::protocol::commands::Command;
use crate::reader::Session;
use crate::tag::operations::unlock::unlock_pin;
use crate::types::CryptKey;

/// Write one 16-bit word to a block address (0..=15).
pub fn write_block<A: Air>(session: &mut Session<A>, word: u16, address: u8) -> Result<()> {
    if address > 0x0F {
        return Err(Error::BadBlockAddress(address));
    }
    let cmd = Command::Write { word, address }.build(session.parity());
    session.transact_write(&cmd)
}

/// Program a new PIN: the low half goes to word 11, the high half to
/// word 10, then the PIN is sent to confirm the tag accepts it.
pub fn write_pin<A: Air>(session: &mut Session<A>, pin: u32) -> Result<()> {
    write_block(session, pin as u16, PIN_WORD_UPPER)?;
    write_block(session, (pin >> 16) as u16, PIN_WORD_LOWER)?;
    unlock_pin(session, pin)
}

/// Program a new 96-bit crypt key: six words written to block addresses
/// 9 down to 4, aborting on the first failure.
pub fn write_key<A: Air>(session: &mut Session<A>, key: &CryptKey) -> Result<()> {
    for i in 0..6u8 {
        write_block(session, key.word(i as usize), 9 - i)?;
    }
    Ok(())
}
