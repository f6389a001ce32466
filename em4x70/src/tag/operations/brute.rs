// em4x70-rs/em4x70/src/tag/operations/brute.rs

//! Brute-force recovery of one 16-bit key word.
//!
//! A tag key word at block 7, 8 or 9 shifts the effective challenge by a
//! known amount: the challenge bytes are reversed in array order,
//! `reflect16(k)` is added at the byte offset selected by the block with
//! the carry rippling through the remaining bytes, and each output byte
//! is bit-reflected once as it is stored. Trying every `k` against a
//! captured (rnd, f(RN)) pair until the tag authenticates recovers the
//! word.

use crate::error::{Error, Result};
use crate::protocol::air::Air;
use crate::reader::Session;
use crate::tag::operations::auth::authenticate;
use crate::types::{Frnd, KeyBlock, RecoveredKey, Rnd};
use crate::utils::{reflect8, reflect16};

// Writes one reflected byte, reporting the carry out of the addition.
fn set_byte(target: &mut u8, value: u16) -> u16 {
    *target = reflect8(value as u8);
    u16::from(value > 0xFF)
}

/// The challenge to present when testing candidate key `k` for the given
/// block.
///
/// Bytes below the block's offset keep their original value. From the
/// offset on, the challenge is read in reverse byte order, `reflect16(k)`
/// is added little-endian with the carry rippling through byte 6, and
/// each sum byte is bit-reflected into place.
pub fn candidate_rnd(rnd: &Rnd, block: KeyBlock, k: u16) -> Rnd {
    let src = rnd.as_bytes();
    let mut out = *src;

    // Reverse the array order, not the bits: byte i of the reversed
    // challenge is byte 6 - i of the original.
    let mut rev = [0u8; 7];
    for (i, r) in rev.iter_mut().enumerate() {
        *r = src[6 - i];
    }

    let rev_k = reflect16(k);
    let lo = u16::from(rev_k as u8);
    let hi = u16::from((rev_k >> 8) as u8);

    let start = match block {
        KeyBlock::Word9 => 0,
        KeyBlock::Word8 => 2,
        KeyBlock::Word7 => 4,
    };

    let mut carry = set_byte(&mut out[start], u16::from(rev[start]) + lo);
    carry = set_byte(&mut out[start + 1], u16::from(rev[start + 1]) + carry + hi);
    for i in (start + 2)..7 {
        carry = set_byte(&mut out[i], u16::from(rev[i]) + carry);
    }

    Rnd::from_bytes(out)
}

/// Try every key word from `start_key` to 0xFFFF until the tag
/// authenticates.
///
/// Each candidate gets exactly one attempt, so a stable RF link is
/// assumed. The abort sources are polled once per key and progress is
/// logged every 256 attempts.
pub fn brute_force<A: Air>(
    session: &mut Session<A>,
    block: KeyBlock,
    rnd: &Rnd,
    frnd: &Frnd,
    start_key: u16,
) -> Result<RecoveredKey> {
    for k in u32::from(start_key)..=0xFFFF {
        let key = k as u16;
        session.watchdog_kick();

        if key % 0x100 == 0 {
            log::info!("trying key {:04X}", key);
        }

        let challenge = candidate_rnd(rnd, block, key);
        if authenticate(session, &challenge, frnd).is_ok() {
            log::info!("authentication success with rnd {}", challenge.to_hex());
            return Ok(RecoveredKey::new(key));
        }

        if session.abort_requested() {
            log::warn!("brute force interrupted at key {:04X}", key);
            return Err(Error::Aborted);
        }
    }
    Err(Error::KeyNotFound)
}
