// em4x70-rs/em4x70/src/protocol/exchange.rs

//! Transaction shapes: how a built command is clocked out and how the
//! tag's answer is collected.
//!
//! Only the listen-window search retries. A command is clocked out at most
//! once per transaction: re-sending a partial command mid-frame could
//! corrupt the tag, so any failure after the RM prefix is reported to the
//! caller instead.

use crate::constants::{COMMAND_RETRIES, MAX_RECEIVE_BITS, T_FULL_PERIOD, T_TWA, T_TWALB, T_WEE};
use crate::error::{Error, Result};
use crate::protocol::air::{check_pulse_length, Air, Edge};
use crate::protocol::bitstream::{pack_bits, Bitstream, CommandBitstream};
use crate::protocol::liw::find_listen_window;
use crate::protocol::receive::receive;
use crate::protocol::tracelog::TransactionLog;

/// Emit one bit and record it in the transmit trace.
pub(crate) fn send_bit_logged<A: Air>(air: &mut A, bit: u8, log: &mut TransactionLog) {
    let start = air.now_ticks();
    log.record_sent_bit(start, bit);
    air.send_bit(bit);
    log.transmit_done(air.now_ticks());
}

/// Find a listen window (retrying within the budget), arm the tag with RM,
/// and clock the payload bits out back to back.
fn send_bitstream<A: Air>(air: &mut A, send: &Bitstream, log: &mut TransactionLog) -> Result<()> {
    debug_assert!(!send.is_empty());
    for _ in 0..COMMAND_RETRIES {
        if find_listen_window(air, true, log) {
            // Timing sensitive: nothing but the modulation loop between
            // here and the last bit.
            for &bit in send.bits() {
                send_bit_logged(air, bit, log);
            }
            return Ok(());
        }
    }
    Err(Error::NoListenWindow)
}

/// Two consecutive falling pulses of two bit periods each. Anything else
/// counts as a NAK (or the next listen window).
pub fn check_ack<A: Air>(air: &mut A) -> bool {
    check_pulse_length(air.pulse(Edge::Falling), 2 * T_FULL_PERIOD)
        && check_pulse_length(air.pulse(Edge::Falling), 2 * T_FULL_PERIOD)
}

/// Collect the expected response bits and pack them into `cmd.received`,
/// padding a non-byte-aligned answer (AUTH's 20 bits) with zeros.
fn read_into<A: Air>(air: &mut A, cmd: &mut CommandBitstream, log: &mut TransactionLog) -> Result<()> {
    let expected = cmd.receive_bitcount as usize;
    debug_assert!(expected > 0 && expected <= MAX_RECEIVE_BITS);

    let mut raw = [0u8; MAX_RECEIVE_BITS];
    let got = receive(air, &mut raw[..expected], log)?;
    if got < expected {
        return Err(Error::ShortRead {
            expected,
            actual: got,
        });
    }

    let decode_bits = cmd.decode_bitcount();
    pack_bits(&raw[..decode_bits], &mut cmd.received[..decode_bits / 8]);
    Ok(())
}

/// send-and-read: ID, UM1, UM2 and AUTH. The response header follows the
/// command immediately.
pub fn send_and_read<A: Air>(
    air: &mut A,
    cmd: &mut CommandBitstream,
    log: &mut TransactionLog,
) -> Result<()> {
    log.reset();
    send_bitstream(air, &cmd.send, log)?;
    read_into(air, cmd, log)
}

/// send-and-ack: WRITE. The tag ACKs after the write access time, programs
/// its EEPROM, and ACKs again.
pub fn send_and_ack<A: Air>(
    air: &mut A,
    cmd: &CommandBitstream,
    log: &mut TransactionLog,
) -> Result<()> {
    log.reset();
    send_bitstream(air, &cmd.send, log)?;

    air.wait_ticks(T_TWA);
    if !check_ack(air) {
        return Err(Error::Nak);
    }
    air.wait_ticks(T_WEE);
    if !check_ack(air) {
        return Err(Error::Nak);
    }
    Ok(())
}

/// send-and-wait-and-read: PIN. One ACK after the lock-bit access time,
/// then the re-issued ID once the EEPROM write completed.
pub fn send_wait_read<A: Air>(
    air: &mut A,
    cmd: &mut CommandBitstream,
    log: &mut TransactionLog,
) -> Result<()> {
    log.reset();
    send_bitstream(air, &cmd.send, log)?;

    air.wait_ticks(T_TWALB);
    if !check_ack(air) {
        return Err(Error::Nak);
    }
    air.wait_ticks(T_WEE);
    read_into(air, cmd, log)
}
