// em4x70-rs/em4x70/src/protocol/receive.rs

//! Pulse-width demodulation of the tag response.
//!
//! Every response starts with the 16-bit header `1111_1111_1111_0000`
//! followed by the data bits. Between listen windows only pulse lengths of
//! 1, 1.5 and 2 bit periods can occur; anything else marks the end of the
//! data (usually the next listen window).

use crate::constants::{READ_HEADER_LEN, T_FULL_PERIOD, T_HALF_PERIOD};
use crate::error::{Error, Result};
use crate::protocol::air::{check_pulse_length, Air, Edge};
use crate::protocol::tracelog::TransactionLog;

/// Decode up to `bits.len()` data bits from the tag response.
///
/// Synchronizes on the header first: skips six bit periods of the
/// (possibly noisy) ones preamble, scans up to [`READ_HEADER_LEN`] rising
/// pulses for the 1.5-period one-to-zero transition, then consumes the
/// three remaining zero pulses. Returns the number of bits decoded, which
/// is less than requested when a listen window or an unexpected pulse cuts
/// the response short.
pub fn receive<A: Air>(
    air: &mut A,
    bits: &mut [u8],
    log: &mut TransactionLog,
) -> Result<usize> {
    let max_bits = bits.len();
    let mut edge = Edge::Rising;

    // Skip about half of the leading ones; the signal may still be
    // settling right after our own transmission.
    air.wait_ticks(6 * T_FULL_PERIOD);

    let mut found_header = false;
    for _ in 0..READ_HEADER_LEN {
        let pl = air.pulse(edge);
        if check_pulse_length(pl, 3 * T_HALF_PERIOD) {
            found_header = true;
            break;
        }
    }
    if !found_header {
        return Err(Error::HeaderNotFound);
    }

    // The transition pulse consumed the first zero; three more follow.
    for _ in 0..3 {
        if !check_pulse_length(air.pulse(edge), T_FULL_PERIOD) {
            return Ok(0);
        }
    }

    log.receive_started(air.now_ticks());

    let mut pos = 0;
    while pos < max_bits {
        let pl = air.pulse(edge);

        if check_pulse_length(pl, T_FULL_PERIOD) {
            // Single bit, value given by the current polarity.
            bits[pos] = match edge {
                Edge::Falling => 1,
                Edge::Rising => 0,
            };
            pos += 1;
        } else if check_pulse_length(pl, 3 * T_HALF_PERIOD) {
            // Two equal bits, then the polarity flips.
            let value = match edge {
                Edge::Falling => 0,
                Edge::Rising => 1,
            };
            bits[pos] = value;
            pos += 1;
            if pos < max_bits {
                bits[pos] = value;
                pos += 1;
            }
            edge = edge.flip();
        } else if check_pulse_length(pl, 2 * T_FULL_PERIOD) {
            // Two complementary bits, polarity unchanged.
            let (first, second) = match edge {
                Edge::Falling => (0, 1),
                Edge::Rising => (1, 0),
            };
            bits[pos] = first;
            pos += 1;
            if pos < max_bits {
                bits[pos] = second;
                pos += 1;
            }
        } else {
            // Listen window or invalid bit.
            break;
        }
    }

    log.receive_done(air.now_ticks());
    log.record_received_bits(&bits[..pos]);

    Ok(pos)
}
