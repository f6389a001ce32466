// em4x70-rs/em4x70/src/protocol/liw.rs

//! Listen-window detection.
//!
//! Between commands the tag idles in a repeating listen window: two rising
//! pulses of 2.5 bit periods, then a falling pulse of 3 and a falling
//! pulse of 2. Matching all four aligns the reader with the only moment
//! the tag accepts a command.

use crate::constants::{LIW_MAX_ATTEMPTS, T_FULL_PERIOD, T_HALF_PERIOD, T_RM_DELAY};
use crate::protocol::air::{check_pulse_length, Air, Edge};
use crate::protocol::exchange::send_bit_logged;
use crate::protocol::tracelog::TransactionLog;

/// Scan the carrier for the listen-window signature, up to
/// [`LIW_MAX_ATTEMPTS`] times.
///
/// With `command` set, a matching window is immediately armed for a
/// command: wait the RM delay, clock out the two zero RM bits, and return
/// so the caller's payload bits follow without a gap. Returns false when
/// no window was seen within the attempt budget.
pub fn find_listen_window<A: Air>(air: &mut A, command: bool, log: &mut TransactionLog) -> bool {
    for _ in 0..LIW_MAX_ATTEMPTS {
        if check_pulse_length(
            air.pulse(Edge::Rising),
            2 * T_FULL_PERIOD + T_HALF_PERIOD,
        ) && check_pulse_length(
            air.pulse(Edge::Rising),
            2 * T_FULL_PERIOD + T_HALF_PERIOD,
        ) && check_pulse_length(air.pulse(Edge::Falling), 3 * T_FULL_PERIOD)
            && check_pulse_length(air.pulse(Edge::Falling), 2 * T_FULL_PERIOD)
        {
            if command {
                // The datasheet asks for about 48 field cycles after the
                // final window edge; 40 has proven the most reliable on
                // real antennas.
                air.wait_ticks(T_RM_DELAY);
                send_bit_logged(air, 0, log);
                send_bit_logged(air, 0, log);
            }
            return true;
        }
    }
    false
}
