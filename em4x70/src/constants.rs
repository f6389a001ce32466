// em4x70-rs/em4x70/src/constants.rs
//! Chip timing and protocol constants shared across the crate.
//!
//! All timings are expressed in timer ticks. The tick source runs at
//! 1.5 ticks per microsecond; one carrier cycle (Fc) at 125 kHz is 8 us,
//! so a single Fc spans 12 ticks and one bit period spans 32 Fc.

/// Timer ticks per RF carrier cycle (1 Fc = 8 us = 12 ticks).
pub const TICKS_PER_FC: u32 = 12;

/// One quarter of a bit period (8 Fc).
pub const T_QUARTER_PERIOD: u32 = 8 * TICKS_PER_FC;
/// Half of a bit period (16 Fc).
pub const T_HALF_PERIOD: u32 = 16 * TICKS_PER_FC;
/// Three quarters of a bit period (24 Fc).
pub const T_THREE_QUARTER_PERIOD: u32 = 24 * TICKS_PER_FC;
/// One full bit period (32 Fc).
pub const T_FULL_PERIOD: u32 = 32 * TICKS_PER_FC;

/// Write access time before the first ACK of a WRITE (128 Fc).
pub const T_TWA: u32 = 128 * TICKS_PER_FC;
/// EEPROM programming time between the two WRITE ACKs (3072 Fc).
pub const T_WEE: u32 = 3072 * TICKS_PER_FC;
/// Write access time of the lock bits, used by the PIN command (672 Fc).
pub const T_TWALB: u32 = 672 * TICKS_PER_FC;
/// Initial modulation drop when sending a 0 bit (4 Fc).
pub const T_BITMOD: u32 = 4 * TICKS_PER_FC;
/// Accepted deviation when matching a measured pulse against a target (8 Fc).
pub const T_TOLERANCE: u32 = 8 * TICKS_PER_FC;

/// Upper bound on any single edge wait; a longer pulse means the tag is gone.
pub const T_PULSE_TIMEOUT: u32 = 4 * T_FULL_PERIOD;

/// Field-cycle delay between a listen window and the RM prefix.
pub const T_RM_DELAY: u32 = 40 * TICKS_PER_FC;

/// Listen-window match attempts before a search gives up.
pub const LIW_MAX_ATTEMPTS: u32 = 50;
/// Pulses scanned for the response header's 1-to-0 transition.
pub const READ_HEADER_LEN: u32 = 16;
/// Listen-window searches per command before the transaction fails.
pub const COMMAND_RETRIES: u32 = 5;
/// Bit periods the carrier is watched for a signal at operation start.
pub const SIGNAL_DETECT_PERIODS: u32 = 32;

/// Longest command payload: AUTH is 4 + 56 + 7 + 28 = 95 bits. The two RM
/// bits are emitted by the listen-window detector and are not counted here.
pub const MAX_SEND_BITS: usize = 96;
/// Longest tag response: UM2 is 64 bits, excluding the 16-bit header.
pub const MAX_RECEIVE_BITS: usize = 64;
/// Capacity of one direction of the transaction trace log.
pub const MAX_LOG_BITS: usize = 112;

/// ADC midpoint noise margin; may depend on the environment.
pub const NOISE_THRESHOLD: u8 = 13;
/// Samples above this level count as signal high.
pub const HIGH_SIGNAL_THRESHOLD: u8 = 127 + NOISE_THRESHOLD;
/// Samples below this level count as signal low.
pub const LOW_SIGNAL_THRESHOLD: u8 = 127 - NOISE_THRESHOLD;

/// Carrier divisor for 125 kHz on the LF front-end.
pub const LF_DIVISOR_125: u8 = 95;

/// Command id for reading the 32-bit tag ID.
pub const CMD_ID: u8 = 0x01;
/// Command id for reading user memory 1.
pub const CMD_UM1: u8 = 0x02;
/// Command id for the challenge/response authentication.
pub const CMD_AUTH: u8 = 0x03;
/// Command id for sending the unlock PIN.
pub const CMD_PIN: u8 = 0x04;
/// Command id for writing one 16-bit word.
pub const CMD_WRITE: u8 = 0x05;
/// Command id for reading user memory 2 (EM4170 only).
pub const CMD_UM2: u8 = 0x07;

/// Word address holding PIN bits 31..16.
pub const PIN_WORD_LOWER: u8 = 10;
/// Word address holding PIN bits 15..0.
pub const PIN_WORD_UPPER: u8 = 11;
