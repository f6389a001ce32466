// fixtures.rs: commonly used challenges and scripted pulse sequences

#![allow(dead_code)]

use em4x70::test_support::{
    ack_pulses, encode_response_bits, header_pulses, id_bits, liw_pulses, um2_bits, ScriptedAir,
};
use em4x70::types::{Frnd, Rnd};

pub fn sample_rnd() -> Rnd {
    Rnd::from_bytes([0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07])
}

pub fn sample_frnd() -> Frnd {
    Frnd::from_bytes([0xAA, 0xBB, 0xCC, 0xDD])
}

/// Air with the presence probe already scripted.
pub fn air_with_tag() -> ScriptedAir {
    let mut air = ScriptedAir::new();
    air.push_pulses(&liw_pulses());
    air
}

/// Script one send-and-read transaction answering with a 32-bit field.
pub fn push_word_read(air: &mut ScriptedAir, value: u32) {
    air.push_pulses(&liw_pulses());
    air.push_pulses(&header_pulses());
    air.push_pulses(&encode_response_bits(&id_bits(value)));
}

/// Script one send-and-read transaction answering with a 64-bit field.
pub fn push_um2_read(air: &mut ScriptedAir, value: u64) {
    air.push_pulses(&liw_pulses());
    air.push_pulses(&header_pulses());
    air.push_pulses(&encode_response_bits(&um2_bits(value)));
}

/// Script one fully acknowledged WRITE transaction.
pub fn push_acked_write(air: &mut ScriptedAir) {
    air.push_pulses(&liw_pulses());
    air.push_pulses(&ack_pulses());
    air.push_pulses(&ack_pulses());
}
