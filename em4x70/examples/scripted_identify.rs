//! Identify a scripted tag without hardware.
//!
//! Drives the full identify flow against the pulse-level mock from
//! `test_support`, the same way the unit tests do. Useful as a smoke test
//! of the protocol stack and as a usage example for the reader API.

use em4x70::prelude::*;
use em4x70::test_support::{
    encode_response_bits, header_pulses, id_bits, liw_pulses, um2_bits, ScriptedAir,
};

fn main() {
    let mut air = ScriptedAir::new();

    // Presence probe, then one listen window + header + payload per read.
    air.push_pulses(&liw_pulses());
    for field in [0x4143_5231u32, 0xC0DE_0042] {
        air.push_pulses(&liw_pulses());
        air.push_pulses(&header_pulses());
        air.push_pulses(&encode_response_bits(&id_bits(field)));
    }
    air.push_pulses(&liw_pulses());
    air.push_pulses(&header_pulses());
    air.push_pulses(&encode_response_bits(&um2_bits(0x0123_4567_89AB_CDEF)));

    let mut reader = Em4x70Reader::new(air);
    let info = reader.info(ParityMode::None).expect("scripted tag answers");

    println!("variant: {:?}", info.variant());
    println!("id:      {}", bytes_to_hex(&info.image().id()));
    println!("um1:     {}", bytes_to_hex(&info.image().um1()));
    println!("um2:     {}", bytes_to_hex(&info.image().um2()));
    println!("payload: {} bytes", info.data().len());
}
