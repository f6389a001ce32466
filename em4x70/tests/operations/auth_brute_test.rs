#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use em4x70::error::{Error, Status};
use em4x70::reader::Em4x70Reader;
use em4x70::tag::operations::candidate_rnd;
use em4x70::test_support::{
    encode_response_bits, header_pulses, liw_pulses, AuthTagSim, ScriptedAir,
};
use em4x70::types::{KeyBlock, ParityMode};

#[test]
fn authenticate_returns_packed_grn() {
    let mut air = fixtures::air_with_tag();
    air.push_pulses(&liw_pulses());
    air.push_pulses(&header_pulses());
    let grn: u32 = 0x12345;
    let bits: Vec<u8> = (0..20).map(|i| ((grn >> (19 - i)) & 1) as u8).collect();
    air.push_pulses(&encode_response_bits(&bits));

    let mut reader = Em4x70Reader::new(air);
    let response = reader
        .authenticate(ParityMode::None, &fixtures::sample_rnd(), &fixtures::sample_frnd())
        .unwrap();
    // 20 bits left-aligned across three little-endian bytes.
    assert_eq!(response.as_bytes(), &[0x50, 0x34, 0x12]);

    let air = reader.into_inner();
    assert_eq!(air.sent_bits.len(), 97);
}

#[test]
fn failed_auth_is_soft() {
    let mut air = fixtures::air_with_tag();
    air.push_pulses(&liw_pulses());
    // No response header.
    let mut reader = Em4x70Reader::new(air);
    let err = reader
        .authenticate(ParityMode::None, &fixtures::sample_rnd(), &fixtures::sample_frnd())
        .unwrap_err();
    assert!(matches!(err, Error::HeaderNotFound));
    assert_eq!(Status::from(&err), Status::SoftFail);
}

#[test]
fn brute_force_recovers_key_word() {
    let rnd = fixtures::sample_rnd();
    let frnd = fixtures::sample_frnd();
    let secret = 0x0123u16;
    // The simulated target comes from candidate_rnd, so this test covers
    // the search loop end to end; the derivation itself is checked
    // against an independent model in the unit tests.
    let target = candidate_rnd(&rnd, KeyBlock::Word8, secret);
    let sim = AuthTagSim::new(*target.as_bytes(), vec![1; 20]);

    let mut reader = Em4x70Reader::new(sim);
    let key = reader
        .brute_force(ParityMode::None, KeyBlock::Word8, &rnd, &frnd, 0)
        .unwrap();
    assert_eq!(key.as_u16(), secret);
    assert_eq!(key.to_be_bytes(), [0x01, 0x23]);
    assert_eq!(reader.into_inner().auth_attempts, usize::from(secret) + 1);
}

#[test]
fn brute_force_abort_maps_to_aborted() {
    let mut air = ScriptedAir::new();
    air.push_pulses(&liw_pulses());
    air.abort_after = Some(0);

    let mut reader = Em4x70Reader::new(air);
    let err = reader
        .brute_force(
            ParityMode::None,
            KeyBlock::Word9,
            &fixtures::sample_rnd(),
            &fixtures::sample_frnd(),
            0,
        )
        .unwrap_err();
    assert!(matches!(err, Error::Aborted));
    assert_eq!(Status::from(&err), Status::Aborted);
}
