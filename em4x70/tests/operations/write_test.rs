#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use em4x70::error::Error;
use em4x70::reader::Em4x70Reader;
use em4x70::types::{CryptKey, ParityMode};

#[test]
fn write_word_and_reread_image() {
    let mut air = fixtures::air_with_tag();
    fixtures::push_acked_write(&mut air);
    fixtures::push_word_read(&mut air, 0x1234_5678); // ID
    fixtures::push_word_read(&mut air, 0xAABB_CCDD); // UM1
    fixtures::push_um2_read(&mut air, 0x0102_0304_0506_0708);

    let mut reader = Em4x70Reader::new(air);
    let image = reader.write_block(ParityMode::None, 0xBEEF, 9).unwrap();
    assert_eq!(image.id(), [0x78, 0x56, 0x34, 0x12]);

    let air = reader.into_inner();
    // First frame: RM(2) + WRITE(34). Verify the address nibble.
    let addr = air.sent_bits[6..10].iter().fold(0u8, |a, &b| a << 1 | b);
    assert_eq!(addr, 9);
}

#[test]
fn write_without_second_ack_fails() {
    let mut air = fixtures::air_with_tag();
    air.push_pulses(&em4x70::test_support::liw_pulses());
    air.push_pulses(&em4x70::test_support::ack_pulses());
    // Silence where the post-EEPROM ACK should be.

    let mut reader = Em4x70Reader::new(air);
    let err = reader.write_block(ParityMode::None, 0xBEEF, 9).unwrap_err();
    assert!(matches!(err, Error::Nak));
}

#[test]
fn write_to_invalid_block_never_touches_the_air() {
    let mut air = fixtures::air_with_tag();
    let mut reader = Em4x70Reader::new(air);
    let err = reader.write_block(ParityMode::None, 0x1234, 16).unwrap_err();
    assert!(matches!(err, Error::BadBlockAddress(16)));
    air = reader.into_inner();
    assert!(air.sent_bits.is_empty());
}

#[test]
fn set_key_writes_six_descending_words() {
    let mut air = fixtures::air_with_tag();
    fixtures::push_word_read(&mut air, 0x1234_5678); // ID gate
    for _ in 0..6 {
        fixtures::push_acked_write(&mut air);
    }

    let key = CryptKey::from_bytes([
        0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC,
    ]);
    let mut reader = Em4x70Reader::new(air);
    reader.set_key(ParityMode::None, &key).unwrap();

    let air = reader.into_inner();
    // ID frame: RM + 4 bits; then six write frames of RM + 34 bits.
    let write_bits = &air.sent_bits[6..];
    assert_eq!(write_bits.len(), 6 * 36);
    for (i, frame) in write_bits.chunks(36).enumerate() {
        let addr = frame[6..10].iter().fold(0u8, |a, &b| a << 1 | b);
        assert_eq!(addr as usize, 9 - i);
    }
}

#[test]
fn set_pin_programs_both_words_then_unlocks() {
    let mut air = fixtures::air_with_tag();
    fixtures::push_word_read(&mut air, 0x1234_5678); // ID gate
    fixtures::push_acked_write(&mut air); // word 11
    fixtures::push_acked_write(&mut air); // word 10
    // Confirmation PIN exchange: ACK, then the re-issued ID.
    air.push_pulses(&em4x70::test_support::liw_pulses());
    air.push_pulses(&em4x70::test_support::ack_pulses());
    air.push_pulses(&em4x70::test_support::header_pulses());
    air.push_pulses(&em4x70::test_support::encode_response_bits(
        &em4x70::test_support::id_bits(0x1234_5678),
    ));
    // UM1/UM2 refresh is best-effort; leave them unanswered.

    let mut reader = Em4x70Reader::new(air);
    let image = reader.set_pin(ParityMode::None, 0xAABB_CCDD).unwrap();
    assert_eq!(image.id(), [0x78, 0x56, 0x34, 0x12]);

    let air = reader.into_inner();
    let frames = &air.sent_bits[6..]; // skip the ID frame
    let addr_of = |frame: &[u8]| frame[6..10].iter().fold(0u8, |a, &b| a << 1 | b);
    assert_eq!(addr_of(&frames[..36]), 11);
    assert_eq!(addr_of(&frames[36..72]), 10);
}
