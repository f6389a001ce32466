#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use em4x70::error::{Error, Status};
use em4x70::reader::Em4x70Reader;
use em4x70::test_support::ScriptedAir;
use em4x70::types::{ParityMode, TagVariant};

#[test]
fn info_reads_full_em4170_image() {
    let mut air = fixtures::air_with_tag();
    fixtures::push_word_read(&mut air, 0x1234_5678); // ID
    fixtures::push_word_read(&mut air, 0xC0DE_0042); // UM1
    fixtures::push_um2_read(&mut air, 0x0011_2233_4455_6677);

    let mut reader = Em4x70Reader::new(air);
    let info = reader.info(ParityMode::None).unwrap();

    assert_eq!(info.variant(), TagVariant::Em4170);
    assert_eq!(info.data().len(), 32);
    assert_eq!(info.image().id(), [0x78, 0x56, 0x34, 0x12]);
    assert_eq!(info.image().um1(), [0x42, 0x00, 0xDE, 0xC0]);
    assert_eq!(
        info.image().um2(),
        [0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11, 0x00]
    );
    assert_eq!(Status::from(&Ok::<_, Error>(())), Status::Success);
}

#[test]
fn info_short_reply_for_v4070() {
    let mut air = fixtures::air_with_tag();
    fixtures::push_word_read(&mut air, 0x1234_5678);
    fixtures::push_word_read(&mut air, 0xC0DE_0042);
    // No UM2 answer scripted.

    let mut reader = Em4x70Reader::new(air);
    let info = reader.info(ParityMode::None).unwrap();
    assert_eq!(info.variant(), TagVariant::V4070);
    assert_eq!(info.data().len(), 20);
}

#[test]
fn info_with_command_parity_sends_parity_bits() {
    let mut air = fixtures::air_with_tag();
    fixtures::push_word_read(&mut air, 0x1234_5678);

    let mut reader = Em4x70Reader::new(air);
    // UM1 never answers, so the whole operation fails, but the ID frame
    // already shows the parity form on the wire.
    let _ = reader.info(ParityMode::Even);
    let air = reader.into_inner();
    // RM + 0b0011 (ID with its parity bit).
    assert_eq!(&air.sent_bits[..6], &[0, 0, 0, 0, 1, 1]);
}

#[test]
fn missing_tag_maps_to_soft_fail() {
    let air = ScriptedAir::new(); // signal, but no listen window
    let mut reader = Em4x70Reader::new(air);
    let result = reader.info(ParityMode::None);
    assert!(matches!(result, Err(Error::NoListenWindow)));
    assert_eq!(Status::from(&result.unwrap_err()), Status::SoftFail);
}

#[test]
fn dead_field_maps_to_soft_fail() {
    let mut air = ScriptedAir::new();
    air.signal_present = false;
    let mut reader = Em4x70Reader::new(air);
    let err = reader.info(ParityMode::None).unwrap_err();
    assert!(matches!(err, Error::NoSignal));
    assert_eq!(Status::from(&err), Status::SoftFail);
}
