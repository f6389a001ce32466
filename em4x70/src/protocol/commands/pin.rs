// em4x70-rs/em4x70/src/protocol/commands/pin.rs

use crate::constants::CMD_PIN;
use crate::protocol::bitstream::CommandBitstream;
use crate::protocol::commands::push_command_bits;
use crate::types::ParityMode;

/// PIN command frame.
///
/// Layout: command field (4) + tag ID (32) + PIN (32) = 68 bits. The tag
/// ID travels in reverse byte order relative to the tag image (most
/// significant byte first on the wire); the PIN travels least significant
/// byte first, each byte MSB-first. After its ACK the tag re-issues the
/// 32-bit ID.
pub fn build_send_pin(tag_id: &[u8; 4], pin: u32, parity: ParityMode) -> CommandBitstream {
    let mut cmd = CommandBitstream::new(CMD_PIN, 32);
    push_command_bits(&mut cmd.send, CMD_PIN, parity);

    for i in 0..4 {
        cmd.send.push_byte(tag_id[3 - i]);
    }

    for i in 0..4 {
        cmd.send.push_byte((pin >> (i * 8)) as u8);
    }

    cmd
}
