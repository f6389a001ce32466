// em4x70-rs/em4x70/src/protocol/commands/write.rs

use crate::constants::CMD_WRITE;
use crate::protocol::bitstream::CommandBitstream;
use crate::protocol::commands::push_command_bits;
use crate::types::ParityMode;

/// WRITE command frame.
///
/// Layout: command field (4) + address nibble (4) + address parity (1) +
/// four data nibbles each followed by their parity (20) + column parity
/// nibble (4) + stop bit 0 = 34 bits. No data comes back; the tag ACKs
/// twice instead.
///
/// The word arrives as a host u16 but goes out per the datasheet nibble
/// order, which swaps the two bytes before splitting: for little-endian
/// bytes `[b0, b1]` the wire order is `hi(b1) lo(b1) hi(b0) lo(b0)`.
pub fn build_write(word: u16, address: u8, parity: ParityMode) -> CommandBitstream {
    let mut cmd = CommandBitstream::new(CMD_WRITE, 0);
    push_command_bits(&mut cmd.send, CMD_WRITE, parity);

    let address = address & 0x0F;
    cmd.send.push_nibble(address);
    cmd.send.push_nibble_parity(address);

    let nibbles = [
        (word >> 4) as u8 & 0xF,
        word as u8 & 0xF,
        (word >> 12) as u8 & 0xF,
        (word >> 8) as u8 & 0xF,
    ];

    let column_parity = nibbles[0] ^ nibbles[1] ^ nibbles[2] ^ nibbles[3];
    for nibble in nibbles {
        cmd.send.push_nibble(nibble);
        cmd.send.push_nibble_parity(nibble);
    }

    cmd.send.push_nibble(column_parity);
    cmd.send.push_bit(0);

    cmd
}
