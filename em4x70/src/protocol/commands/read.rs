// em4x70-rs/em4x70/src/protocol/commands/read.rs

use crate::constants::{CMD_ID, CMD_UM1, CMD_UM2};
use crate::protocol::bitstream::CommandBitstream;
use crate::protocol::commands::push_command_bits;
use crate::types::ParityMode;

fn build_read(code: u8, receive_bitcount: u8, parity: ParityMode) -> CommandBitstream {
    let mut cmd = CommandBitstream::new(code, receive_bitcount);
    push_command_bits(&mut cmd.send, code, parity);
    cmd
}

/// ID command: 4 send bits, the tag answers with its 32-bit ID.
pub fn build_read_id(parity: ParityMode) -> CommandBitstream {
    build_read(CMD_ID, 32, parity)
}

/// UM1 command: 4 send bits, the tag answers with the two lock bits and
/// 30 bits of user memory 1.
pub fn build_read_um1(parity: ParityMode) -> CommandBitstream {
    build_read(CMD_UM1, 32, parity)
}

/// UM2 command: 4 send bits, the tag answers with 64 bits of user
/// memory 2. V4070/EM4070 tags do not implement it.
pub fn build_read_um2(parity: ParityMode) -> CommandBitstream {
    build_read(CMD_UM2, 64, parity)
}
