// em4x70-rs/em4x70/src/protocol/commands/auth.rs

use crate::constants::CMD_AUTH;
use crate::protocol::bitstream::CommandBitstream;
use crate::protocol::commands::push_command_bits;
use crate::types::{Frnd, ParityMode, Rnd};

/// AUTH command frame.
///
/// Layout after the RM prefix: command field (4) + N55..N0 (56) + seven
/// zero diversity bits + f(RN)27..f(RN)0 (28) = 95 bits. The tag answers
/// with a header and 20 bits of g(RN).
pub fn build_auth(rnd: &Rnd, frnd: &Frnd, parity: ParityMode) -> CommandBitstream {
    let mut cmd = CommandBitstream::new(CMD_AUTH, 20);
    push_command_bits(&mut cmd.send, CMD_AUTH, parity);

    for &b in rnd.as_bytes() {
        cmd.send.push_byte(b);
    }

    cmd.send.push_zeros(7);

    // First 24 bits of f(RN), then the top nibble of its final byte.
    let frnd = frnd.as_bytes();
    for &b in &frnd[..3] {
        cmd.send.push_byte(b);
    }
    cmd.send.push_nibble(frnd[3] >> 4);

    cmd
}
