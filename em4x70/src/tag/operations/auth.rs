// em4x70-rs/em4x70/src/tag/operations/auth.rs

use crate::error::Result;
use crate::protocol::air::Air;
use crate::protocol::commands::Command;
use crate::reader::Session;
use crate::types::{AuthResponse, Frnd, Rnd};

/// Run one challenge/response exchange. Returns the tag's 20-bit g(RN)
/// packed left-aligned into three bytes.
pub fn authenticate<A: Air>(
    session: &mut Session<A>,
    rnd: &Rnd,
    frnd: &Frnd,
) -> Result<AuthResponse> {
    let mut cmd = Command::Auth {
        rnd: *rnd,
        frnd: *frnd,
    }
    .build(session.parity());
    session.transact_read(&mut cmd)?;
    Ok(AuthResponse::from_bytes([
        cmd.received[0],
        cmd.received[1],
        cmd.received[2],
    ]))
}
