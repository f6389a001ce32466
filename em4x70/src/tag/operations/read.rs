// em4x70-rs/em4x70/src/tag/operations/read.rs

use crate::error::Result;
use crate::protocol::air::Air;
use crate::protocol::commands::Command;
use crate::reader::Session;

/// Read the pre-programmed 32-bit ID into the image.
pub fn read_id<A: Air>(session: &mut Session<A>) -> Result<()> {
    let mut cmd = Command::ReadId.build(session.parity());
    session.transact_read(&mut cmd)?;
    let mut id = [0u8; 4];
    id.copy_from_slice(&cmd.received[..4]);
    session.tag_mut().set_id(&id);
    Ok(())
}

/// Read user memory 1 (4 bytes including the lock bits) into the image.
pub fn read_um1<A: Air>(session: &mut Session<A>) -> Result<()> {
    let mut cmd = Command::ReadUm1.build(session.parity());
    session.transact_read(&mut cmd)?;
    let mut um1 = [0u8; 4];
    um1.copy_from_slice(&cmd.received[..4]);
    session.tag_mut().set_um1(&um1);
    Ok(())
}

/// Read user memory 2 (8 bytes) into the image. V4070/EM4070 tags do not
/// answer this command.
pub fn read_um2<A: Air>(session: &mut Session<A>) -> Result<()> {
    let mut cmd = Command::ReadUm2.build(session.parity());
    session.transact_read(&mut cmd)?;
    let mut um2 = [0u8; 8];
    um2.copy_from_slice(&cmd.received[..8]);
    session.tag_mut().set_um2(&um2);
    Ok(())
}
