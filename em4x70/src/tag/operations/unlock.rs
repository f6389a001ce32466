// em4x70-rs/em4x70/src/tag/operations/unlock.rs

use crate::error::Result;
use crate::protocol::air::Air;
use crate::protocol::commands::Command;
use crate::reader::Session;

/// Send the unlock PIN.
///
/// The PIN frame embeds the tag ID, so the image must hold a freshly read
/// ID before calling this. After the ACK and the EEPROM write time the tag
/// re-issues its ID, which is stored back into the image. Whether the tag
/// answers differently when it was already unlocked is unknown; the
/// response is treated purely as the re-issued ID.
pub fn unlock_pin<A: Air>(session: &mut Session<A>, pin: u32) -> Result<()> {
    let mut cmd = Command::SendPin {
        tag_id: session.tag().id(),
        pin,
    }
    .build(session.parity());
    session.transact_pin(&mut cmd)?;

    let mut id = [0u8; 4];
    id.copy_from_slice(&cmd.received[..4]);
    session.tag_mut().set_id(&id);
    Ok(())
}
