// em4x70-rs/em4x70/src/tag/operations/info.rs

use crate::error::Result;
use crate::protocol::air::Air;
use crate::reader::Session;
use crate::tag::operations::read::{read_id, read_um1, read_um2};
use crate::tag::TagInfo;
use crate::types::TagVariant;

/// Identify the tag: read ID and UM1 (both families answer these), then
/// try UM2 to tell an EM4170 from a V4070/EM4070.
pub fn identify<A: Air>(session: &mut Session<A>) -> Result<TagInfo> {
    read_id(session)?;
    read_um1(session)?;

    // V4070 tags simply never answer UM2; any failure here means the
    // short reply form.
    let variant = match read_um2(session) {
        Ok(()) => TagVariant::Em4170,
        Err(_) => TagVariant::V4070,
    };

    Ok(TagInfo::new(*session.tag(), variant))
}
