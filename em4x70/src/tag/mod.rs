// em4x70-rs/em4x70/src/tag/mod.rs

//! In-memory image of the tag under the field, plus the high-level
//! operations that refresh it.

pub mod operations;

use crate::types::TagVariant;

/// Size of the tag EEPROM image in bytes (sixteen 16-bit words).
pub const TAG_IMAGE_BYTES: usize = 32;

/// Byte-indexed image of the tag memory.
///
/// Layout: UM1 in `[0..4]` (the two lock bits occupy the most significant
/// bits), ID in `[4..8]`, the 96-bit crypt key in `[8..20]` (block
/// addresses 4..=9), the PIN in `[20..24]` (words 10 and 11), UM2 in
/// `[24..32]`. All multi-byte regions are little-endian with respect to
/// the tag's transmission order.
///
/// A region is only overwritten after a complete successful receive; on
/// any failure it keeps its previous content (zero after the per-operation
/// reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagImage {
    data: [u8; TAG_IMAGE_BYTES],
}

impl Default for TagImage {
    fn default() -> Self {
        Self {
            data: [0; TAG_IMAGE_BYTES],
        }
    }
}

impl TagImage {
    /// Zeroed image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the whole image.
    pub fn reset(&mut self) {
        self.data = [0; TAG_IMAGE_BYTES];
    }

    /// The full 32-byte image.
    pub fn as_bytes(&self) -> &[u8; TAG_IMAGE_BYTES] {
        &self.data
    }

    /// User memory 1, lock bits included.
    pub fn um1(&self) -> [u8; 4] {
        self.region(0)
    }

    /// The 32-bit tag ID, little-endian bytes.
    pub fn id(&self) -> [u8; 4] {
        self.region(4)
    }

    /// User memory 2 (EM4170 only).
    pub fn um2(&self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out.copy_from_slice(&self.data[24..32]);
        out
    }

    fn region(&self, start: usize) -> [u8; 4] {
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.data[start..start + 4]);
        out
    }

    pub(crate) fn set_um1(&mut self, bytes: &[u8; 4]) {
        self.data[0..4].copy_from_slice(bytes);
    }

    pub(crate) fn set_id(&mut self, bytes: &[u8; 4]) {
        self.data[4..8].copy_from_slice(bytes);
    }

    pub(crate) fn set_um2(&mut self, bytes: &[u8; 8]) {
        self.data[24..32].copy_from_slice(bytes);
    }
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy)]
pub struct TagInfo {
    image: TagImage,
    variant: TagVariant,
}

impl TagInfo {
    pub(crate) fn new(image: TagImage, variant: TagVariant) -> Self {
        Self { image, variant }
    }

    /// The refreshed tag image.
    pub fn image(&self) -> &TagImage {
        &self.image
    }

    /// Which tag family answered.
    pub fn variant(&self) -> TagVariant {
        self.variant
    }

    /// The host reply payload: the full 32 bytes for an EM4170, the first
    /// 20 bytes (UM1, ID and key region) for a V4070 without UM2.
    pub fn data(&self) -> &[u8] {
        match self.variant {
            TagVariant::Em4170 => &self.image.data[..],
            TagVariant::V4070 => &self.image.data[..20],
        }
    }
}
