// em4x70-rs/em4x70/src/types.rs

use crate::Error;
use std::convert::TryFrom;

/// 56-bit authentication challenge (7 bytes, sent MSB-first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rnd([u8; 7]);

impl Rnd {
    /// Wrap raw challenge bytes.
    pub fn from_bytes(bytes: [u8; 7]) -> Self {
        Self(bytes)
    }

    /// Borrow the challenge bytes.
    pub fn as_bytes(&self) -> &[u8; 7] {
        &self.0
    }

    /// Render the challenge as lowercase hex.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Rnd {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 7 {
            return Err(Error::InvalidLength {
                expected: 7,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 7];
        arr.copy_from_slice(&bytes[..7]);
        Ok(Self(arr))
    }
}

/// 28-bit reader-side cipher output f(RN), left-aligned in 4 bytes. Only
/// the top nibble of the final byte goes over the air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frnd([u8; 4]);

impl Frnd {
    /// Wrap raw f(RN) bytes.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Borrow the f(RN) bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Frnd {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 4 {
            return Err(Error::InvalidLength {
                expected: 4,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 4];
        arr.copy_from_slice(&bytes[..4]);
        Ok(Self(arr))
    }
}

/// 20-bit tag-side cipher output g(RN), packed into 3 bytes little-endian
/// with respect to transmission (the four pad bits sit in the low nibble of
/// the first byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthResponse([u8; 3]);

impl AuthResponse {
    /// Wrap packed g(RN) bytes.
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }

    /// Borrow the packed g(RN) bytes.
    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }
}

/// 96-bit crypt key as stored on the tag: six 16-bit words, little-endian
/// byte pairs, word at block address 4 first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptKey([u8; 12]);

impl CryptKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Borrow the key bytes.
    pub fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// The 16-bit word destined for block address `9 - i`, `i` in `0..6`.
    pub fn word(&self, i: usize) -> u16 {
        u16::from(self.0[2 * i + 1]) << 8 | u16::from(self.0[2 * i])
    }
}

impl TryFrom<&[u8]> for CryptKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 12 {
            return Err(Error::InvalidLength {
                expected: 12,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 12];
        arr.copy_from_slice(&bytes[..12]);
        Ok(Self(arr))
    }
}

/// 16-bit partial key recovered by the brute-force search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveredKey(u16);

impl RecoveredKey {
    /// Wrap a recovered key word.
    pub fn new(key: u16) -> Self {
        Self(key)
    }

    /// The key word.
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Host reply form: two bytes, big-endian.
    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

/// Command parity handling. EM4170 appends an even parity bit to the 3-bit
/// command; V4070/EM4070 send the command without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParityMode {
    /// No command parity bit (V4070/EM4070).
    #[default]
    None,
    /// Even parity bit over the three command bits (EM4170).
    Even,
}

impl ParityMode {
    /// True when the parity bit is appended.
    pub fn enabled(&self) -> bool {
        matches!(self, ParityMode::Even)
    }
}

/// Detected tag family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagVariant {
    /// EM4170: has UM2 and PIN support.
    Em4170,
    /// V4070/EM4070: no UM2, no PIN.
    V4070,
}

/// Key block addresses eligible for the partial-key brute force. The key
/// occupies blocks 4..=9; only the top three words can be attacked this way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBlock {
    /// Key word at block address 7 (key bits 63..48).
    Word7,
    /// Key word at block address 8 (key bits 79..64).
    Word8,
    /// Key word at block address 9 (key bits 95..80).
    Word9,
}

impl KeyBlock {
    /// The block address of this key word.
    pub fn address(&self) -> u8 {
        match self {
            KeyBlock::Word7 => 7,
            KeyBlock::Word8 => 8,
            KeyBlock::Word9 => 9,
        }
    }
}

impl TryFrom<u8> for KeyBlock {
    type Error = Error;

    fn try_from(addr: u8) -> Result<Self, Self::Error> {
        match addr {
            7 => Ok(KeyBlock::Word7),
            8 => Ok(KeyBlock::Word8),
            9 => Ok(KeyBlock::Word9),
            other => Err(Error::BadBlockAddress(other)),
        }
    }
}
