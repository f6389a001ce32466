// em4x70-rs/em4x70/src/reader/handle.rs

use crate::error::Result;
use crate::hal::LfHal;
use crate::protocol::air::{Air, HalAir};
use crate::reader::Session;
use crate::tag::operations;
use crate::tag::{TagImage, TagInfo};
use crate::types::{AuthResponse, CryptKey, Frnd, KeyBlock, ParityMode, RecoveredKey, Rnd};

/// Handle over the air interface exposing one method per host request.
///
/// Every method powers the field, requires carrier amplitude and a listen
/// window (so a missing tag fails fast with a soft error), runs the
/// operation, and tears the field down again, on error paths included.
/// Callers serialize operations; there is no concurrent access to the
/// field.
pub struct Em4x70Reader<A: Air> {
    air: A,
}

impl<H: LfHal> Em4x70Reader<HalAir<H>> {
    /// Build a reader over a hardware front-end.
    pub fn from_hal(hal: H) -> Self {
        Self::new(HalAir::new(hal))
    }
}

impl<A: Air> Em4x70Reader<A> {
    /// Build a reader over an existing air interface. This is primarily
    /// intended for tests where a scripted interface is provided.
    pub fn new(air: A) -> Self {
        Self { air }
    }

    /// Hand the air interface back.
    pub fn into_inner(self) -> A {
        self.air
    }

    fn with_session<T>(
        &mut self,
        parity: ParityMode,
        f: impl FnOnce(&mut Session<'_, A>) -> Result<T>,
    ) -> Result<T> {
        let mut session = Session::start(&mut self.air, parity)?;
        let result = f(&mut session);
        session.finish();
        result
    }

    /// Identify the tag: ID and UM1, plus UM2 when the tag is an EM4170.
    pub fn info(&mut self, parity: ParityMode) -> Result<TagInfo> {
        self.with_session(parity, |s| operations::identify(s))
    }

    /// Write one 16-bit word to a block address, then reread the tag to
    /// return a fresh image.
    pub fn write_block(
        &mut self,
        parity: ParityMode,
        word: u16,
        address: u8,
    ) -> Result<TagImage> {
        self.with_session(parity, |s| {
            operations::write_block(s, word, address)?;
            if operations::read_id(s).is_ok() {
                let _ = operations::read_um1(s);
                let _ = operations::read_um2(s);
            }
            Ok(*s.tag())
        })
    }

    /// Unlock the tag with its PIN. Reads the ID first (the PIN frame
    /// embeds it), then refreshes the rest of the image.
    pub fn unlock(&mut self, parity: ParityMode, pin: u32) -> Result<TagImage> {
        self.with_session(parity, |s| {
            operations::read_id(s)?;
            operations::unlock_pin(s, pin)?;
            // The ID cannot have changed; pick up what the unlock exposes.
            let _ = operations::read_um1(s);
            let _ = operations::read_um2(s);
            Ok(*s.tag())
        })
    }

    /// Run one challenge/response authentication.
    pub fn authenticate(
        &mut self,
        parity: ParityMode,
        rnd: &Rnd,
        frnd: &Frnd,
    ) -> Result<AuthResponse> {
        self.with_session(parity, |s| operations::authenticate(s, rnd, frnd))
    }

    /// Brute-force the 16-bit key word at block 7, 8 or 9 against a
    /// captured challenge pair.
    pub fn brute_force(
        &mut self,
        parity: ParityMode,
        block: KeyBlock,
        rnd: &Rnd,
        frnd: &Frnd,
        start_key: u16,
    ) -> Result<RecoveredKey> {
        self.with_session(parity, |s| {
            operations::brute_force(s, block, rnd, frnd, start_key)
        })
    }

    /// Program and confirm a new PIN.
    pub fn set_pin(&mut self, parity: ParityMode, pin: u32) -> Result<TagImage> {
        self.with_session(parity, |s| {
            operations::read_id(s)?;
            operations::write_pin(s, pin)?;
            let _ = operations::read_um1(s);
            let _ = operations::read_um2(s);
            Ok(*s.tag())
        })
    }

    /// Program a new 96-bit crypt key.
    pub fn set_key(&mut self, parity: ParityMode, key: &CryptKey) -> Result<TagImage> {
        self.with_session(parity, |s| {
            operations::read_id(s)?;
            operations::write_key(s, key)?;
            Ok(*s.tag())
        })
    }
}
