// em4x70-rs/em4x70/src/reader/session.rs

use crate::error::{Error, Result};
use crate::protocol::air::Air;
use crate::protocol::bitstream::CommandBitstream;
use crate::protocol::exchange;
use crate::protocol::liw::find_listen_window;
use crate::protocol::tracelog::TransactionLog;
use crate::tag::TagImage;
use crate::types::ParityMode;

/// State threaded through one top-level operation: the powered field, the
/// parity mode chosen by the caller, the tag image being refreshed, and
/// the transaction trace slot.
///
/// A session is created by [`crate::reader::Em4x70Reader`] per operation
/// and consumed when the field is torn down; the parity mode is fixed for
/// its whole lifetime.
#[derive(Debug)]
pub struct Session<'a, A: Air> {
    air: &'a mut A,
    parity: ParityMode,
    tag: TagImage,
    log: TransactionLog,
}

impl<'a, A: Air> Session<'a, A> {
    /// Power the field, wait for signal, and confirm a tag is present by
    /// spotting a listen window. Tears the field down again on failure.
    pub(crate) fn start(air: &'a mut A, parity: ParityMode) -> Result<Self> {
        air.setup();

        if !air.detect_signal() {
            air.teardown();
            return Err(Error::NoSignal);
        }

        let mut session = Self {
            air,
            parity,
            tag: TagImage::new(),
            log: TransactionLog::default(),
        };

        if !find_listen_window(session.air, false, &mut session.log) {
            session.air.teardown();
            return Err(Error::NoListenWindow);
        }

        Ok(session)
    }

    /// Tear the field down.
    pub(crate) fn finish(self) {
        self.air.teardown();
    }

    /// The parity mode for this session.
    pub fn parity(&self) -> ParityMode {
        self.parity
    }

    /// The tag image refreshed so far.
    pub fn tag(&self) -> &TagImage {
        &self.tag
    }

    pub(crate) fn tag_mut(&mut self) -> &mut TagImage {
        &mut self.tag
    }

    /// Run a send-and-read transaction and dump its trace.
    pub(crate) fn transact_read(&mut self, cmd: &mut CommandBitstream) -> Result<()> {
        let result = exchange::send_and_read(&mut *self.air, cmd, &mut self.log);
        self.log.dump();
        result
    }

    /// Run a send-and-ack transaction (WRITE) and dump its trace.
    pub(crate) fn transact_write(&mut self, cmd: &CommandBitstream) -> Result<()> {
        let result = exchange::send_and_ack(&mut *self.air, cmd, &mut self.log);
        self.log.dump();
        result
    }

    /// Run a send-wait-read transaction (PIN) and dump its trace.
    pub(crate) fn transact_pin(&mut self, cmd: &mut CommandBitstream) -> Result<()> {
        let result = exchange::send_wait_read(&mut *self.air, cmd, &mut self.log);
        self.log.dump();
        result
    }

    pub(crate) fn watchdog_kick(&mut self) {
        self.air.watchdog_kick();
    }

    pub(crate) fn abort_requested(&mut self) -> bool {
        self.air.abort_requested()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{liw_pulses, ScriptedAir};

    #[test]
    fn start_fails_without_signal() {
        let mut air = ScriptedAir::new();
        air.signal_present = false;
        let err = Session::start(&mut air, ParityMode::None).unwrap_err();
        assert!(matches!(err, Error::NoSignal));
        assert_eq!(air.teardowns, 1);
    }

    #[test]
    fn start_fails_without_listen_window() {
        let mut air = ScriptedAir::new();
        // Signal present but no pulses scripted: the probe finds nothing.
        let err = Session::start(&mut air, ParityMode::None).unwrap_err();
        assert!(matches!(err, Error::NoListenWindow));
        assert_eq!(air.teardowns, 1);
    }

    #[test]
    fn start_confirms_tag_and_keeps_field_up() {
        let mut air = ScriptedAir::new();
        air.push_pulses(&liw_pulses());
        let session = Session::start(&mut air, ParityMode::Even).unwrap();
        assert!(session.parity().enabled());
        assert_eq!(session.tag().as_bytes(), &[0; 32]);
        session.finish();
        assert_eq!(air.setups, 1);
        assert_eq!(air.teardowns, 1);
        // The presence probe must not have armed the tag.
        assert!(air.sent_bits.is_empty());
    }
}
