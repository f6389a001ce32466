// em4x70-rs/em4x70/src/hal/traits.rs

/// Narrow interface to the LF reader hardware.
///
/// The protocol engine only ever touches the front-end through this trait:
/// the peak-detected ADC sample register, the modulation pin, a free-running
/// 1.5 ticks/us counter, and the abort sources. Implementations exist per
/// board; [`crate::hal::mock::MockHal`] replays scripted waveforms for
/// tests.
///
/// Every wait in the engine is a busy-poll against `now_ticks`; an
/// implementation must not block or yield inside these calls, or the
/// microsecond-level RF synchronization is lost.
pub trait LfHal {
    /// Configure the front-end for LF reading: carrier divisor for
    /// 125 kHz, ADC mux on the peak-detected path, antenna settle delay,
    /// and start the tick counter with the field enabled.
    fn field_setup(&mut self);

    /// Stop the tick counter and drop the field.
    fn field_teardown(&mut self);

    /// Latest ADC sample from the peak-detected LF path.
    fn adc_sample(&mut self) -> u8;

    /// Drive the modulation pin high (drop the carrier).
    fn modulation_high(&mut self);

    /// Drive the modulation pin low (carrier present).
    fn modulation_low(&mut self);

    /// Current value of the free-running tick counter.
    fn now_ticks(&mut self) -> u32;

    /// Busy-wait for `ticks` counter ticks.
    fn wait_ticks(&mut self, ticks: u32);

    /// Pet the watchdog.
    fn watchdog_kick(&mut self);

    /// True when the hardware button is pressed.
    fn button_pressed(&mut self) -> bool;

    /// True when the host has requested an abort.
    fn host_abort_pending(&mut self) -> bool;
}
