// em4x70-rs/em4x70/src/protocol/air.rs

//! Carrier-level primitives: signal discrimination, pulse length
//! measurement, and single-bit modulation.
//!
//! [`Air`] is the seam between the bit-level protocol and the sampled
//! carrier. The real implementation, [`HalAir`], busy-polls the tick
//! counter and ADC through [`LfHal`]; tests substitute
//! [`crate::test_support::ScriptedAir`] to inject pulse trains directly.

use crate::constants::{
    HIGH_SIGNAL_THRESHOLD, LOW_SIGNAL_THRESHOLD, SIGNAL_DETECT_PERIODS, T_BITMOD, T_FULL_PERIOD,
    T_HALF_PERIOD, T_PULSE_TIMEOUT, T_TOLERANCE,
};
use crate::hal::LfHal;

/// Edge polarity for pulse measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Measure rising-edge-to-rising-edge intervals.
    Rising,
    /// Measure falling-edge-to-falling-edge intervals.
    Falling,
}

impl Edge {
    /// The opposite polarity.
    pub fn flip(self) -> Self {
        match self {
            Edge::Rising => Edge::Falling,
            Edge::Falling => Edge::Rising,
        }
    }
}

/// True when a sample is unambiguously above the carrier midpoint.
pub fn is_high(sample: u8) -> bool {
    sample > HIGH_SIGNAL_THRESHOLD
}

/// True when a sample is unambiguously below the carrier midpoint.
pub fn is_low(sample: u8) -> bool {
    sample < LOW_SIGNAL_THRESHOLD
}

/// Does a measured pulse length match `target` within the chip tolerance?
///
/// A zero length (timeout) never matches: the smallest target is a full
/// bit period, well above the tolerance band.
pub fn check_pulse_length(length: u32, target: u32) -> bool {
    length >= target.saturating_sub(T_TOLERANCE) && length <= target + T_TOLERANCE
}

/// Operations the protocol engine needs from the air interface.
pub trait Air {
    /// Bring the field up and make the sampler ready.
    fn setup(&mut self);

    /// Drop the field and stop the timers.
    fn teardown(&mut self);

    /// Watch the carrier for an amplitude above the high threshold,
    /// sampling about twice per bit period for up to
    /// [`SIGNAL_DETECT_PERIODS`] periods.
    fn detect_signal(&mut self) -> bool;

    /// Measure one edge-to-edge pulse of the given polarity, in ticks.
    /// Returns 0 if any edge wait exceeds [`T_PULSE_TIMEOUT`].
    fn pulse(&mut self, edge: Edge) -> u32;

    /// Emit one logical bit over exactly one full bit period.
    fn send_bit(&mut self, bit: u8);

    /// Busy-wait for `ticks`.
    fn wait_ticks(&mut self, ticks: u32);

    /// Current tick counter value, for trace timestamps.
    fn now_ticks(&mut self) -> u32;

    /// Pet the watchdog during long-running loops.
    fn watchdog_kick(&mut self);

    /// True when the button or the host asks to stop.
    fn abort_requested(&mut self) -> bool;
}

/// [`Air`] implementation over a hardware front-end.
pub struct HalAir<H: LfHal> {
    hal: H,
}

impl<H: LfHal> HalAir<H> {
    /// Wrap a front-end.
    pub fn new(hal: H) -> Self {
        Self { hal }
    }

    /// Hand the front-end back.
    pub fn into_inner(self) -> H {
        self.hal
    }

    /// Borrow the wrapped front-end.
    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    /// Spin until the sampled signal satisfies `done`, bounded by the
    /// shared pulse deadline. Returns false on timeout.
    fn wait_for(&mut self, start: u32, done: fn(u8) -> bool) -> bool {
        loop {
            if done(self.hal.adc_sample()) {
                return true;
            }
            if self.hal.now_ticks().wrapping_sub(start) > T_PULSE_TIMEOUT {
                return false;
            }
        }
    }

    fn rising_pulse(&mut self) -> u32 {
        let entry = self.hal.now_ticks();
        if !self.wait_for(entry, is_high) {
            return 0;
        }
        let start = self.hal.now_ticks();
        if !self.wait_for(entry, is_low) {
            return 0;
        }
        if !self.wait_for(entry, is_high) {
            return 0;
        }
        self.hal.now_ticks().wrapping_sub(start)
    }

    fn falling_pulse(&mut self) -> u32 {
        let entry = self.hal.now_ticks();
        if !self.wait_for(entry, is_low) {
            return 0;
        }
        let start = self.hal.now_ticks();
        if !self.wait_for(entry, is_high) {
            return 0;
        }
        if !self.wait_for(entry, is_low) {
            return 0;
        }
        self.hal.now_ticks().wrapping_sub(start)
    }

    /// Hold the current modulation state until `elapsed` ticks have passed
    /// since `start`.
    fn hold_until(&mut self, start: u32, elapsed: u32) {
        while self.hal.now_ticks().wrapping_sub(start) <= elapsed {}
    }
}

impl<H: LfHal> Air for HalAir<H> {
    fn setup(&mut self) {
        self.hal.field_setup();
        self.hal.watchdog_kick();
    }

    fn teardown(&mut self) {
        self.hal.field_teardown();
    }

    fn detect_signal(&mut self) -> bool {
        // About two samples per bit period.
        for _ in 0..(2 * SIGNAL_DETECT_PERIODS) {
            self.hal.wait_ticks(T_HALF_PERIOD);
            if self.hal.adc_sample() > HIGH_SIGNAL_THRESHOLD {
                return true;
            }
        }
        false
    }

    fn pulse(&mut self, edge: Edge) -> u32 {
        match edge {
            Edge::Rising => self.rising_pulse(),
            Edge::Falling => self.falling_pulse(),
        }
    }

    // The only place that toggles modulation when sending. Timing
    // sensitive: busy-waits only, no allocation.
    fn send_bit(&mut self, bit: u8) {
        let start = self.hal.now_ticks();
        if bit == 0 {
            // Notch in the first quarter, field gap in the second half.
            self.hal.modulation_low();
            self.hold_until(start, T_BITMOD);
            self.hal.modulation_high();
            self.hold_until(start, T_HALF_PERIOD);
            self.hal.modulation_low();
            self.hold_until(start, T_FULL_PERIOD);
        } else {
            // A 1 keeps the field present for the whole period.
            self.hal.modulation_low();
            self.hold_until(start, T_FULL_PERIOD);
        }
    }

    fn wait_ticks(&mut self, ticks: u32) {
        self.hal.wait_ticks(ticks);
    }

    fn now_ticks(&mut self) -> u32 {
        self.hal.now_ticks()
    }

    fn watchdog_kick(&mut self) {
        self.hal.watchdog_kick();
    }

    fn abort_requested(&mut self) -> bool {
        self.hal.button_pressed() || self.hal.host_abort_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::mock::{MockHal, MOCK_LEVEL_IDLE};

    #[test]
    fn thresholds() {
        assert!(is_high(141));
        assert!(!is_high(140));
        assert!(is_low(113));
        assert!(!is_low(114));
        assert!(!is_high(MOCK_LEVEL_IDLE));
        assert!(!is_low(MOCK_LEVEL_IDLE));
    }

    #[test]
    fn pulse_length_tolerance_band() {
        assert!(check_pulse_length(T_FULL_PERIOD, T_FULL_PERIOD));
        assert!(check_pulse_length(T_FULL_PERIOD - T_TOLERANCE, T_FULL_PERIOD));
        assert!(check_pulse_length(T_FULL_PERIOD + T_TOLERANCE, T_FULL_PERIOD));
        assert!(!check_pulse_length(
            T_FULL_PERIOD - T_TOLERANCE - 1,
            T_FULL_PERIOD
        ));
        assert!(!check_pulse_length(0, T_FULL_PERIOD));
    }

    #[test]
    fn rising_pulse_measures_edge_to_edge() {
        let mut hal = MockHal::new();
        // Lead-in low, then one full high/low cycle and the next rising
        // edge: the measured interval is high + low.
        hal.push_low(100);
        hal.push_high(200);
        hal.push_low(184);
        hal.push_high(400);

        let mut air = HalAir::new(hal);
        let len = air.pulse(Edge::Rising);
        // 200 high + 184 low = 384 ticks, give or take polling granularity.
        assert!(check_pulse_length(len, T_FULL_PERIOD), "len = {}", len);
    }

    #[test]
    fn falling_pulse_measures_edge_to_edge() {
        let mut hal = MockHal::new();
        hal.push_high(100);
        hal.push_low(300);
        hal.push_high(468);
        hal.push_low(400);

        let mut air = HalAir::new(hal);
        let len = air.pulse(Edge::Falling);
        // 300 low + 468 high = 768 = two full periods.
        assert!(check_pulse_length(len, 2 * T_FULL_PERIOD), "len = {}", len);
    }

    #[test]
    fn stuck_signal_times_out() {
        let mut hal = MockHal::new();
        hal.push_high(10 * T_FULL_PERIOD);
        let mut air = HalAir::new(hal);
        assert_eq!(air.pulse(Edge::Rising), 0);
    }

    #[test]
    fn idle_signal_times_out() {
        // A neutral carrier is neither high nor low, so no edge ever
        // arrives.
        let mut air = HalAir::new(MockHal::new());
        assert_eq!(air.pulse(Edge::Rising), 0);
        assert_eq!(air.pulse(Edge::Falling), 0);
    }

    #[test]
    fn send_bit_zero_sequence() {
        let mut air = HalAir::new(MockHal::new());
        air.send_bit(0);
        let events = &air.hal_mut().modulation_events;
        assert_eq!(events.len(), 3);
        let (t0, l0) = events[0];
        assert!(!l0);
        // Notch raised at the quarter mark, dropped at the half.
        let (t1, l1) = events[1];
        assert!(l1);
        assert!(t1 - t0 >= T_BITMOD && t1 - t0 <= T_BITMOD + 4);
        let (t2, l2) = events[2];
        assert!(!l2);
        assert!(t2 - t0 >= T_HALF_PERIOD && t2 - t0 <= T_HALF_PERIOD + 4);
    }

    #[test]
    fn send_bit_one_holds_field() {
        let mut air = HalAir::new(MockHal::new());
        let start = air.now_ticks();
        air.send_bit(1);
        let end = air.now_ticks();
        assert_eq!(air.hal_mut().modulation_events.len(), 1);
        assert!(!air.hal_mut().modulation_events[0].1);
        let span = end - start;
        assert!(span >= T_FULL_PERIOD && span <= T_FULL_PERIOD + 8, "span = {}", span);
    }

    #[test]
    fn detect_signal_requires_amplitude() {
        let mut air = HalAir::new(MockHal::new());
        assert!(!air.detect_signal());

        let mut hal = MockHal::new();
        hal.push_level(MOCK_LEVEL_IDLE, 5 * T_FULL_PERIOD);
        hal.push_high(4 * T_FULL_PERIOD);
        let mut air = HalAir::new(hal);
        assert!(air.detect_signal());
    }
}
