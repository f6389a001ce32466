// em4x70-rs/em4x70/src/hal/mock.rs

use crate::hal::traits::LfHal;

/// Carrier levels used when scripting waveforms.
pub const MOCK_LEVEL_HIGH: u8 = 200;
/// Low carrier level, clearly under the low threshold.
pub const MOCK_LEVEL_LOW: u8 = 50;
/// Neutral level between the two thresholds (no signal).
pub const MOCK_LEVEL_IDLE: u8 = 127;

/// Mock front-end for unit tests. It replays a scripted ADC waveform
/// against a virtual tick counter and records every modulation edge.
///
/// Each `now_ticks` call advances the virtual clock by one tick, so the
/// engine's busy-wait loops consume simulated time; `wait_ticks` jumps the
/// clock forward. `adc_sample` looks up the scripted level at the current
/// tick and does not advance time.
#[derive(Debug, Default)]
pub struct MockHal {
    now: u32,
    /// Scripted waveform as (level, end_tick) segments, in tick order.
    segments: Vec<(u8, u32)>,
    next_segment_start: u32,
    /// Level returned once the script runs out.
    pub idle_level: u8,
    /// Recorded modulation edges as (tick, high).
    pub modulation_events: Vec<(u32, bool)>,
    /// Number of watchdog kicks seen.
    pub watchdog_kicks: u32,
    /// Scripted button state.
    pub button: bool,
    /// Scripted host abort flag.
    pub host_abort: bool,
    /// Field state toggled by setup/teardown.
    pub field_on: bool,
}

impl MockHal {
    /// New mock with an empty script and a neutral idle level.
    pub fn new() -> Self {
        Self {
            idle_level: MOCK_LEVEL_IDLE,
            ..Default::default()
        }
    }

    /// Append a waveform segment holding `level` for `ticks` ticks.
    pub fn push_level(&mut self, level: u8, ticks: u32) {
        self.next_segment_start += ticks;
        self.segments.push((level, self.next_segment_start));
    }

    /// Append a high segment.
    pub fn push_high(&mut self, ticks: u32) {
        self.push_level(MOCK_LEVEL_HIGH, ticks);
    }

    /// Append a low segment.
    pub fn push_low(&mut self, ticks: u32) {
        self.push_level(MOCK_LEVEL_LOW, ticks);
    }

    /// Current virtual tick, without advancing it.
    pub fn current_tick(&self) -> u32 {
        self.now
    }
}

impl LfHal for MockHal {
    fn field_setup(&mut self) {
        self.field_on = true;
    }

    fn field_teardown(&mut self) {
        self.field_on = false;
    }

    fn adc_sample(&mut self) -> u8 {
        for &(level, end) in &self.segments {
            if self.now < end {
                return level;
            }
        }
        self.idle_level
    }

    fn modulation_high(&mut self) {
        self.modulation_events.push((self.now, true));
    }

    fn modulation_low(&mut self) {
        self.modulation_events.push((self.now, false));
    }

    fn now_ticks(&mut self) -> u32 {
        self.now += 1;
        self.now
    }

    fn wait_ticks(&mut self, ticks: u32) {
        self.now += ticks;
    }

    fn watchdog_kick(&mut self) {
        self.watchdog_kicks += 1;
    }

    fn button_pressed(&mut self) -> bool {
        self.button
    }

    fn host_abort_pending(&mut self) -> bool {
        self.host_abort
    }
}
