// em4x70-rs/em4x70/src/test_support.rs

//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize mock air-interface setup so tests across the
//! crate can inject pulse trains instead of raw waveforms: a scripted
//! queue for fixed scenarios, a small tag simulator for the brute-force
//! loop, and encoders that turn bit sequences into the pulse lengths the
//! demodulator expects.
#![allow(dead_code)]

use std::collections::VecDeque;

use crate::constants::{T_FULL_PERIOD, T_HALF_PERIOD};
use crate::protocol::air::{Air, Edge};

/// The idle listen-window signature as pulse lengths: two rising pulses
/// of 2.5 bit periods, one falling of 3 and one falling of 2.
pub fn liw_pulses() -> Vec<u32> {
    vec![
        2 * T_FULL_PERIOD + T_HALF_PERIOD,
        2 * T_FULL_PERIOD + T_HALF_PERIOD,
        3 * T_FULL_PERIOD,
        2 * T_FULL_PERIOD,
    ]
}

/// Tail of the response header as seen by the pulse scanner: a few
/// one-period pulses from the ones preamble, the 1.5-period one-to-zero
/// transition, then the three remaining zero pulses.
pub fn header_pulses() -> Vec<u32> {
    vec![
        T_FULL_PERIOD,
        T_FULL_PERIOD,
        T_FULL_PERIOD,
        3 * T_HALF_PERIOD,
        T_FULL_PERIOD,
        T_FULL_PERIOD,
        T_FULL_PERIOD,
    ]
}

/// An ACK: two falling pulses of two bit periods each.
pub fn ack_pulses() -> Vec<u32> {
    vec![2 * T_FULL_PERIOD, 2 * T_FULL_PERIOD]
}

/// Encode data bits into the pulse lengths the tag's Manchester coding
/// produces after the header, mirroring the demodulator's polarity
/// tracking: starting on the rising polarity, a bit equal to the
/// polarity's value is one period; a pair of equal opposite bits is 1.5
/// periods and flips the polarity; an opposite-then-equal pair is two
/// periods.
pub fn encode_response_bits(bits: &[u8]) -> Vec<u32> {
    let mut pulses = Vec::new();
    let mut edge = Edge::Rising;
    let mut i = 0;
    while i < bits.len() {
        let single = match edge {
            Edge::Rising => 0,
            Edge::Falling => 1,
        };
        if bits[i] == single {
            pulses.push(T_FULL_PERIOD);
            i += 1;
        } else if i + 1 < bits.len() && bits[i + 1] == bits[i] {
            pulses.push(3 * T_HALF_PERIOD);
            edge = edge.flip();
            i += 2;
        } else if i + 1 < bits.len() {
            pulses.push(2 * T_FULL_PERIOD);
            i += 2;
        } else {
            // Lone trailing bit of the opposite value: a 1.5-period pulse
            // carries it (the decoder drops the echoed second bit at
            // capacity).
            pulses.push(3 * T_HALF_PERIOD);
            edge = edge.flip();
            i += 1;
        }
    }
    pulses
}

/// A 32-bit field as transmission-order bits, most significant first.
pub fn id_bits(value: u32) -> Vec<u8> {
    (0..32).map(|i| ((value >> (31 - i)) & 1) as u8).collect()
}

/// A 64-bit field as transmission-order bits, most significant first.
pub fn um2_bits(value: u64) -> Vec<u8> {
    (0..64).map(|i| ((value >> (63 - i)) & 1) as u8).collect()
}

/// Collapse one-bit-per-byte values into bytes, most significant bit
/// first. The length must be a multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    assert_eq!(bits.len() % 8, 0);
    bits.chunks(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &b| acc << 1 | (b & 1)))
        .collect()
}

/// Scripted air interface: pulses are served from a queue (an empty queue
/// reads as a timeout), sent bits and waits are recorded for assertions.
#[derive(Debug, Default)]
pub struct ScriptedAir {
    pulses: VecDeque<u32>,
    /// Every bit clocked out, RM prefix included.
    pub sent_bits: Vec<u8>,
    /// Every `wait_ticks` argument, in call order.
    pub waits: Vec<u32>,
    /// Number of pulse measurements taken.
    pub pulse_reads: usize,
    /// Whether `detect_signal` reports a carrier.
    pub signal_present: bool,
    /// Number of `setup` calls.
    pub setups: usize,
    /// Number of `teardown` calls.
    pub teardowns: usize,
    /// Number of watchdog kicks.
    pub watchdog_kicks: usize,
    /// When set, `abort_requested` turns true after this many polls.
    pub abort_after: Option<usize>,
    abort_polls: usize,
    now: u32,
}

impl ScriptedAir {
    /// New scripted interface with signal present and nothing queued.
    pub fn new() -> Self {
        Self {
            signal_present: true,
            ..Default::default()
        }
    }

    /// Queue pulse lengths to serve in order.
    pub fn push_pulses(&mut self, pulses: &[u32]) {
        self.pulses.extend(pulses.iter().copied());
    }

    /// Pulses still queued.
    pub fn remaining_pulses(&self) -> usize {
        self.pulses.len()
    }
}

impl Air for ScriptedAir {
    fn setup(&mut self) {
        self.setups += 1;
    }

    fn teardown(&mut self) {
        self.teardowns += 1;
    }

    fn detect_signal(&mut self) -> bool {
        self.signal_present
    }

    fn pulse(&mut self, _edge: Edge) -> u32 {
        self.pulse_reads += 1;
        self.pulses.pop_front().unwrap_or(0)
    }

    fn send_bit(&mut self, bit: u8) {
        self.sent_bits.push(bit & 1);
        self.now = self.now.wrapping_add(T_FULL_PERIOD);
    }

    fn wait_ticks(&mut self, ticks: u32) {
        self.waits.push(ticks);
        self.now = self.now.wrapping_add(ticks);
    }

    fn now_ticks(&mut self) -> u32 {
        self.now = self.now.wrapping_add(1);
        self.now
    }

    fn watchdog_kick(&mut self) {
        self.watchdog_kicks += 1;
    }

    fn abort_requested(&mut self) -> bool {
        self.abort_polls += 1;
        match self.abort_after {
            Some(n) => self.abort_polls > n,
            None => false,
        }
    }
}

/// Minimal tag model for exercising the authentication loop: it idles in
/// listen windows, collects the bits the reader clocks out, and answers
/// an AUTH frame with g(RN) only when the challenge matches its target.
///
/// A mismatched challenge is answered with silence, which the reader sees
/// as a missing response header.
#[derive(Debug)]
pub struct AuthTagSim {
    target_rnd: [u8; 7],
    grn_bits: Vec<u8>,
    frame: Vec<u8>,
    liw_idx: usize,
    response: VecDeque<u32>,
    misses_left: u32,
    /// Completed AUTH frames observed, matching or not.
    pub auth_attempts: usize,
    now: u32,
}

// RM prefix + command field + 56-bit challenge + 7 diversity bits +
// 28-bit f(RN).
const AUTH_FRAME_BITS: usize = 2 + 95;

impl AuthTagSim {
    /// Simulate a tag that accepts exactly `target_rnd` and answers with
    /// the 20 `grn_bits`.
    pub fn new(target_rnd: [u8; 7], grn_bits: Vec<u8>) -> Self {
        assert_eq!(grn_bits.len(), 20);
        Self {
            target_rnd,
            grn_bits,
            frame: Vec::new(),
            liw_idx: 0,
            response: VecDeque::new(),
            misses_left: 0,
            auth_attempts: 0,
            now: 0,
        }
    }

    fn challenge_in_frame(&self) -> [u8; 7] {
        let mut rnd = [0u8; 7];
        for (i, byte) in rnd.iter_mut().enumerate() {
            *byte = self.frame[6 + 8 * i..14 + 8 * i]
                .iter()
                .fold(0u8, |acc, &b| acc << 1 | (b & 1));
        }
        rnd
    }

    fn finish_frame(&mut self) {
        self.auth_attempts += 1;
        if self.challenge_in_frame() == self.target_rnd {
            self.response.extend(header_pulses());
            self.response.extend(encode_response_bits(&self.grn_bits));
        } else {
            // Sixteen timed-out pulses: exactly the header scan budget.
            self.misses_left = crate::constants::READ_HEADER_LEN;
        }
        self.frame.clear();
        self.liw_idx = 0;
    }
}

impl Air for AuthTagSim {
    fn setup(&mut self) {}

    fn teardown(&mut self) {}

    fn detect_signal(&mut self) -> bool {
        true
    }

    fn pulse(&mut self, _edge: Edge) -> u32 {
        if self.frame.len() >= AUTH_FRAME_BITS {
            self.finish_frame();
        }
        if let Some(p) = self.response.pop_front() {
            return p;
        }
        if self.misses_left > 0 {
            self.misses_left -= 1;
            return 0;
        }
        let p = liw_pulses()[self.liw_idx % 4];
        self.liw_idx += 1;
        p
    }

    fn send_bit(&mut self, bit: u8) {
        self.frame.push(bit & 1);
    }

    fn wait_ticks(&mut self, ticks: u32) {
        self.now = self.now.wrapping_add(ticks);
    }

    fn now_ticks(&mut self) -> u32 {
        self.now = self.now.wrapping_add(1);
        self.now
    }

    fn watchdog_kick(&mut self) {}

    fn abort_requested(&mut self) -> bool {
        false
    }
}
