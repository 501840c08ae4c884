use super::{Renderer, Shape};

const PITCH_MAX: i16 = 127 << 7;
const HALF_CYCLE: u32 = 1 << 31;
/// Length of the held section at the start of each CSAW cycle.
const CSAW_NOTCH: u32 = 1 << 28;
const CSAW_NOTCH_LEVEL: i16 = -(i16::MAX / 4);

/// Reference renderer: a 32-bit phase accumulator with a handful of classic
/// shapes, rendering at most 24 samples per call.
#[derive(Debug, Clone)]
pub struct MacroOscillator {
    sample_rate: f32,
    shape: Shape,
    pitch: i16,
    phase: u32,
    increment: u32,
}

impl MacroOscillator {
    pub fn new(sample_rate: f32) -> Self {
        let mut osc = Self {
            sample_rate,
            shape: Shape::default(),
            pitch: 0,
            phase: 0,
            increment: 0,
        };
        osc.set_pitch(60 << 7);
        osc
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn pitch(&self) -> i16 {
        self.pitch
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    fn sample(&self) -> i16 {
        let phase = self.phase;
        match self.shape {
            Shape::Csaw if phase < CSAW_NOTCH => CSAW_NOTCH_LEVEL,
            Shape::Csaw | Shape::Saw => ((phase >> 16) as i32 - 32768) as i16,
            Shape::Square => {
                if phase < HALF_CYCLE {
                    i16::MAX
                } else {
                    -i16::MAX
                }
            }
            Shape::Triangle => {
                if phase < HALF_CYCLE {
                    ((phase >> 15) as i32 - 32768) as i16
                } else {
                    (32767 - ((phase - HALF_CYCLE) >> 15) as i32) as i16
                }
            }
            Shape::Sine => {
                let x = radians(phase);
                (x.sin() * i16::MAX as f32) as i16
            }
            Shape::Wavetables => {
                let x = radians(phase);
                let y = (x.sin() + 0.5 * (2.0 * x).sin() + 0.25 * (3.0 * x).sin()) / 1.75;
                (y * i16::MAX as f32) as i16
            }
        }
    }
}

fn radians(phase: u32) -> f32 {
    (phase as f64 / 4_294_967_296.0 * std::f64::consts::TAU) as f32
}

impl Renderer for MacroOscillator {
    const CAPACITY: usize = 24;

    fn configure_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    fn set_pitch(&mut self, pitch: i16) {
        let pitch = pitch.clamp(0, PITCH_MAX);
        if pitch == self.pitch && self.increment != 0 {
            return;
        }
        self.pitch = pitch;

        let note = pitch as f64 / 128.0;
        let hz = 440.0 * ((note - 69.0) / 12.0).exp2();
        let cycles = (hz / self.sample_rate as f64).min(0.5);
        self.increment = (cycles * 4_294_967_296.0) as u32;
    }

    fn render(&mut self, sync: &[u8], out: &mut [i16]) {
        debug_assert!(out.len() <= Self::CAPACITY);
        for (i, sample) in out.iter_mut().enumerate() {
            if sync.get(i).is_some_and(|&flag| flag != 0) {
                self.phase = 0;
            }
            *sample = self.sample();
            self.phase = self.phase.wrapping_add(self.increment);
        }
    }
}
