pub mod bank;
pub mod chunked;
pub mod noise;
pub mod phase;
pub mod quantizer;
pub mod render;
pub mod unit;

use thiserror::Error;

pub use bank::{VoiceBank, VoiceId};
pub use noise::NoiseUnit;
pub use render::{macro_osc::MacroOscillator, Renderer, Shape};
pub use unit::{Control, InputRate, OscillatorUnit, UnitArgs};

#[derive(Debug, Clone)]
pub struct Config {
    /// The sample rate of the audio stream, in Hz.
    pub sample_rate: f32,
    /// The number of samples the host usually asks for per call.
    pub block_size: usize,
}

pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;
pub const DEFAULT_BLOCK_SIZE: usize = 64;

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(Error::InvalidSampleRate(self.sample_rate));
        }
        if self.block_size == 0 {
            return Err(Error::InvalidBlockSize);
        }
        Ok(())
    }

    /// Duration of one sample, in seconds.
    pub fn sample_duration(&self) -> f32 {
        1.0 / self.sample_rate
    }
}

/// Errors raised while setting up units. Block processing itself cannot fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("sample rate must be a positive finite number, got {0}")]
    InvalidSampleRate(f32),
    #[error("block size must be at least one sample")]
    InvalidBlockSize,
    #[error("renderer capacity must be at least one sample")]
    ZeroCapacity,
}

/// Something that fills one host block of audio per call.
pub trait Unit {
    /// Overwrite `out` with `out.len()` new samples.
    ///
    /// Runs on the audio thread: implementations must not allocate, block or
    /// fail.
    fn compute(&mut self, control: Control<'_>, out: &mut [f32]);
}

impl<U: Unit + ?Sized> Unit for Box<U> {
    fn compute(&mut self, control: Control<'_>, out: &mut [f32]) {
        (**self).compute(control, out)
    }
}
