//! A single oscillator voice and its one-time compute path selection.

use crate::chunked::ChunkedRenderer;
use crate::phase;
use crate::render::{Renderer, Shape};
use crate::{Config, Error, Unit};

/// Frequency control for one block, in Hz.
#[derive(Debug, Clone, Copy)]
pub enum Control<'a> {
    /// One value for the whole block.
    Block(f32),
    /// One value per output sample.
    Audio(&'a [f32]),
}

impl Control<'_> {
    /// The control value for sample `index`. Short audio buffers hold their
    /// last value; an empty one reads as 0.
    #[inline]
    pub fn value_at(&self, index: usize) -> f32 {
        match self {
            Control::Block(value) => *value,
            Control::Audio(values) => values
                .get(index)
                .or_else(|| values.last())
                .copied()
                .unwrap_or(0.0),
        }
    }
}

/// How often the host updates the frequency input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputRate {
    /// Once per sample.
    Audio,
    /// Once per block.
    #[default]
    Control,
    /// Fixed at construction.
    Scalar,
}

/// The compute routine a unit runs for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputePath {
    /// Raw bipolar phase, frequency sampled once per block.
    Phase,
    /// Chunked renderer output.
    Rendered,
}

impl From<InputRate> for ComputePath {
    fn from(rate: InputRate) -> Self {
        match rate {
            InputRate::Audio => ComputePath::Rendered,
            InputRate::Control | InputRate::Scalar => ComputePath::Phase,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnitArgs {
    /// Frequency in Hz used for the warm-up sample.
    pub frequency: f32,
    /// Starting phase, folded into `[-1, 1)`.
    pub initial_phase: f64,
    pub rate: InputRate,
    pub shape: Shape,
}

impl Default for UnitArgs {
    fn default() -> Self {
        Self {
            frequency: 440.0,
            initial_phase: 0.0,
            rate: InputRate::default(),
            shape: Shape::default(),
        }
    }
}

pub struct OscillatorUnit<R: Renderer> {
    /// Converts Hz into phase units per sample (two units per cycle).
    frequency_scale: f32,
    phase: f64,
    path: ComputePath,
    chunked: ChunkedRenderer<R>,
    initial_sample: f32,
}

impl<R: Renderer> OscillatorUnit<R> {
    /// Build a unit, pick its compute path from `args.rate` and compute one
    /// warm-up sample.
    ///
    /// The warm-up sample always comes from the phase accumulator, whatever the
    /// selected path, so a rendered unit's renderer starts untouched.
    pub fn new(config: &Config, args: UnitArgs, renderer: R) -> Result<Self, Error> {
        config.validate()?;

        let mut chunked = ChunkedRenderer::new(renderer)?;
        chunked.renderer_mut().configure_shape(args.shape);

        let path = ComputePath::from(args.rate);
        tracing::debug!(?path, shape = ?args.shape, rate = ?args.rate, "oscillator unit ready");

        let mut unit = Self {
            frequency_scale: 2.0 * config.sample_duration(),
            phase: phase::normalize(args.initial_phase),
            path,
            chunked,
            initial_sample: 0.0,
        };

        let mut first = [0.0f32; 1];
        unit.compute_phase(Control::Block(args.frequency), &mut first);
        unit.initial_sample = first[0];
        Ok(unit)
    }

    pub fn path(&self) -> ComputePath {
        self.path
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn frequency_scale(&self) -> f32 {
        self.frequency_scale
    }

    /// The sample computed during construction.
    pub fn initial_sample(&self) -> f32 {
        self.initial_sample
    }

    pub fn chunked(&self) -> &ChunkedRenderer<R> {
        &self.chunked
    }

    fn compute_phase(&mut self, control: Control<'_>, out: &mut [f32]) {
        let increment = (control.value_at(0) * self.frequency_scale) as f64;
        let increment = if increment.is_finite() { increment } else { 0.0 };
        self.phase = phase::accumulate(self.phase, increment, out);
    }
}

impl<R: Renderer> Unit for OscillatorUnit<R> {
    fn compute(&mut self, control: Control<'_>, out: &mut [f32]) {
        match self.path {
            ComputePath::Phase => self.compute_phase(control, out),
            ComputePath::Rendered => self.chunked.render_into(control, out),
        }
    }
}
