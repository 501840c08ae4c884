use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::chunked::ChunkedRenderer;
use crate::render::{Renderer, Shape};
use crate::unit::Control;
use crate::{Config, Error, Unit};

/// White noise voice that keeps a renderer running underneath.
///
/// The renderer is driven every block so its state stays in step with the
/// host, but only the random stream reaches the output.
pub struct NoiseUnit<R: Renderer> {
    chunked: ChunkedRenderer<R>,
    rng: StdRng,
    initial_sample: f32,
}

impl<R: Renderer> NoiseUnit<R> {
    pub fn new(config: &Config, frequency: f32, renderer: R, seed: u64) -> Result<Self, Error> {
        config.validate()?;

        let mut chunked = ChunkedRenderer::new(renderer)?;
        chunked.renderer_mut().configure_shape(Shape::Wavetables);
        tracing::debug!(seed, "noise unit ready");

        let mut unit = Self {
            chunked,
            rng: StdRng::seed_from_u64(seed),
            initial_sample: 0.0,
        };

        let mut first = [0.0f32; 1];
        unit.compute(Control::Block(frequency), &mut first);
        unit.initial_sample = first[0];
        Ok(unit)
    }

    pub fn initial_sample(&self) -> f32 {
        self.initial_sample
    }

    pub fn chunked(&self) -> &ChunkedRenderer<R> {
        &self.chunked
    }
}

impl<R: Renderer> Unit for NoiseUnit<R> {
    fn compute(&mut self, control: Control<'_>, out: &mut [f32]) {
        self.chunked.advance(control, out.len());
        for sample in out.iter_mut() {
            *sample = self.rng.gen_range(-1.0..1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::probe::ProbeRenderer;

    fn noise(seed: u64) -> NoiseUnit<ProbeRenderer<128>> {
        NoiseUnit::new(&Config::default(), 440.0, ProbeRenderer::default(), seed).unwrap()
    }

    #[test]
    fn output_is_bipolar_noise() {
        let mut unit = noise(1);
        let mut out = [0.0; 1024];
        unit.compute(Control::Block(440.0), &mut out);

        assert!(out.iter().all(|s| (-1.0..1.0).contains(s)));
        assert!(out.iter().any(|&s| s < -0.5));
        assert!(out.iter().any(|&s| s > 0.5));
        let mean = out.iter().sum::<f32>() / out.len() as f32;
        assert!(mean.abs() < 0.1, "mean {mean}");
    }

    #[test]
    fn renderer_keeps_pace() {
        let mut unit = noise(2);
        let mut out = [0.0; 256];
        unit.compute(Control::Block(440.0), &mut out);

        let probe = unit.chunked().renderer();
        assert_eq!(probe.shape, Some(Shape::Wavetables));
        assert_eq!(probe.rendered, 1 + 256);
        assert_eq!(probe.largest, 128);
    }

    #[test]
    fn seed_makes_it_repeatable() {
        let mut a = noise(42);
        let mut b = noise(42);
        assert_eq!(a.initial_sample(), b.initial_sample());

        let mut out_a = [0.0; 64];
        let mut out_b = [0.0; 64];
        a.compute(Control::Block(440.0), &mut out_a);
        b.compute(Control::Block(440.0), &mut out_b);
        assert_eq!(out_a, out_b);

        let mut c = noise(43);
        c.compute(Control::Block(440.0), &mut out_b);
        assert_ne!(out_a, out_b);
    }
}
