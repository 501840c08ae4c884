pub mod macro_osc;
#[cfg(test)]
pub(crate) mod probe;

/// Waveform family a renderer is configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    /// Saw with a held notch after every reset.
    #[default]
    Csaw,
    Saw,
    Square,
    Triangle,
    Sine,
    /// Sine with added second and third harmonics.
    Wavetables,
}

/// A fixed-capacity waveform synthesizer producing signed 16-bit samples.
///
/// Implementations keep their own continuous state (oscillator phase, pitch)
/// between calls. Callers must never ask for more than [`CAPACITY`](Self::CAPACITY)
/// samples in one [`render`](Self::render) call.
pub trait Renderer {
    /// The largest number of samples a single `render` call may produce.
    const CAPACITY: usize;

    /// Select the waveform family.
    fn configure_shape(&mut self, shape: Shape);

    /// Set the pitch register, in 1/128 semitone steps above MIDI note 0.
    ///
    /// Out-of-range values are clamped by the implementation.
    fn set_pitch(&mut self, pitch: i16);

    /// Synthesize `out.len()` samples. A non-zero entry in `sync` resets the
    /// oscillator before the corresponding sample.
    fn render(&mut self, sync: &[u8], out: &mut [i16]);
}

/// Convert a renderer sample to the host's float range.
///
/// The divisor is 65536, not 32768, so full scale maps to roughly ±0.5.
#[inline]
pub fn rescale(sample: i16) -> f32 {
    sample as f32 / 65536.0
}

/// Convert a frequency in Hz to renderer pitch units, saturating at the `i16`
/// range. Non-positive or non-finite frequencies give pitch 0.
pub fn pitch_from_hz(hz: f32) -> i16 {
    if !(hz.is_finite() && hz > 0.0) {
        return 0;
    }
    let note = 69.0 + 12.0 * (hz / 440.0).log2();
    // float-to-int `as` saturates
    (note * 128.0).round() as i16
}
