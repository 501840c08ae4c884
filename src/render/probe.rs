//! Test double that records how it is driven.

use super::{Renderer, Shape};

/// Emits a running sample counter so callers can check ordering and
/// continuity, and remembers the largest render request it saw.
#[derive(Debug, Default)]
pub struct ProbeRenderer<const C: usize> {
    pub shape: Option<Shape>,
    pub pitches: Vec<i16>,
    pub calls: usize,
    pub largest: usize,
    pub rendered: usize,
    pub dirty_sync: bool,
    /// Set when `render` receives an output buffer that is not all zero.
    pub dirty_out: bool,
}

impl<const C: usize> Renderer for ProbeRenderer<C> {
    const CAPACITY: usize = C;

    fn configure_shape(&mut self, shape: Shape) {
        self.shape = Some(shape);
    }

    fn set_pitch(&mut self, pitch: i16) {
        self.pitches.push(pitch);
    }

    fn render(&mut self, sync: &[u8], out: &mut [i16]) {
        assert!(out.len() <= C, "render of {} exceeds capacity {}", out.len(), C);
        self.calls += 1;
        self.largest = self.largest.max(out.len());
        self.dirty_sync |= sync.iter().any(|&s| s != 0);
        self.dirty_out |= out.iter().any(|&s| s != 0);
        for sample in out.iter_mut() {
            *sample = self.rendered as i16;
            self.rendered += 1;
        }
    }
}
