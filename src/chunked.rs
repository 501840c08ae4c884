//! Drives a fixed-capacity [`Renderer`] across host blocks of any length.

use std::num::NonZeroUsize;
use std::ops::Range;

use crate::quantizer::{BlockQuantizer, ChunkPlan};
use crate::render::{pitch_from_hz, rescale, Renderer};
use crate::unit::Control;
use crate::Error;

/// A renderer together with its chunk planner and scratch buffers.
///
/// The scratch buffers are sized to the renderer's capacity once, at
/// construction, and reused for every chunk.
pub struct ChunkedRenderer<R: Renderer> {
    renderer: R,
    quantizer: BlockQuantizer,
    sync: Box<[u8]>,
    raw: Box<[i16]>,
}

impl<R: Renderer> ChunkedRenderer<R> {
    pub fn new(renderer: R) -> Result<Self, Error> {
        let capacity = NonZeroUsize::new(R::CAPACITY).ok_or(Error::ZeroCapacity)?;
        Ok(Self {
            renderer,
            quantizer: BlockQuantizer::new(capacity),
            sync: vec![0; capacity.get()].into_boxed_slice(),
            raw: vec![0; capacity.get()].into_boxed_slice(),
        })
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn quantizer(&self) -> &BlockQuantizer {
        &self.quantizer
    }

    /// Render `out.len()` samples, rescaled to float.
    pub fn render_into(&mut self, control: Control<'_>, out: &mut [f32]) {
        self.drive(control, out.len(), |range, raw| {
            for (o, &s) in out[range].iter_mut().zip(raw) {
                *o = rescale(s);
            }
        });
    }

    /// Advance the renderer by `count` samples without keeping its output.
    pub fn advance(&mut self, control: Control<'_>, count: usize) {
        self.drive(control, count, |_, _| {});
    }

    fn drive(
        &mut self,
        control: Control<'_>,
        count: usize,
        mut sink: impl FnMut(Range<usize>, &[i16]),
    ) {
        let plan: ChunkPlan = self.quantizer.plan(count);
        let size = plan.block_size;
        for range in plan.chunks() {
            let sync = &mut self.sync[..size];
            let raw = &mut self.raw[..size];
            sync.fill(0);
            raw.fill(0);

            self.renderer.set_pitch(pitch_from_hz(control.value_at(range.start)));
            self.renderer.render(sync, raw);
            sink(range, &raw[..]);
        }
    }
}
