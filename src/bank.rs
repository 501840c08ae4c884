//! A bounded set of voices mixed into one output, oldest evicted first.

use slotmap::SlotMap;

use crate::unit::Control;
use crate::{Config, Error, Unit};

pub struct Voice<U> {
    pub unit: U,
    /// Block-rate frequency handed to the unit, in Hz.
    pub frequency: f32,
    /// Linear gain applied while mixing.
    pub gain: f32,
    /// Insertion stamp; lower is older.
    age: u64,
}

slotmap::new_key_type! {
    pub struct VoiceId;
}

/// Host-side mixer for several units. Not part of the per-voice engine; it
/// is what the playback demo drives.
pub struct VoiceBank<U: Unit> {
    max_voices: usize,
    next_age: u64,
    voices: SlotMap<VoiceId, Voice<U>>,
    /// Per-voice scratch, one host block long.
    mix: Vec<f32>,
}

impl<U: Unit> VoiceBank<U> {
    pub fn new(config: &Config, max_voices: usize) -> Result<Self, Error> {
        config.validate()?;
        let max_voices = max_voices.max(1);
        Ok(VoiceBank {
            max_voices,
            next_age: 0,
            voices: SlotMap::with_capacity_and_key(max_voices),
            mix: vec![0.0; config.block_size],
        })
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    fn oldest(&self) -> Option<VoiceId> {
        self.voices
            .iter()
            .min_by_key(|(_, v)| v.age)
            .map(|(key, _)| key)
    }

    /// Add a voice, evicting the oldest one if the bank is full.
    pub fn add(&mut self, unit: U, frequency: f32, gain: f32) -> VoiceId {
        if self.voices.len() >= self.max_voices {
            if let Some(oldest) = self.oldest() {
                tracing::debug!(?oldest, "voice bank full, evicting oldest voice");
                self.voices.remove(oldest);
            }
        }

        let age = self.next_age;
        self.next_age += 1;
        self.voices.insert(Voice {
            unit,
            frequency,
            gain,
            age,
        })
    }

    pub fn get_mut(&mut self, key: VoiceId) -> Option<&mut Voice<U>> {
        self.voices.get_mut(key)
    }

    pub fn set_frequency(&mut self, key: VoiceId, frequency: f32) -> bool {
        self.get_mut(key).map(|v| v.frequency = frequency).is_some()
    }

    pub fn set_gain(&mut self, key: VoiceId, gain: f32) -> bool {
        self.get_mut(key).map(|v| v.gain = gain).is_some()
    }

    pub fn remove(&mut self, key: VoiceId) -> Option<Voice<U>> {
        self.voices.remove(key)
    }

    /// Keep only the voices for which `f` returns true.
    pub fn retain(&mut self, mut f: impl FnMut(&Voice<U>) -> bool) {
        self.voices.retain(|_, v| f(v));
    }

    /// Voice ids from oldest to newest.
    pub fn ids(&self) -> Vec<VoiceId> {
        let mut ids: Vec<_> = self.voices.iter().map(|(k, v)| (v.age, k)).collect();
        ids.sort_unstable_by_key(|&(age, _)| age);
        ids.into_iter().map(|(_, k)| k).collect()
    }

    /// Mix every voice into `out`, overwriting it.
    ///
    /// Blocks longer than the configured block size are processed in
    /// block-size slices.
    pub fn render(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        let block = self.mix.len();
        for slice in out.chunks_mut(block) {
            let mix = &mut self.mix[..slice.len()];
            for voice in self.voices.values_mut() {
                voice.unit.compute(Control::Block(voice.frequency), mix);
                for (o, &m) in slice.iter_mut().zip(mix.iter()) {
                    *o += m * voice.gain;
                }
            }
        }
    }
}
