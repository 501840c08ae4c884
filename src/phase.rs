//! Bipolar phase accumulator.
//!
//! The phase lives in `[-1, 1)` and wraps by 2 in either direction, so a full
//! cycle spans two phase units. The raw phase is the output signal.

/// Fold a value that stepped at most one cycle out of range back into `[-1, 1)`.
#[inline]
pub fn wrap(x: f64) -> f64 {
    if x >= 1.0 {
        x - 2.0
    } else if x < -1.0 {
        x + 2.0
    } else {
        x
    }
}

/// Fold any finite value into `[-1, 1)`. Non-finite values become 0.
pub fn normalize(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    let folded = (x + 1.0).rem_euclid(2.0) - 1.0;
    // rem_euclid may round up to exactly 2.0 for tiny negative inputs
    if folded >= 1.0 {
        folded - 2.0
    } else {
        folded
    }
}

/// Narrow a phase to an output sample. Phases just below 1 round up to 1.0 in
/// `f32`; those fold to -1.0, the same point of the cycle.
#[inline]
fn to_sample(phase: f64) -> f32 {
    let sample = phase as f32;
    if sample >= 1.0 {
        sample - 2.0
    } else {
        sample
    }
}

/// Write `out.len()` phase samples starting at `phase`, returning the phase for
/// the next block.
///
/// `increment` is constant for the whole block, so its sign is checked once and
/// only one wrap direction is tested inside each loop.
pub fn accumulate(mut phase: f64, increment: f64, out: &mut [f32]) -> f64 {
    if increment >= 0.0 {
        for sample in out.iter_mut() {
            *sample = to_sample(phase);
            phase += increment;
            if phase >= 1.0 {
                phase -= 2.0;
            }
        }
    } else {
        for sample in out.iter_mut() {
            *sample = to_sample(phase);
            phase += increment;
            if phase < -1.0 {
                phase += 2.0;
            }
        }
    }
    phase
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn wraps_past_the_top() {
        let mut out = [0.0; 3];
        let phase = accumulate(0.98, 0.05, &mut out);

        assert!((out[0] - 0.98).abs() < 1e-6);
        assert!((out[1] - -0.97).abs() < 1e-6);
        assert!((out[2] - -0.92).abs() < 1e-6);
        assert!((phase - -0.87).abs() < 1e-9);
    }

    #[test]
    fn wraps_past_the_bottom() {
        let mut out = [0.0; 2];
        let phase = accumulate(-0.98, -0.05, &mut out);

        assert!((out[1] - 0.97).abs() < 1e-6);
        assert!((phase - 0.92).abs() < 1e-9);
    }

    #[test]
    fn zero_increment_holds() {
        let mut out = [1.0; 16];
        let phase = accumulate(0.25, 0.0, &mut out);

        assert_eq!(phase, 0.25);
        assert!(out.iter().all(|&s| s == 0.25));
    }

    #[test]
    fn branches_agree_near_zero() {
        let mut up = [0.0; 8];
        let mut down = [0.0; 8];
        accumulate(0.5, 0.0, &mut up);
        accumulate(0.5, -0.0, &mut down);
        assert_eq!(up, down);

        accumulate(0.5, 1e-12, &mut up);
        accumulate(0.5, -1e-12, &mut down);
        assert_eq!(up, down);
    }

    #[test]
    fn stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut out = [0.0f32; 64];
        for _ in 0..500 {
            let increment = rng.gen_range(-1.999..1.999);
            let mut phase = rng.gen_range(-1.0..1.0);
            for _ in 0..8 {
                phase = accumulate(phase, increment, &mut out);
                assert!((-1.0..1.0).contains(&phase), "phase {phase}");
                assert!(out.iter().all(|&s| (-1.0..1.0).contains(&s)));
            }
        }
    }

    #[test]
    fn samples_just_below_one_fold_down() {
        let mut out = [0.0; 2];
        let phase = accumulate(0.0, 0.999_999_99, &mut out);

        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], -1.0);
        assert!((-1.0..1.0).contains(&phase));

        let mut out = [0.0; 1];
        accumulate(1.0 - 1e-9, -0.5, &mut out);
        assert_eq!(out[0], -1.0);
    }

    #[test]
    fn exact_lower_bound_is_kept() {
        assert_eq!(wrap(-1.0), -1.0);
        assert_eq!(wrap(1.0), -1.0);
    }

    #[test]
    fn normalize_folds() {
        assert_eq!(normalize(0.5), 0.5);
        assert_eq!(normalize(1.0), -1.0);
        assert_eq!(normalize(2.5), 0.5);
        assert_eq!(normalize(-1.5), 0.5);
        assert_eq!(normalize(f64::NAN), 0.0);
        assert!((-1.0..1.0).contains(&normalize(-1e-18)));
    }
}
