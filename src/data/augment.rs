// ============================================================
// Layer 4 — Augmentation Engine (offline)
// ============================================================
// Expands a training set with label-preserving, randomized
// transformations of real samples. Four independent techniques:
//
//   time_warp        — stretch/compress the time axis, resample
//                      back to the original length
//   magnitude_scale  — scale each coordinate channel independently
//   jitter           — add zero-mean Gaussian noise
//   segment_permute  — split into segments and reorder them
//
// Every function takes an explicit `&mut impl Rng` instead of a
// process-global source: a fixed seed makes an augmentation run
// bit-for-bit reproducible, which the tests rely on.
//
// Reference: Um et al. (2017) Data Augmentation of Wearable
//            Sensor Data for Parkinson's Disease Monitoring
//            rand / rand_distr documentation

use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::data::feature::CoordSeq;

/// Warp factor range for time warping
const WARP_RANGE: (f32, f32) = (0.8, 1.2);
/// Per-channel scale factor range for magnitude scaling
const SCALE_RANGE: (f32, f32) = (0.7, 1.3);
/// Noise standard deviation range for jittering
const NOISE_RANGE: (f32, f32) = (0.005, 0.02);

/// Expand `(samples, labels)` by `factor` using all four techniques
/// in equal measure.
///
/// Each technique contributes `floor(n * (factor - 1) / 4)` synthetic
/// samples, each derived from one randomly chosen source sample and
/// carrying that source's label. The originals are always kept; any
/// rounding remainder is simply not generated.
pub fn apply_augmentation(
    samples: &[CoordSeq],
    labels: &[usize],
    factor: f64,
    rng: &mut impl Rng,
) -> (Vec<CoordSeq>, Vec<usize>) {
    let n = samples.len();
    let mut out_samples = samples.to_vec();
    let mut out_labels = labels.to_vec();

    if n == 0 || factor <= 1.0 {
        return (out_samples, out_labels);
    }

    // Balanced contribution: the same quota for every technique
    let per_technique = (n as f64 * (factor - 1.0) / 4.0) as usize;

    for _ in 0..per_technique {
        let idx = rng.gen_range(0..n);
        out_samples.push(time_warp(&samples[idx], rng));
        out_labels.push(labels[idx]);
    }
    for _ in 0..per_technique {
        let idx = rng.gen_range(0..n);
        out_samples.push(magnitude_scale(&samples[idx], rng));
        out_labels.push(labels[idx]);
    }
    for _ in 0..per_technique {
        let idx = rng.gen_range(0..n);
        out_samples.push(jitter(&samples[idx], rng));
        out_labels.push(labels[idx]);
    }
    for _ in 0..per_technique {
        let idx = rng.gen_range(0..n);
        out_samples.push(segment_permute(&samples[idx], rng));
        out_labels.push(labels[idx]);
    }

    tracing::debug!(
        "Augmented {} samples to {} (factor {:.2}, {} per technique)",
        n,
        out_samples.len(),
        factor,
        per_technique
    );

    (out_samples, out_labels)
}

/// Resample the sequence along a randomly warped time axis.
///
/// A warp factor in [0.8, 1.2) stretches or compresses the axis; the
/// output is always interpolated back to the original length. When the
/// warped step count is smaller than the original, interpolation is
/// bounded to the shorter length so no source index goes out of range.
pub fn time_warp(sample: &CoordSeq, rng: &mut impl Rng) -> CoordSeq {
    let seq_len = sample.len();
    if seq_len < 2 {
        return sample.clone();
    }

    let warp: f32 = rng.gen_range(WARP_RANGE.0..WARP_RANGE.1);
    let warped_len = (seq_len as f32 * warp) as usize;
    // Bounded: never read past the end of the source sample
    let source_len = warped_len.min(seq_len).max(1);

    let mut out = vec![[0.0f32; 2]; seq_len];
    for channel in 0..2 {
        let values: Vec<f32> = sample[..source_len].iter().map(|p| p[channel]).collect();
        let resampled = resample_linear(&values, seq_len);
        for (row, v) in out.iter_mut().zip(resampled) {
            row[channel] = v;
        }
    }
    out
}

/// Linear interpolation of `values` onto `target_len` evenly spaced
/// points spanning the same [first, last] range.
fn resample_linear(values: &[f32], target_len: usize) -> Vec<f32> {
    let m = values.len();
    if m == 1 {
        return vec![values[0]; target_len];
    }
    // Source points sit at linspace(0, target_len - 1, m); for each
    // output step t, find its position on that source grid.
    let step = (target_len - 1) as f32 / (m - 1) as f32;

    (0..target_len)
        .map(|t| {
            let pos = t as f32 / step;
            let i = pos as usize;
            if i >= m - 1 {
                values[m - 1]
            } else {
                let frac = pos - i as f32;
                values[i] * (1.0 - frac) + values[i + 1] * frac
            }
        })
        .collect()
}

/// Multiply each coordinate channel by an independent random factor
/// in [0.7, 1.3).
pub fn magnitude_scale(sample: &CoordSeq, rng: &mut impl Rng) -> CoordSeq {
    let sx: f32 = rng.gen_range(SCALE_RANGE.0..SCALE_RANGE.1);
    let sy: f32 = rng.gen_range(SCALE_RANGE.0..SCALE_RANGE.1);
    sample.iter().map(|p| [p[0] * sx, p[1] * sy]).collect()
}

/// Add zero-mean Gaussian noise with a randomly drawn standard
/// deviation in [0.005, 0.02), element-wise over both channels.
pub fn jitter(sample: &CoordSeq, rng: &mut impl Rng) -> CoordSeq {
    let sigma: f32 = rng.gen_range(NOISE_RANGE.0..NOISE_RANGE.1);
    sample
        .iter()
        .map(|p| {
            let nx: f32 = rng.sample(StandardNormal);
            let ny: f32 = rng.sample(StandardNormal);
            [p[0] + nx * sigma, p[1] + ny * sigma]
        })
        .collect()
}

/// Split the sequence into 2–5 contiguous, near-equal segments and
/// reassemble them in a random non-identity order.
///
/// The permutation is drawn by reject-and-retry: shuffling until the
/// order differs from identity, so the output is never the input
/// ordering when at least two segments exist. Total length is
/// unchanged. Sequences shorter than 2 steps are returned as-is.
pub fn segment_permute(sample: &CoordSeq, rng: &mut impl Rng) -> CoordSeq {
    let seq_len = sample.len();
    if seq_len < 2 {
        return sample.clone();
    }

    // 2..min(6, seq_len/5) segments; degenerate short sequences clamp to 2
    let upper = (seq_len / 5).min(6);
    let n_segments = if upper > 2 { rng.gen_range(2..upper) } else { 2 };

    // Near-equal boundaries: linspace(0, seq_len, n_segments + 1)
    let boundary =
        |i: usize| -> usize { (i as f32 * seq_len as f32 / n_segments as f32) as usize };

    let identity: Vec<usize> = (0..n_segments).collect();
    let mut order = identity.clone();
    while order == identity {
        order.shuffle(rng);
    }

    let mut out = Vec::with_capacity(seq_len);
    for &seg in &order {
        out.extend_from_slice(&sample[boundary(seg)..boundary(seg + 1)]);
    }
    out
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Strictly increasing ramp — any segment reordering changes it
    fn ramp(len: usize) -> CoordSeq {
        (0..len).map(|i| [i as f32, i as f32 * 2.0]).collect()
    }

    #[test]
    fn test_augmentation_count_property() {
        // n=10, factor=3 → floor(10 * 2 / 4) = 5 per technique → 20 new
        let samples: Vec<CoordSeq> = (0..10).map(|_| ramp(50)).collect();
        let labels: Vec<usize> = (0..10).map(|i| i % 2).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let (aug, aug_labels) = apply_augmentation(&samples, &labels, 3.0, &mut rng);
        assert_eq!(aug.len(), 10 + 4 * 5);
        assert_eq!(aug_labels.len(), aug.len());
    }

    #[test]
    fn test_rounding_remainder_is_dropped() {
        // n=3, factor=2 → floor(3 * 1 / 4) = 0 per technique → nothing added
        let samples: Vec<CoordSeq> = (0..3).map(|_| ramp(50)).collect();
        let labels = vec![0, 1, 0];
        let mut rng = StdRng::seed_from_u64(2);

        let (aug, _) = apply_augmentation(&samples, &labels, 2.0, &mut rng);
        assert_eq!(aug.len(), 3);
    }

    #[test]
    fn test_augmented_rows_inherit_their_source_label() {
        // Sample i holds the constant value 10^i; no technique can move
        // a value outside (0.7, 1.3) x 10^i, so the source index is
        // recoverable from any augmented row
        let samples: Vec<CoordSeq> = (0..4)
            .map(|i| vec![[10f32.powi(i), 10f32.powi(i)]; 20])
            .collect();
        let labels: Vec<usize> = (0..4).collect();
        let mut rng = StdRng::seed_from_u64(11);

        let (aug, aug_labels) = apply_augmentation(&samples, &labels, 5.0, &mut rng);
        for (s, &l) in aug.iter().zip(&aug_labels).skip(4) {
            let source = s[0][0].log10().round() as usize;
            assert_eq!(l, source);
        }
    }

    #[test]
    fn test_originals_come_first_unchanged() {
        let samples: Vec<CoordSeq> = (0..4).map(|_| ramp(40)).collect();
        let labels = vec![0, 1, 1, 0];
        let mut rng = StdRng::seed_from_u64(3);

        let (aug, aug_labels) = apply_augmentation(&samples, &labels, 5.0, &mut rng);
        assert_eq!(&aug[..4], &samples[..]);
        assert_eq!(&aug_labels[..4], &labels[..]);
    }

    #[test]
    fn test_time_warp_preserves_length() {
        let sample = ramp(100);
        let mut rng = StdRng::seed_from_u64(4);
        // Cover many warp factors from both halves of the range
        for _ in 0..200 {
            assert_eq!(time_warp(&sample, &mut rng).len(), 100);
        }
    }

    #[test]
    fn test_time_warp_stays_in_value_range() {
        // Interpolation between existing points can never leave [min, max]
        let sample = ramp(60);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            for p in time_warp(&sample, &mut rng) {
                assert!(p[0] >= 0.0 && p[0] <= 59.0);
            }
        }
    }

    #[test]
    fn test_magnitude_scale_is_per_channel() {
        let sample = vec![[1.0, 1.0]; 10];
        let mut rng = StdRng::seed_from_u64(6);
        let scaled = magnitude_scale(&sample, &mut rng);
        // One factor per channel, constant across time
        for p in &scaled {
            assert_eq!(p[0], scaled[0][0]);
            assert_eq!(p[1], scaled[0][1]);
            assert!(p[0] >= 0.7 && p[0] < 1.3);
            assert!(p[1] >= 0.7 && p[1] < 1.3);
        }
    }

    #[test]
    fn test_jitter_changes_values_but_not_length() {
        let sample = ramp(30);
        let mut rng = StdRng::seed_from_u64(7);
        let noisy = jitter(&sample, &mut rng);
        assert_eq!(noisy.len(), 30);
        assert_ne!(noisy, sample);
        // Noise is small: sigma < 0.02, so values stay near the source
        for (a, b) in sample.iter().zip(&noisy) {
            assert!((a[0] - b[0]).abs() < 0.5);
        }
    }

    #[test]
    fn test_segment_permute_never_identity() {
        let sample = ramp(100);
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..100 {
            let permuted = segment_permute(&sample, &mut rng);
            assert_eq!(permuted.len(), 100);
            // The ramp is strictly increasing, so any non-identity
            // segment order produces a different sequence
            assert_ne!(permuted, sample);
        }
    }

    #[test]
    fn test_segment_permute_short_sequence() {
        // seq_len/5 <= 2 clamps to exactly 2 segments
        let sample = ramp(6);
        let mut rng = StdRng::seed_from_u64(9);
        let permuted = segment_permute(&sample, &mut rng);
        assert_eq!(permuted.len(), 6);
        assert_ne!(permuted, sample);
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let samples: Vec<CoordSeq> = (0..8).map(|_| ramp(50)).collect();
        let labels: Vec<usize> = (0..8).map(|i| i % 3).collect();

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let run_a = apply_augmentation(&samples, &labels, 3.0, &mut rng_a);
        let run_b = apply_augmentation(&samples, &labels, 3.0, &mut rng_b);

        // Bit-for-bit identical under explicit state threading
        assert_eq!(run_a.0, run_b.0);
        assert_eq!(run_a.1, run_b.1);
    }
}
