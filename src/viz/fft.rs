// ============================================================
// Layer 7 — Frequency Spectrum
// ============================================================
// FFT magnitude spectrum of a coordinate trace. Periodic head
// motion (walking bounce, nodding) shows up as a clear peak;
// standing still is flat noise near DC.
//
// Reference: rustfft docs (plan_fft_forward)

use rustfft::{num_complex::Complex, FftPlanner};

/// Half-spectrum of one coordinate axis.
pub struct FrequencySpectrum {
    /// Frequency of each bin in Hz, from 0 up to fps/2
    pub freqs: Vec<f32>,
    /// Magnitude per bin, normalised so the largest is 1.0
    pub magnitudes: Vec<f32>,
}

/// Compute the magnitude spectrum of `signal` sampled at `fps` Hz.
///
/// The mean is removed first so the DC bin does not swamp the
/// motion frequencies we actually care about.
pub fn compute_spectrum(signal: &[f32], fps: f32) -> FrequencySpectrum {
    if signal.len() < 2 {
        return FrequencySpectrum { freqs: vec![], magnitudes: vec![] };
    }

    let n = signal.len();
    let mean = signal.iter().sum::<f32>() / n as f32;

    let mut buffer: Vec<Complex<f32>> = signal
        .iter()
        .map(|&x| Complex::new(x - mean, 0.0))
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    // Positive frequencies only
    let half = n / 2;
    let mut magnitudes: Vec<f32> = buffer.iter().take(half).map(|c| c.norm()).collect();

    // Normalise to [0, 1] so plots from different scales compare
    let max = magnitudes.iter().cloned().fold(0.0f32, f32::max);
    if max > 0.0 {
        for m in magnitudes.iter_mut() {
            *m /= max;
        }
    }

    let freqs = (0..half).map(|i| i as f32 * fps / n as f32).collect();

    FrequencySpectrum { freqs, magnitudes }
}
