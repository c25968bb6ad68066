// ============================================================
// Layer 2 — Visualize Use Case
// ============================================================
// Renders diagnostic PNGs for a handful of randomly chosen
// sequences of one activity:
//
//   {activity}_sequence_{i}.png   — 2x2 grid: x trace, y trace,
//                                   x spectrum, y spectrum
//   trajectory_sequence_{i}.png   — the 2-D head path
//
// Traces are mean-centred before plotting and before the FFT so
// the head's resting position does not dominate either view.

use anyhow::{bail, Context, Result};
use chrono::DateTime;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::path::Path;

use crate::data::loader::JsonSequenceLoader;
use crate::domain::sequence::SequenceRecord;
use crate::domain::traits::SequenceSource;
use crate::viz::{colors, fft::compute_spectrum, plot, PlotConfig};

#[derive(Debug, Clone)]
pub struct VisualizeConfig {
    pub data_path:  String,
    pub output_dir: String,
    pub activity:   String,
    pub count:      usize,
    pub seed:       u64,
}

pub struct VisualizeUseCase {
    config: VisualizeConfig,
}

impl VisualizeUseCase {
    pub fn new(config: VisualizeConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        let records = JsonSequenceLoader::new(&cfg.data_path).load_all()?;
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let chosen  = select_random_sequences(&records, &cfg.activity, cfg.count, &mut rng);
        if chosen.is_empty() {
            bail!("No '{}' sequences found in '{}'", cfg.activity, cfg.data_path);
        }

        std::fs::create_dir_all(&cfg.output_dir)
            .with_context(|| format!("Cannot create output dir '{}'", cfg.output_dir))?;
        let out = Path::new(&cfg.output_dir);

        for (i, record) in chosen.iter().enumerate() {
            let n = i + 1;

            // RFC 3339 timestamps come straight from the recorder; fall
            // back to the raw string if one is malformed.
            let recorded = DateTime::parse_from_rfc3339(&record.timestamp)
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|_| record.timestamp.clone());
            tracing::info!(
                "Sequence {}: {} frames at {} fps ({:.1}s), recorded {}",
                n,
                record.coordinates.len(),
                record.camera_fps,
                record.duration_secs(),
                recorded
            );

            let xs = mean_centered(&record.coordinates, 0);
            let ys = mean_centered(&record.coordinates, 1);
            let x_spec = compute_spectrum(&xs, record.camera_fps);
            let y_spec = compute_spectrum(&ys, record.camera_fps);

            let trace_cfg    = PlotConfig::default();
            let spectrum_cfg = PlotConfig::default().with_line_color(colors::ORANGE);

            let grid = plot::compose_grid([
                &plot::render_series(&xs, &trace_cfg),
                &plot::render_series(&ys, &trace_cfg),
                &plot::render_series(&x_spec.magnitudes, &spectrum_cfg),
                &plot::render_series(&y_spec.magnitudes, &spectrum_cfg),
            ]);
            let grid_path = out.join(format!("{}_sequence_{}.png", cfg.activity, n));
            grid.save(&grid_path)
                .with_context(|| format!("Cannot write '{}'", grid_path.display()))?;

            let traj = plot::render_trajectory(&record.coordinates, &trace_cfg);
            let traj_path = out.join(format!("trajectory_sequence_{}.png", n));
            traj.save(&traj_path)
                .with_context(|| format!("Cannot write '{}'", traj_path.display()))?;
        }

        println!(
            "Wrote {} sequence plots to '{}'.",
            chosen.len(),
            cfg.output_dir
        );
        Ok(())
    }
}

/// Pick up to `count` random sequences of the given activity.
/// When fewer exist, everything available is returned.
fn select_random_sequences<'a>(
    records:  &'a [SequenceRecord],
    activity: &str,
    count:    usize,
    rng:      &mut impl rand::Rng,
) -> Vec<&'a SequenceRecord> {
    let matching: Vec<&SequenceRecord> = records
        .iter()
        .filter(|r| r.activity_type == activity)
        .collect();

    if matching.len() < count {
        tracing::warn!(
            "Requested {} '{}' sequences but only {} available",
            count,
            activity,
            matching.len()
        );
        return matching;
    }

    matching
        .choose_multiple(rng, count)
        .copied()
        .collect()
}

/// Extract one axis of the coordinates with its mean removed.
fn mean_centered(coordinates: &[[f32; 2]], axis: usize) -> Vec<f32> {
    let values: Vec<f32> = coordinates.iter().map(|p| p[axis]).collect();
    if values.is_empty() {
        return values;
    }
    let mean = values.iter().sum::<f32>() / values.len() as f32;
    values.into_iter().map(|v| v - mean).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn record(activity: &str) -> SequenceRecord {
        SequenceRecord {
            coordinates:     vec![[0.5, 0.5]; 10],
            activity_type:   activity.to_string(),
            camera_fps:      30.0,
            sequence_length: 10,
            timestamp:       "2026-08-30T12:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_selection_filters_by_activity() {
        let records = vec![record("walking"), record("standing"), record("walking")];
        let mut rng = StdRng::seed_from_u64(7);

        let chosen = select_random_sequences(&records, "walking", 2, &mut rng);
        assert_eq!(chosen.len(), 2);
        assert!(chosen.iter().all(|r| r.activity_type == "walking"));
    }

    #[test]
    fn test_selection_degrades_when_too_few() {
        let records = vec![record("walking"), record("walking"), record("walking")];
        let mut rng = StdRng::seed_from_u64(7);

        // Asking for 10 out of 3 yields all 3 rather than an error
        let chosen = select_random_sequences(&records, "walking", 10, &mut rng);
        assert_eq!(chosen.len(), 3);
    }

    #[test]
    fn test_mean_centering() {
        let coords = vec![[0.2, 0.0], [0.4, 0.0], [0.6, 0.0]];
        let centered = mean_centered(&coords, 0);

        assert!((centered[0] + 0.2).abs() < 1e-6);
        assert!(centered[1].abs() < 1e-6);
        assert!((centered[2] - 0.2).abs() < 1e-6);
    }
}
