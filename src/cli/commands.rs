// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `export`, `visualize`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;
use crate::application::visualize_use_case::VisualizeConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the activity classifier on recorded sequences
    Train(TrainArgs),

    /// Package the latest checkpoint for mobile deployment
    Export(ExportArgs),

    /// Render trace, spectrum and trajectory plots for sequences
    Visualize(VisualizeArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// JSON file with recorded face-tracking sequences
    #[arg(long, default_value = "data/sequences.json")]
    pub data_path: String,

    /// Directory to save model checkpoints, config and labels
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Directory the mobile export is written to after training
    #[arg(long, default_value = "export")]
    pub export_dir: String,

    /// Number of sequences processed together in one forward pass
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 50)]
    pub epochs: usize,

    /// How fast the model learns — too high causes instability,
    /// too low causes slow convergence
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Target dataset growth from offline augmentation.
    /// 3.0 means the training set roughly triples.
    #[arg(long, default_value_t = 3.0)]
    pub augmentation_factor: f64,

    /// Fraction of sequences used for training, rest for validation
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Dropout probability — randomly zeroes activations during
    /// training to prevent overfitting
    #[arg(long, default_value_t = 0.5)]
    pub dropout: f64,

    /// Seed for splitting, augmentation and batch shuffling.
    /// Same seed + same data = same run.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:           a.data_path,
            checkpoint_dir:      a.checkpoint_dir,
            export_dir:          a.export_dir,
            batch_size:          a.batch_size,
            epochs:              a.epochs,
            lr:                  a.lr,
            augmentation_factor: a.augmentation_factor,
            train_fraction:      a.train_fraction,
            dropout:             a.dropout,
            seed:                a.seed,
        }
    }
}

/// All arguments for the `export` command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Directory the export files are written to
    #[arg(long, default_value = "export")]
    pub export_dir: String,
}

/// All arguments for the `visualize` command
#[derive(Args, Debug)]
pub struct VisualizeArgs {
    /// JSON file with recorded face-tracking sequences
    #[arg(long, default_value = "data/sequences.json")]
    pub data_path: String,

    /// Directory the PNG plots are written to
    #[arg(long, default_value = "plots")]
    pub output_dir: String,

    /// Activity type to plot, e.g. "walking"
    #[arg(long, default_value = "walking")]
    pub activity: String,

    /// How many randomly chosen sequences to plot
    #[arg(long, default_value_t = 3)]
    pub count: usize,

    /// Seed for the random sequence selection
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl From<VisualizeArgs> for VisualizeConfig {
    fn from(a: VisualizeArgs) -> Self {
        VisualizeConfig {
            data_path:  a.data_path,
            output_dir: a.output_dir,
            activity:   a.activity,
            count:      a.count,
            seed:       a.seed,
        }
    }
}
