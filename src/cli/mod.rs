// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `train`     — trains the classifier on recorded sequences
//   2. `export`    — packages the latest checkpoint for mobile
//   3. `visualize` — renders diagnostic PNGs for sequences
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, ExportArgs, TrainArgs, VisualizeArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "face-activity",
    version = "0.1.0",
    about = "Train an activity classifier on face-tracking sequences and export it for mobile."
)]
pub struct Cli {
    /// The subcommand to run (train, export or visualize)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    ///
    /// `run` consumes the Cli: the args structs own their strings and
    /// move straight into the use-case configs, so the handlers are
    /// associated functions rather than methods.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)     => Self::run_train(args),
            Commands::Export(args)    => Self::run_export(args),
            Commands::Visualize(args) => Self::run_visualize(args),
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on sequences in: {}", args.data_path);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Checkpoint saved.");
        Ok(())
    }

    /// Handles the `export` subcommand.
    /// Rebuilds the model from the latest checkpoint and packages it.
    fn run_export(args: ExportArgs) -> Result<()> {
        use crate::application::export_use_case::ExportUseCase;

        let use_case = ExportUseCase::new(args.checkpoint_dir, args.export_dir);
        use_case.execute()
    }

    /// Handles the `visualize` subcommand.
    fn run_visualize(args: VisualizeArgs) -> Result<()> {
        use crate::application::visualize_use_case::VisualizeUseCase;

        let use_case = VisualizeUseCase::new(args.into());
        use_case.execute()
    }
}
