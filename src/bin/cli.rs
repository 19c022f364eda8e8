// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe Dupes CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polyframe_dupes::cli::{Reporter, Runner};
use polyframe_dupes::{io, DetectionConfig, MatchStrategy};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polyframe-dupes")]
#[command(about = "Polyframe Dupes - find duplicate meshes and duplicate faces", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Point-set pairing for faces (first-fit, bipartite)
    #[arg(short, long, global = true)]
    strategy: Option<MatchStrategy>,

    /// Compare pairs on all cores
    #[arg(short, long, global = true)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find meshes with coinciding world-space bounding boxes
    Meshes {
        /// Input scene file (JSON)
        input: PathBuf,

        /// Bounding box tolerance
        #[arg(short, long)]
        tolerance: Option<f64>,
    },

    /// Find coinciding faces within each mesh
    Faces {
        /// Input scene file (JSON)
        input: PathBuf,

        /// Vertex position tolerance
        #[arg(short, long)]
        tolerance: Option<f64>,

        /// Only scan the mesh with this label
        #[arg(short, long)]
        mesh: Option<String>,
    },

    /// Run both passes over a scene
    Scan {
        /// Input scene file (JSON)
        input: PathBuf,

        /// Write the report as JSON
        #[arg(short, long, value_name = "FILE")]
        json: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = DetectionConfig::from_file(path)?;
            config.apply_env(|key| std::env::var(key).ok())?;
            config
        }
        None => DetectionConfig::load()?,
    };
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    if cli.parallel {
        config.parallel = true;
    }

    match cli.command {
        Commands::Meshes { input, tolerance } => {
            if let Some(tolerance) = tolerance {
                config.mesh_tolerance = tolerance;
            }
            meshes_command(&input, config)?;
        }
        Commands::Faces {
            input,
            tolerance,
            mesh,
        } => {
            if let Some(tolerance) = tolerance {
                config.face_tolerance = tolerance;
            }
            faces_command(&input, mesh.as_deref(), config)?;
        }
        Commands::Scan { input, json } => {
            scan_command(&input, json.as_deref(), config, cli.verbose)?;
        }
        Commands::Version => {
            println!("Polyframe Dupes v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn check_input(input: &Path) -> Result<()> {
    if !input.exists() {
        Reporter::report_error(&format!("Input file not found: {}", input.display()));
        std::process::exit(1);
    }
    Ok(())
}

fn meshes_command(input: &Path, config: DetectionConfig) -> Result<()> {
    check_input(input)?;

    let runner = Runner::new(config)?;
    let run = runner.run_meshes(input)?;

    Reporter::report_duplicate_meshes(
        &run.label_pairs(),
        run.scene.len(),
        runner.config().mesh_tolerance,
        run.duration,
    );
    Ok(())
}

fn faces_command(input: &Path, mesh: Option<&str>, config: DetectionConfig) -> Result<()> {
    check_input(input)?;

    let runner = Runner::new(config)?;
    let run = runner.run_faces(input, mesh)?;

    Reporter::report_duplicate_faces(&run.reports, runner.config().face_tolerance, run.duration);
    Ok(())
}

fn scan_command(input: &Path, json: Option<&Path>, config: DetectionConfig, verbose: bool) -> Result<()> {
    check_input(input)?;

    let runner = Runner::new(config)?;
    let run = runner.run_scan(input)?;

    Reporter::report_scan(&run.report, run.duration);

    if let Some(output) = json {
        io::write_report(&run.report, output)
            .with_context(|| format!("Failed to write JSON report to {}", output.display()))?;
        if verbose {
            Reporter::report_info(&format!("Report written to: {}", output.display()));
        }
    }

    Ok(())
}
