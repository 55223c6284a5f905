//! RCF Trainer CLI
//!
//! Trains batch RCF detectors and RCF summaries on CSV data and writes
//! predictions alongside a checksummed model artifact.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rcf_core::{BatchRcfParams, DistanceType, ModelPayload, RcfSummarizeParams, TrainingDataPolicy};
use rcf_trainer::{
    detect, load_dataset, load_model, save_model, summarize, write_frame_to_path, Dataset,
    RunOutput, TrainerConfig, PREDICTIONS_FILE,
};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "rcf-trainer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Random cut forest anomaly detection and summarization", long_about = None)]
struct Cli {
    /// TOML file with [batch_rcf] / [rcf_summarize] tables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score rows with a batch random cut forest
    Detect {
        #[command(flatten)]
        io: RunArgs,

        #[arg(long)]
        trees: Option<i32>,

        #[arg(long)]
        sample_size: Option<i32>,

        /// Leading rows reported with score 0
        #[arg(long)]
        output_after: Option<i32>,

        /// Rows used for training (0 = all)
        #[arg(long)]
        training_data_size: Option<i32>,

        /// Fail instead of truncating when the training size does not match
        #[arg(long)]
        strict: bool,

        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Label rows with the nearest cluster of an RCF summary
    Summarize {
        #[command(flatten)]
        io: RunArgs,

        #[arg(long)]
        max_k: Option<i32>,

        #[arg(long)]
        initial_k: Option<i32>,

        /// l1, l2 or linfinity
        #[arg(long)]
        distance: Option<DistanceType>,

        /// Skip reassignment after each merge
        #[arg(long)]
        no_reassign: bool,
    },
    /// Verify a stored model and print its metadata
    Inspect {
        /// Model artifact path
        model: PathBuf,

        /// Also print the model as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// CSV rows to score or label
    #[arg(short, long)]
    input: PathBuf,

    /// CSV rows to train on (defaults to the input)
    #[arg(short, long)]
    train: Option<PathBuf>,

    /// Use a stored model instead of training
    #[arg(short, long, conflicts_with = "train")]
    model: Option<PathBuf>,

    /// Output directory for predictions, model and hash
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    #[arg(long)]
    seed: Option<u64>,

    /// Build trees and reassign points on the rayon pool
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("RCF Trainer v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => TrainerConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TrainerConfig::default(),
    };

    match cli.command {
        Commands::Detect {
            io,
            trees,
            sample_size,
            output_after,
            training_data_size,
            strict,
            threshold,
        } => {
            let base = config.batch_rcf;
            let params = BatchRcfParams {
                number_of_trees: trees.or(base.number_of_trees),
                sample_size: sample_size.or(base.sample_size),
                output_after: output_after.or(base.output_after),
                training_data_size: training_data_size.or(base.training_data_size),
                training_data_policy: if strict {
                    Some(TrainingDataPolicy::Strict)
                } else {
                    base.training_data_policy
                },
                anomaly_score_threshold: threshold.or(base.anomaly_score_threshold),
                seed: io.seed.or(base.seed),
                parallel: if io.parallel { Some(true) } else { base.parallel },
            };
            let (train, input, model) = load_inputs(&io)?;
            let output = detect(&params, train.as_ref(), &input, model)?;
            write_outputs(&io.output, &output)
        }
        Commands::Summarize {
            io,
            max_k,
            initial_k,
            distance,
            no_reassign,
        } => {
            let base = config.rcf_summarize;
            let params = RcfSummarizeParams {
                max_k: max_k.or(base.max_k),
                initial_k: initial_k.or(base.initial_k),
                distance_type: distance.or(base.distance_type),
                phase1_reassign: if no_reassign { Some(false) } else { base.phase1_reassign },
                parallel: if io.parallel { Some(true) } else { base.parallel },
                seed: io.seed.or(base.seed),
            };
            let (train, input, model) = load_inputs(&io)?;
            let output = summarize(&params, train.as_ref(), &input, model)?;
            write_outputs(&io.output, &output)
        }
        Commands::Inspect { model, json } => inspect(&model, json),
    }
}

fn load_inputs(io: &RunArgs) -> Result<(Option<Dataset>, Dataset, Option<rcf_core::ModelArtifact>)> {
    let input = load_dataset(&io.input).context("Failed to load dataset")?;
    let train = io
        .train
        .as_deref()
        .map(|path| load_dataset(path).context("Failed to load training dataset"))
        .transpose()?;
    let model = io
        .model
        .as_deref()
        .map(|path| {
            info!("Loading model from: {}", path.display());
            load_model(path).context("Failed to load model")
        })
        .transpose()?;
    Ok((train, input, model))
}

fn write_outputs(dir: &Path, output: &RunOutput) -> Result<()> {
    let saved = save_model(dir, &output.model).context("Failed to save model")?;

    let predictions_path = dir.join(PREDICTIONS_FILE);
    write_frame_to_path(&predictions_path, &output.predictions)
        .context("Failed to write predictions")?;

    info!("✓ {} completed", output.model.name());
    info!("  Predictions: {} ({} rows)", predictions_path.display(), output.predictions.size());
    info!("  Model: {}", saved.model_path.display());
    info!("  Hash: {} ({})", saved.hash_path.display(), saved.hash);
    Ok(())
}

fn inspect(path: &Path, json: bool) -> Result<()> {
    let model = load_model(path).context("Failed to load model")?;
    info!("Algorithm: {}", model.name());
    info!("Version: {}", model.version());
    info!("Hash: {}", model.content_hash_hex()?);
    match model.payload() {
        ModelPayload::Forest(forest) => {
            info!(
                "Forest: {} trees, sample size {}, {} dimensions",
                forest.num_trees(),
                forest.sample_size(),
                forest.dimensions()
            );
        }
        ModelPayload::Summary(summary) => {
            info!(
                "Summary: {} clusters, {} dimensions, {}",
                summary.len(),
                summary.dimensions(),
                summary.distance_type()
            );
            for point in summary.summary_points() {
                info!(
                    "  cluster {}: weight {}, centroid {:?}",
                    point.label, point.weight, point.centroid
                );
            }
        }
    }
    if json {
        println!("{}", model.to_json_pretty()?);
    }
    Ok(())
}
