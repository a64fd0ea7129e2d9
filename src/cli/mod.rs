// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and routes each subcommand to Layer 2 or straight to the
// inference adapter. Nothing here computes a prediction itself.

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use commands::{Commands, PredictArgs, SchemaArgs, ServeArgs};
use crate::application::predict_use_case::{PredictUseCase, PredictionOutcome};
use crate::application::serve_use_case::{ServeConfig, ServeUseCase};
use crate::data::{catalog, decoder};
use crate::domain::input::RawFields;
use crate::infra::config_store::ConfigFile;
use crate::ml::inferencer::InferenceAdapter;

/// Top-level CLI
#[derive(Parser, Debug)]
#[command(
    name = "koi-screener",
    version,
    about = "Serve a web form that screens Kepler Objects of Interest with a pre-built classifier."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve(args)   => run_serve(args),
            Commands::Predict(args) => run_predict(args),
            Commands::Schema(args)  => run_schema(args),
        }
    }
}

fn categorical_or_default(given: Vec<String>) -> Vec<String> {
    if given.is_empty() {
        catalog::default_categorical()
    } else {
        given
    }
}

/// defaults → config file → flags, then serve
fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = ServeConfig::default();
    if let Some(path) = &args.config {
        config = config.with_file(ConfigFile::load(path)?);
    }
    let config = args.apply(config);

    tracing::info!(
        "Starting server (model='{}', addr='{}')",
        config.model_path,
        config.bind_addr,
    );
    ServeUseCase::new(config).execute()
}

/// One guarded prediction; a field file that doesn't decode or an
/// evaluation failure prints the error string just like the page
/// would, and still exits successfully. A field file that can't be
/// read at all is fatal.
fn run_predict(args: PredictArgs) -> Result<()> {
    let categorical = categorical_or_default(args.categorical);
    let adapter     = InferenceAdapter::from_artifact(&args.model, &categorical)?;
    let use_case    = PredictUseCase::new(Arc::new(adapter));

    let field_file = match &args.json {
        Some(path) => Some((
            path.as_str(),
            std::fs::read(path).with_context(|| format!("Cannot read field file '{path}'"))?,
        )),
        None => None,
    };
    let outcome = predict_with_field_file(
        &use_case,
        field_file.as_ref().map(|(path, bytes)| (*path, bytes.as_slice())),
        args.fields,
    );

    if args.detailed {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.display());
    }

    if let PredictionOutcome::Success(report) = &outcome {
        tracing::debug!("label={} probability={:.4}", report.label.0, report.probability);
    }
    Ok(())
}

/// Fields from the optional JSON file, overridden by `--field` pairs,
/// then predicted. A file that doesn't decode becomes the outcome.
fn predict_with_field_file(
    use_case:   &PredictUseCase,
    field_file: Option<(&str, &[u8])>,
    fields:     Vec<(String, String)>,
) -> PredictionOutcome {
    let mut raw = match field_file {
        Some((path, bytes)) => match decoder::decode_json(bytes)
            .with_context(|| format!("Invalid field file '{path}'"))
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("{e:#}");
                return PredictionOutcome::failure(&e);
            }
        },
        None => RawFields::new(),
    };
    for (name, value) in fields {
        raw.insert(name, value);
    }
    use_case.predict_fields(&raw)
}

fn run_schema(args: SchemaArgs) -> Result<()> {
    let categorical = categorical_or_default(args.categorical);
    let adapter     = InferenceAdapter::from_artifact(&args.model, &categorical)?;

    for (i, column) in adapter.schema().columns().iter().enumerate() {
        println!("{:>3}  {:<12}  {}", i, column.kind.as_str(), column.name);
    }
    Ok(())
}
