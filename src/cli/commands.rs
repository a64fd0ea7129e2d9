// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//
//   serve    — start the web form
//   predict  — one prediction from the command line
//   schema   — print the column order the artifact was fit with
//
// Settings the serve command shares with the config file are
// Options here, so "not given" can be told apart from "given
// with the default value" when layering flags over the file.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};

use crate::application::serve_use_case::ServeConfig;
use crate::infra::artifact_store::DEFAULT_ARTIFACT_PATH;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the prediction form over HTTP
    Serve(ServeArgs),

    /// Predict once from fields given on the command line or in a JSON file
    Predict(PredictArgs),

    /// Print the ordered feature schema of a pipeline artifact
    Schema(SchemaArgs),
}

/// Arguments for the `serve` command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to the pipeline artifact (JSON)
    #[arg(long)]
    pub model: Option<String>,

    /// Address to listen on, e.g. 127.0.0.1:5000
    #[arg(long)]
    pub addr: Option<String>,

    /// Optional JSON config file; flags given here take precedence over it
    #[arg(long)]
    pub config: Option<String>,

    /// Categorical column name (repeatable); defaults to the catalog's list
    #[arg(long = "categorical")]
    pub categorical: Vec<String>,
}

impl ServeArgs {
    /// Overlay explicitly given flags onto an already resolved config
    pub fn apply(self, mut config: ServeConfig) -> ServeConfig {
        if let Some(m) = self.model {
            config.model_path = m;
        }
        if let Some(a) = self.addr {
            config.bind_addr = a;
        }
        if !self.categorical.is_empty() {
            config.categorical_features = self.categorical;
        }
        config
    }
}

/// Arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Path to the pipeline artifact (JSON)
    #[arg(long, default_value = DEFAULT_ARTIFACT_PATH)]
    pub model: String,

    /// A field as name=value (repeatable)
    #[arg(long = "field", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,

    /// JSON file holding an object of field values; --field entries win on conflict
    #[arg(long)]
    pub json: Option<String>,

    /// Print label and probability as JSON instead of the message
    #[arg(long)]
    pub detailed: bool,

    /// Categorical column name (repeatable); defaults to the catalog's list
    #[arg(long = "categorical")]
    pub categorical: Vec<String>,
}

/// Arguments for the `schema` command
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Path to the pipeline artifact (JSON)
    #[arg(long, default_value = DEFAULT_ARTIFACT_PATH)]
    pub model: String,

    /// Categorical column name (repeatable); defaults to the catalog's list
    #[arg(long = "categorical")]
    pub categorical: Vec<String>,
}

/// Parse `name=value`. The value may itself contain '='.
pub fn parse_field(s: &str) -> Result<(String, String)> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected name=value, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("field name is empty in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}
