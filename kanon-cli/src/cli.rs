//! Command-line interface definition

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "kanon",
    version,
    about = "Anonymize datasets via a remote anonymization service and inspect the returned privacy KPIs"
)]
pub struct Cli {
    /// Base URL of the anonymization API
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Base URL of the canonicalization service
    #[arg(long, global = true)]
    pub canonical_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a dataset for anonymization
    Anonymize(AnonymizeArgs),

    /// Extract privacy KPIs from a stored response
    Kpis(KpisArgs),

    /// Remove KPI entries from a stored graph response
    Strip(StripArgs),

    /// Convert a stored JSON-LD response to Turtle
    Canonicalize(CanonicalizeArgs),
}

#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// URL of the externally hosted anonymization configuration
    #[arg(long)]
    pub config_url: Option<String>,

    /// Payload shape to submit
    #[arg(long, value_enum, default_value_t = Shape::JsonLd)]
    pub shape: Shape,

    /// Attribute prefix (flat shape only)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Dataset file (stdin when omitted)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Stored request document to pre-fill from
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Return original values next to the anonymized ones
    #[arg(long)]
    pub include_original_data: bool,

    /// Submit without the adjusted-attribute-name suffix
    #[arg(long)]
    pub no_adjusted_attributes: bool,

    /// Skip KPI calculation
    #[arg(long)]
    pub no_kpi: bool,

    /// Write the response here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct KpisArgs {
    /// Response file (stdin when omitted)
    pub input: Option<PathBuf>,

    /// Force a payload shape instead of auto-detecting
    #[arg(long, value_enum)]
    pub shape: Option<Shape>,

    /// Print the summary as JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct StripArgs {
    /// Response file (stdin when omitted)
    pub input: Option<PathBuf>,

    /// Write the stripped payload here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CanonicalizeArgs {
    /// Response file (stdin when omitted)
    pub input: Option<PathBuf>,

    /// Write the Turtle here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Payload shapes accepted by the anonymization service
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    JsonLd,
    Flat,
}
