//! Subcommand implementations
//!
//! Dataset input comes from a file or stdin, results go to stdout or a
//! file. The KPI report goes to stderr so the response itself stays
//! pipeable.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::info;

use kanon_common::api::{FlatJsonRequest, JsonLdRequest};
use kanon_common::kpi::{extract_flat_kpis, extract_graph_kpis, strip_kpi_entries, KpiSet};

use crate::canonical::CanonicalClient;
use crate::cli::{AnonymizeArgs, CanonicalizeArgs, KpisArgs, Shape, StripArgs};
use crate::client::AnonymizerClient;
use crate::config::Endpoints;
use crate::output::render_kpi_report;

const NO_KPIS_MESSAGE: &str = "No KPIs found in response.";

/// Stored request document: configuration URL, optional prefix,
/// dataset, and request flags in one JSON file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestFile {
    configuration_url: Option<String>,
    prefix: Option<String>,
    data: Option<Value>,
    include_original_data: Option<bool>,
    use_adjusted_attributes: Option<bool>,
}

impl RequestFile {
    fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?;
        let document: Value = serde_json::from_str(&content)
            .with_context(|| format!("Request file {} is not valid JSON", path.display()))?;

        let mut request: RequestFile = serde_json::from_value(document.clone())
            .unwrap_or_default();
        // A document without a `data` field is the dataset itself
        if request.data.is_none() {
            request.data = Some(document);
        }
        Ok(request)
    }
}

pub async fn anonymize(args: AnonymizeArgs, endpoints: &Endpoints) -> Result<()> {
    let request_file = match &args.request {
        Some(path) => RequestFile::load(path)?,
        None => RequestFile::default(),
    };

    let configuration_url = args
        .config_url
        .or(request_file.configuration_url)
        .context("Configuration URL required (--config-url or a request file)")?;

    let data = match &args.data {
        Some(path) => parse_json(&read_input(Some(path))?)?,
        None => match request_file.data {
            Some(data) => data,
            None => parse_json(&read_input(None)?)?,
        },
    };

    // Flags: request-file values first, explicit flags on top
    let mut include_original_data = request_file.include_original_data.unwrap_or(false);
    let mut use_adjusted_attributes = request_file.use_adjusted_attributes.unwrap_or(true);
    if args.include_original_data {
        include_original_data = true;
    }
    if args.no_adjusted_attributes {
        use_adjusted_attributes = false;
    }
    let calculate_kpi = !args.no_kpi;

    let client = AnonymizerClient::new(&endpoints.api_url)?;

    let response = match args.shape {
        Shape::JsonLd => {
            let mut request = JsonLdRequest::new(configuration_url, data);
            request.calculate_kpi = calculate_kpi;
            request.include_original_data = include_original_data;
            request.use_adjusted_attributes = use_adjusted_attributes;
            client.anonymize_json_ld(&request).await?
        }
        Shape::Flat => {
            let prefix = args
                .prefix
                .or(request_file.prefix)
                .context("Flat shape requires a prefix (--prefix or a request file)")?;
            let records = match data {
                Value::Array(records) => records,
                _ => bail!("Flat JSON data must be an array"),
            };
            let mut request = FlatJsonRequest::new(configuration_url, prefix, records);
            request.calculate_kpi = calculate_kpi;
            request.include_original_data = include_original_data;
            request.use_adjusted_attributes = use_adjusted_attributes;
            client.anonymize_flat_json(&request).await?
        }
    };

    if calculate_kpi {
        let kpis = match args.shape {
            Shape::JsonLd => extract_graph_kpis(&response),
            Shape::Flat => extract_flat_kpis(&response),
        };
        report_kpis(kpis.as_deref());
    }

    write_output(args.output.as_deref(), &to_pretty_json(&response)?)
}

pub fn kpis(args: KpisArgs) -> Result<()> {
    let payload = parse_json(&read_input(args.input.as_deref())?)?;

    let kpis = match args.shape {
        Some(Shape::JsonLd) => extract_graph_kpis(&payload),
        Some(Shape::Flat) => extract_flat_kpis(&payload),
        // Auto-detect: graph first, flat otherwise
        None => extract_graph_kpis(&payload).or_else(|| extract_flat_kpis(&payload)),
    };

    match kpis {
        Some(sets) if args.json => println!("{}", to_pretty_json(&sets)?),
        Some(sets) => print!("{}", render_kpi_report(&sets)),
        None => eprintln!("{}", NO_KPIS_MESSAGE),
    }
    Ok(())
}

pub fn strip(args: StripArgs) -> Result<()> {
    let payload = parse_json(&read_input(args.input.as_deref())?)?;
    let stripped = strip_kpi_entries(&payload);
    write_output(args.output.as_deref(), &to_pretty_json(&stripped)?)
}

pub async fn canonicalize(args: CanonicalizeArgs, endpoints: &Endpoints) -> Result<()> {
    let payload = parse_json(&read_input(args.input.as_deref())?)?;

    // The canonicalization service should not see indicator metadata
    let stripped = strip_kpi_entries(&payload);

    let client = CanonicalClient::new(&endpoints.canonical_url)?;
    let turtle = client.canonicalize(&stripped).await?;

    write_output(args.output.as_deref(), &turtle)
}

fn report_kpis(kpis: Option<&[KpiSet]>) {
    match kpis {
        Some(sets) => eprint!("{}", render_kpi_report(sets)),
        None => eprintln!("{}", NO_KPIS_MESSAGE),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn parse_json(content: &str) -> Result<Value> {
    serde_json::from_str(content).context("Invalid JSON format")
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize result")
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Result written");
            Ok(())
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}
