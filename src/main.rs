use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Parser;
use serde::Serialize;

use specsense_lib::config::{self, SpecSenseConfig};
use specsense_lib::{PipelineOutput, SpecPipeline};

/// Turn OCR text from cable datasheets into validated specifications.
#[derive(Debug, Parser)]
#[clap(
    version,
    after_help = r#"
Each input file holds the recognized text of one datasheet. With no files,
text is read from stdin. Output is one JSON object per document with
`specs` and `report` fields.

Configuration is read from --config, or from specsense.toml in the current
directory or any parent. Logging is controlled by RUST_LOG.
"#
)]
struct Opts {
    /// Recognized-text files to process.
    inputs: Vec<PathBuf>,

    /// Path to a TOML configuration file.
    #[clap(long, short = 'c')]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[clap(long)]
    pretty: bool,
}

/// One processed document as printed.
#[derive(Debug, Serialize)]
struct DocumentOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a Path>,
    #[serde(flatten)]
    output: PipelineOutput,
}

fn main() -> Result<()> {
    specsense_lib::init_tracing();

    let opts = Opts::parse();
    tracing::debug!(?opts, "Parsed options");
    tracing::info!("{} v{}", config::APP_NAME, config::APP_VERSION);

    let config = load_config(opts.config.as_deref())?;
    let pipeline = SpecPipeline::with_config(&config);

    if opts.inputs.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read text from stdin")?;
        let document = DocumentOutput {
            source: None,
            output: pipeline.process(&text),
        };
        return print_json(&document, opts.pretty);
    }

    let texts = opts
        .inputs
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let outputs = pipeline.process_batch(&texts);
    let documents: Vec<_> = opts
        .inputs
        .iter()
        .zip(outputs)
        .map(|(path, output)| DocumentOutput {
            source: Some(path.as_path()),
            output,
        })
        .collect();

    if let [single] = documents.as_slice() {
        print_json(single, opts.pretty)
    } else {
        print_json(&documents, opts.pretty)
    }
}

fn load_config(path: Option<&Path>) -> Result<SpecSenseConfig> {
    let config = match path {
        Some(path) => Some(SpecSenseConfig::from_toml_file(path)?),
        None => SpecSenseConfig::discover()?,
    };
    Ok(config.unwrap_or_default())
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
