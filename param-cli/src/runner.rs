//! Batch execution.

use crate::backends::build_generator;
use crate::cli::Cli;
use crate::config::{extraction_prompt_file, resolve_model, REFINE_PROMPT_FILE};
use crate::errors::CliError;
use crate::setup::{load_schema, load_template};
use crate::sink::YamlSink;
use crate::snippets::{discover, Snippet};
use param_extract::capability::{ExtractParameters, Strategy};
use param_extract::extraction::ExtractionConfig;
use param_extract::prompt::PromptTemplate;
use param_extract::server::{CapabilityServer, Request};
use std::path::PathBuf;

/// What a batch produced.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Result files written, in processing order.
    pub written: Vec<PathBuf>,
    /// Names of snippets whose extraction or write failed.
    pub failed: Vec<String>,
}

impl BatchSummary {
    /// Whether every snippet succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs every snippet through the `extract_parameters` capability in order.
///
/// A failing snippet is logged and recorded; the batch continues with the
/// next one.
pub async fn run_batch(server: &CapabilityServer, snippets: &[Snippet], sink: &YamlSink) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for snippet in snippets {
        tracing::debug!(snippet = %snippet.name, "Processing snippet");
        match process(server, snippet, sink).await {
            Ok(path) => {
                println!("[OK] Wrote {}", path.display());
                summary.written.push(path);
            }
            Err(e) => {
                tracing::error!(snippet = %snippet.name, error = %e, "Snippet failed");
                summary.failed.push(snippet.name.clone());
            }
        }
    }

    summary
}

async fn process(server: &CapabilityServer, snippet: &Snippet, sink: &YamlSink) -> Result<PathBuf, CliError> {
    let request = Request::new(ExtractParameters::NAME, snippet.text.as_str());
    let result = server.handle(&request).await?;
    tracing::info!(snippet = %snippet.name, parameters = result.len(), "Extracted parameters");
    sink.write(&snippet.name, &result)
}

/// Builds the capability server for `cli` and runs the batch.
///
/// # Errors
///
/// Returns an error if setup fails: unknown model alias, unreadable schema,
/// templates or snippets, or an unavailable backend. Per-snippet failures are
/// reported in the summary instead.
pub async fn run(cli: &Cli) -> anyhow::Result<BatchSummary> {
    let model = resolve_model(&cli.model)?;
    let strategy = Strategy::from(cli.strategy);

    let schema = load_schema(&cli.schema)?;
    let built_in: fn() -> PromptTemplate = match strategy {
        Strategy::SingleShot if cli.model == "mistral" => PromptTemplate::mistral_extraction,
        Strategy::SingleShot => PromptTemplate::default_extraction,
        Strategy::Retry => PromptTemplate::structured_extraction,
    };
    let extract_template =
        load_template(&cli.prompts_dir, extraction_prompt_file(&cli.model, strategy), built_in)?;
    let refine_template = load_template(&cli.prompts_dir, REFINE_PROMPT_FILE, PromptTemplate::default_refinement)?;

    let generator = build_generator(cli.backend, model)?;
    tracing::info!(backend = cli.backend.as_str(), model, strategy = ?strategy, "Backend ready");

    let capability = ExtractParameters::new(generator, &schema)?
        .with_extract_template(extract_template)
        .with_refine_template(refine_template)
        .with_strategy(strategy)
        .with_config(ExtractionConfig::default().with_max_retries(cli.max_retries));
    let server = CapabilityServer::new().with_capability(capability);
    tracing::debug!(capabilities = ?server.names(), "Capabilities registered");

    let snippets = discover(&cli.snippets_dir, cli.selected_snippets())?;
    let sink = YamlSink::new(&cli.output_dir, &cli.model)?;

    let summary = run_batch(&server, &snippets, &sink).await;
    println!("\nAll snippets processed using model: {model}");
    Ok(summary)
}
