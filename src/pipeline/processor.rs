//! Pipeline orchestrator.
//!
//! Single entry point that drives the full text pipeline:
//! extract → correct → validate → keyword stage.
//!
//! Uses trait-based DI for the keyword stage (CableClassifier, KeywordRanker)
//! so the orchestrator remains fully testable with mock implementations.
//! A fault in the core stages, panics included, yields empty specs and an
//! `ERROR` report; a keyword failure only adds a warning.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::config::SpecSenseConfig;
use crate::models::{CableSpecs, KeywordDetails, KeywordResult, SpecMap, ValidationReport};
use crate::pipeline::correction::correct_specs;
use crate::pipeline::extraction::extract_terms;
use crate::pipeline::keywords::{CableClassifier, KeywordEngine, KeywordError, KeywordRanker};
use crate::pipeline::validation::{try_validate, ValidationError};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Faults in the core stages. Reported, never propagated to callers.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Internal fault in {stage} stage: {message}")]
    Panicked { stage: &'static str, message: String },
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Category reported in keyword details when the keyword stage fails.
pub const KEYWORD_ERROR_CATEGORY: &str = "Error";

/// Final `(specs, report)` pair for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub specs: CableSpecs,
    pub report: ValidationReport,
}

impl PipelineOutput {
    /// Empty specs with an `ERROR` report.
    pub fn fault(message: impl Into<String>) -> Self {
        Self {
            specs: CableSpecs::default(),
            report: ValidationReport::fault(message),
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Orchestrates one document through every stage.
///
/// Holds no mutable state; one instance can serve concurrent documents.
pub struct SpecPipeline {
    classifier: Box<dyn CableClassifier + Send + Sync>,
    ranker: Box<dyn KeywordRanker + Send + Sync>,
}

impl SpecPipeline {
    pub fn new(
        classifier: Box<dyn CableClassifier + Send + Sync>,
        ranker: Box<dyn KeywordRanker + Send + Sync>,
    ) -> Self {
        Self { classifier, ranker }
    }

    /// Pipeline using the built-in keyword engine.
    pub fn with_config(config: &SpecSenseConfig) -> Self {
        Self::new(
            Box::new(KeywordEngine::new(config.keywords.clone())),
            Box::new(KeywordEngine::new(config.keywords.clone())),
        )
    }

    /// Full pipeline over recognized text. Never fails.
    pub fn process(&self, raw_text: &str) -> PipelineOutput {
        match guard("extraction", || extract_terms(raw_text)) {
            Ok(raw) => self.process_extracted(raw_text, &raw),
            Err(e) => {
                tracing::warn!(error = %e, "Extraction fault");
                PipelineOutput::fault(e.to_string())
            }
        }
    }

    /// Pipeline from correction onward, for callers that extracted values themselves.
    /// `raw_text` still feeds the keyword stage.
    pub fn process_extracted(&self, raw_text: &str, raw: &SpecMap) -> PipelineOutput {
        let document_id = Uuid::new_v4();
        tracing::info!(
            document_id = %document_id,
            text_length = raw_text.len(),
            extracted = raw.len(),
            "Processing: starting correction and validation"
        );

        let (parameters, report) = match run_core(raw) {
            Ok(core) => core,
            Err(e) => {
                tracing::warn!(document_id = %document_id, error = %e, "Core pipeline fault");
                return PipelineOutput::fault(e.to_string());
            }
        };

        let mut output = PipelineOutput {
            specs: CableSpecs::from_parameters(parameters),
            report,
        };
        self.merge_keywords(&document_id, raw_text, &mut output);

        tracing::info!(
            document_id = %document_id,
            status = %output.report.status,
            parameters = output.specs.parameters.len(),
            errors = output.report.errors.len(),
            warnings = output.report.warnings.len(),
            "Processing complete"
        );

        output
    }

    /// Process independent documents concurrently. Results keep input order.
    pub fn process_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<PipelineOutput> {
        tracing::debug!(documents = texts.len(), "Processing batch");
        texts
            .par_iter()
            .map(|text| self.process(text.as_ref()))
            .collect()
    }

    fn run_keywords(&self, text: &str) -> Result<(String, KeywordResult), KeywordError> {
        let category = self.classifier.classify(text)?;
        let mut result = self.ranker.rank_keywords(text)?;
        result.category = category.clone();
        Ok((category, result))
    }

    /// Advisory stage: merge auxiliary fields on success, warn on failure.
    fn merge_keywords(&self, document_id: &Uuid, text: &str, output: &mut PipelineOutput) {
        let outcome = guard("keyword", || self.run_keywords(text))
            .unwrap_or_else(|e| Err(KeywordError::Engine(e.to_string())));
        match outcome {
            Ok((category, result)) => {
                let aux = &mut output.specs.auxiliary;
                aux.cable_category = Some(category.clone());
                if !result.top_terms.is_empty() {
                    let terms: Vec<&str> = result.top_terms.iter().map(|t| t.term.as_str()).collect();
                    aux.top_terms = Some(terms.join(", "));
                }
                aux.conductor_type_keyword = result.conductor_type_hint.clone();

                tracing::debug!(
                    document_id = %document_id,
                    category = %category,
                    terms = result.top_terms.len(),
                    "Keyword stage complete"
                );
                output.report.keyword_details = Some(KeywordDetails {
                    category,
                    extracted_data: Some(result),
                    full_text_debug: text.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(
                    document_id = %document_id,
                    error = %e,
                    "Keyword stage failed, continuing"
                );
                output
                    .report
                    .warnings
                    .push(format!("Keyword generation failed: {e}"));
                output.report.keyword_details = Some(KeywordDetails {
                    category: KEYWORD_ERROR_CATEGORY.to_string(),
                    extracted_data: None,
                    full_text_debug: text.to_string(),
                });
            }
        }
    }
}

impl Default for SpecPipeline {
    fn default() -> Self {
        Self::with_config(&SpecSenseConfig::default())
    }
}

/// Correct then validate; the report carries the correction log.
fn run_core(raw: &SpecMap) -> Result<(SpecMap, ValidationReport), PipelineError> {
    let (corrected, logs) = guard("correction", || correct_specs(raw))?;
    let mut report = guard("validation", || try_validate(&corrected))??;
    report.correction_logs = logs;
    Ok((corrected, report))
}

/// Run one stage, turning a panic into a `PipelineError`.
fn guard<T>(stage: &'static str, f: impl FnOnce() -> T) -> Result<T, PipelineError> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| PipelineError::Panicked {
        stage,
        message: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
