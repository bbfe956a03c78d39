pub mod vocabulary; // Shared material and standards vocabulary
pub mod extraction; // Raw text → raw parameter values
pub mod correction; // OCR repair and unit normalization
pub mod validation; // Engineering rule set
pub mod keywords; // Advisory category + ranked terms
pub mod processor; // Orchestrator

pub use processor::{PipelineError, PipelineOutput, SpecPipeline};
