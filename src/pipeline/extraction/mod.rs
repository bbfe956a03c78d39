//! Term extraction: recognized datasheet text in, raw parameter values out.

pub mod extractor;
pub mod patterns;
pub mod sanitize;

pub use extractor::{extract_terms, find_candidates, Candidate};
pub use sanitize::sanitize_ocr_text;
