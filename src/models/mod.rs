pub mod enums;
pub mod report;
pub mod specs;

pub use enums::*;
pub use report::*;
pub use specs::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid value '{value}' for {field}")]
    InvalidEnum { field: String, value: String },
}
