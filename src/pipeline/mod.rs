pub mod diagnosis;
pub mod source;

pub use diagnosis::{diagnose, diagnose_with, Diagnosis};
pub use source::{decode_image, load_image};
