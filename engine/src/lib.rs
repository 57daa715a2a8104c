pub mod aggregate;
pub mod analyze;
pub mod dataset;
pub mod extract;
pub mod rank;
pub mod reason;
pub mod score;
pub mod table;

pub use table::{normalize, Disease, DiseaseId, ReferenceTable, SymptomToken};
