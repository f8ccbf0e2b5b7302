pub mod directory;
pub mod filter;
pub mod markers;

pub use directory::{ClinicDirectory, ClinicRecord, UnderservedRegion};
pub use filter::{ClinicFilter, FilterCriteria, ServiceFacet};
pub use markers::MarkerRenderer;
