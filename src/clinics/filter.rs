use crate::clinics::directory::{ClinicDirectory, ClinicRecord};

/// Service facet of the filter: either no restriction or one exact tag
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServiceFacet {
    #[default]
    All,
    Only(String),
}

impl ServiceFacet {
    fn matches(&self, record: &ClinicRecord) -> bool {
        match self {
            ServiceFacet::All => true,
            ServiceFacet::Only(service) => record.services.iter().any(|tag| tag == service),
        }
    }
}

/// User-controlled filter state: free-text search plus an optional service
/// facet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub search_text: String,
    pub service: ServiceFacet,
}

impl FilterCriteria {
    pub fn with_search(search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            service: ServiceFacet::All,
        }
    }

    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            search_text: String::new(),
            service: ServiceFacet::Only(service.into()),
        }
    }
}

/// Pure derivation of the filtered clinic set from directory + criteria
pub struct ClinicFilter;

impl ClinicFilter {
    /// Applies the criteria to the directory.
    ///
    /// Deterministic and side-effect free. Name matching is a
    /// case-insensitive substring match on `name` only; service filtering is
    /// exact tag membership. Empty search text matches everything, and
    /// [`ServiceFacet::All`] bypasses the service predicate entirely. The
    /// result preserves the directory's original relative order.
    pub fn apply<'a>(
        directory: &'a ClinicDirectory,
        criteria: &FilterCriteria,
    ) -> Vec<&'a ClinicRecord> {
        let needle = criteria.search_text.to_lowercase();

        directory
            .records()
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&needle))
            .filter(|record| criteria.service.matches(record))
            .collect()
    }
}
