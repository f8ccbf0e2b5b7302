use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// A point-of-interest entry: a legal clinic or NGO with location and
/// service tags.
///
/// Records are static for the session and never mutated. `id` is unique
/// within a directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicRecord {
    pub id: u32,
    pub name: String,
    pub position: LatLng,
    pub services: Vec<String>,
}

impl ClinicRecord {
    pub fn new(id: u32, name: &str, lat: f64, lng: f64, services: &[&str]) -> Self {
        Self {
            id,
            name: name.to_string(),
            position: LatLng::new(lat, lng),
            services: services.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// An area known to be underserved by legal-aid providers, drawn as a
/// circle overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderservedRegion {
    pub id: u32,
    pub center: LatLng,
    /// Radius in meters
    pub radius_m: f64,
}

/// The session's clinic directory.
///
/// In this implementation the directory is an in-memory list; a production
/// collaborator would serve the same records over HTTP.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicDirectory {
    records: Vec<ClinicRecord>,
}

impl ClinicDirectory {
    pub fn new(records: Vec<ClinicRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ClinicRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn by_id(&self, id: u32) -> Option<&ClinicRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// All distinct service tags across the directory, sorted.
    ///
    /// Feeds the service facet selector.
    pub fn all_services(&self) -> Vec<String> {
        let mut services: Vec<String> = self
            .records
            .iter()
            .flat_map(|record| record.services.iter().cloned())
            .collect();
        services.sort();
        services.dedup();
        services
    }

    /// The directory used by the legal-aid deployment: twenty clinics around
    /// the default map center.
    pub fn sample() -> Self {
        Self::new(vec![
            ClinicRecord::new(
                1,
                "Justice League Law Firm",
                19.1971,
                72.9718,
                &["Criminal Defense", "Civil Rights", "Family Law"],
            ),
            ClinicRecord::new(
                2,
                "Legal Aid Society",
                19.198,
                72.973,
                &["Immigration Law", "Employment Law", "Tenant Rights"],
            ),
            ClinicRecord::new(
                3,
                "Innocence Project",
                19.1955,
                72.9765,
                &["Criminal Appeals", "Wrongful Convictions"],
            ),
            ClinicRecord::new(
                4,
                "Family First Law Center",
                19.2,
                72.97,
                &["Divorce", "Child Custody", "Domestic Violence"],
            ),
            ClinicRecord::new(
                5,
                "Hope Legal Services",
                19.1995,
                72.974,
                &["Consumer Rights", "Contract Disputes", "Real Estate Law"],
            ),
            ClinicRecord::new(
                6,
                "Green Justice",
                19.1968,
                72.968,
                &["Environmental Law", "Land Disputes"],
            ),
            ClinicRecord::new(
                7,
                "Equal Rights Advocates",
                19.1945,
                72.975,
                &["Gender Equality", "Workplace Discrimination"],
            ),
            ClinicRecord::new(
                8,
                "Women's Legal Aid",
                19.1985,
                72.9775,
                &["Sexual Harassment", "Domestic Violence", "Family Law"],
            ),
            ClinicRecord::new(
                9,
                "Future Justice",
                19.2005,
                72.979,
                &["Juvenile Law", "Education Law"],
            ),
            ClinicRecord::new(
                10,
                "Defenders of Law",
                19.1925,
                72.965,
                &["Criminal Defense", "Civil Rights", "Employment Law"],
            ),
            ClinicRecord::new(
                11,
                "Water Rights Legal Aid",
                19.191,
                72.9615,
                &["Water Law", "Environmental Law", "Public Policy"],
            ),
            ClinicRecord::new(
                12,
                "Rise and Defend",
                19.202,
                72.9665,
                &["Human Rights", "Asylum Cases", "Civil Liberties"],
            ),
            ClinicRecord::new(
                13,
                "Law for Education",
                19.1935,
                72.978,
                &["Student Rights", "University Policies", "Disability Rights"],
            ),
            ClinicRecord::new(
                14,
                "Child Protection Law Center",
                19.199,
                72.9805,
                &["Child Welfare", "Adoption", "Foster Care Rights"],
            ),
            ClinicRecord::new(
                15,
                "Health Rights Advocates",
                19.195,
                72.9635,
                &["Medical Malpractice", "Patient Rights", "Insurance Disputes"],
            ),
            ClinicRecord::new(
                16,
                "Save the Innocent",
                19.2065,
                72.9705,
                &["Wrongful Convictions", "Criminal Appeals"],
            ),
            ClinicRecord::new(
                17,
                "Dream Legal Solutions",
                19.2045,
                72.96,
                &["Business Law", "Startup Legalities", "Intellectual Property"],
            ),
            ClinicRecord::new(
                18,
                "Youth Defense Lawyers",
                19.188,
                72.966,
                &["Juvenile Defense", "Youth Criminal Law"],
            ),
            ClinicRecord::new(
                19,
                "New Horizons Legal Center",
                19.1955,
                72.9825,
                &["Immigration Law", "Refugee Rights"],
            ),
            ClinicRecord::new(
                20,
                "Better Tomorrow Law Firm",
                19.1915,
                72.9735,
                &["Bankruptcy", "Debt Settlement", "Financial Law"],
            ),
        ])
    }

    /// The region overlays used by the deployment
    pub fn sample_regions() -> Vec<UnderservedRegion> {
        vec![
            UnderservedRegion {
                id: 1,
                center: LatLng::new(19.198, 72.975),
                radius_m: 500.0,
            },
            UnderservedRegion {
                id: 2,
                center: LatLng::new(19.19, 72.97),
                radius_m: 300.0,
            },
        ]
    }
}
