//! Patient records as shown in the doctor's patient list.

use serde::{Deserialize, Serialize};

/// Clinical status badge on a patient card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    Active,
    Inactive,
    Critical,
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// A document attached to a patient (lab result, scan, upload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDocument {
    pub id: String,
    pub name: String,
    pub summary: String,
    /// Viewable location. Seed documents have none.
    pub url: Option<String>,
}

impl PatientDocument {
    /// Resolve the viewable location.
    ///
    /// # Errors
    /// Returns the user-facing message when no file is attached.
    pub fn view_url(&self) -> Result<&str, String> {
        self.url
            .as_deref()
            .ok_or_else(|| "No file available to view.".to_string())
    }
}

/// A patient on the doctor's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub condition: String,
    /// ISO date of the last visit.
    pub last_visit: String,
    pub status: PatientStatus,
    pub phone: String,
    pub documents: Vec<PatientDocument>,
}

impl PatientRecord {
    /// Case-insensitive match on name or condition. An empty query matches all.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        q.is_empty()
            || self.name.to_lowercase().contains(&q)
            || self.condition.to_lowercase().contains(&q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PatientRecord {
        PatientRecord {
            id: "2".to_string(),
            name: "Mary Smith".to_string(),
            age: 32,
            condition: "Diabetes Type 2".to_string(),
            last_visit: "2024-01-12".to_string(),
            status: PatientStatus::Active,
            phone: "+1 (555) 234-5678".to_string(),
            documents: vec![PatientDocument {
                id: "d3".to_string(),
                name: "Glucose Report.pdf".to_string(),
                summary: "Blood sugar levels are stable.".to_string(),
                url: None,
            }],
        }
    }

    #[test]
    fn test_search_by_name_or_condition() {
        let p = sample();
        assert!(p.matches("mary"));
        assert!(p.matches("DIABETES"));
        assert!(p.matches(""));
        assert!(!p.matches("asthma"));
    }

    #[test]
    fn test_document_without_url() {
        let p = sample();
        assert!(p.documents[0].view_url().is_err());
    }
}
