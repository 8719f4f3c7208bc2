//! Medical reports: list entries and the detail view.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    New,
    Viewed,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Viewed => write!(f, "viewed"),
        }
    }
}

/// Who a report belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSubject {
    pub name: String,
    pub gender: String,
    pub dob: String,
    pub record: String,
}

/// A report entry in the reports list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub name: String,
    /// Report type ("Blood Test", "X-Ray", "MRI", "ECG").
    pub kind: String,
    pub date: String,
    pub status: ReportStatus,
    pub subject: Option<ReportSubject>,
    /// Viewable location for scanned or uploaded documents.
    pub url: Option<String>,
}

impl Report {
    /// Case-insensitive match on name or type.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        q.is_empty() || self.name.to_lowercase().contains(&q) || self.kind.to_lowercase().contains(&q)
    }
}

/// Flag on a single lab result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultFlag {
    Normal,
    High,
    Low,
}

impl std::fmt::Display for ResultFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::High => write!(f, "high"),
            Self::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabResult {
    pub test: String,
    pub value: String,
    pub range: String,
    pub flag: ResultFlag,
}

/// Full report shown on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDetail {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub date: String,
    pub doctor: String,
    pub lab: String,
    pub results: Vec<LabResult>,
}

impl ReportDetail {
    /// Rows outside their reference range.
    pub fn abnormal(&self) -> impl Iterator<Item = &LabResult> {
        self.results.iter().filter(|r| r.flag != ResultFlag::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_search() {
        let r = Report {
            id: "2".to_string(),
            name: "Chest X-Ray".to_string(),
            kind: "X-Ray".to_string(),
            date: "2024-01-10".to_string(),
            status: ReportStatus::Viewed,
            subject: None,
            url: None,
        };
        assert!(r.matches("chest"));
        assert!(r.matches("x-ray"));
        assert!(!r.matches("mri"));
    }
}
