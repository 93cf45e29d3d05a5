use serde::{Deserialize, Serialize};

use crate::verification::clamp_risk;

/// Outcome attached to a matched marker or to the fallback branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentVerdict {
    pub verified: bool,
    pub risk_score: u8,
    pub reason: String,
}

impl DocumentVerdict {
    fn new(verified: bool, risk_score: u8, reason: &str) -> Self {
        Self {
            verified,
            risk_score,
            reason: reason.to_string(),
        }
    }
}

/// Substring that, when present in a document identifier, selects a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMarker {
    pub needle: String,
    pub verdict: DocumentVerdict,
}

/// Ordered marker table; the first marker found in the identifier wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRules {
    pub markers: Vec<DocumentMarker>,
    pub fallback: DocumentVerdict,
}

impl Default for DocumentRules {
    fn default() -> Self {
        let marker = |needle: &str, verdict| DocumentMarker {
            needle: needle.to_string(),
            verdict,
        };

        Self {
            markers: vec![
                marker(
                    "FAKE",
                    DocumentVerdict::new(false, 95, "Document appears to be fraudulent"),
                ),
                marker(
                    "HIGH",
                    DocumentVerdict::new(true, 75, "Document verified but flagged for review"),
                ),
                marker(
                    "MEDIUM",
                    DocumentVerdict::new(true, 45, "Document verified with moderate confidence"),
                ),
            ],
            fallback: DocumentVerdict::new(true, 10, "Document verified successfully"),
        }
    }
}

impl DocumentRules {
    /// Case-insensitive marker lookup over `document_id`.
    pub fn assess(&self, document_id: &str) -> DocumentVerdict {
        let haystack = document_id.to_uppercase();
        let mut verdict = self
            .markers
            .iter()
            .find(|marker| haystack.contains(&marker.needle.to_uppercase()))
            .map(|marker| marker.verdict.clone())
            .unwrap_or_else(|| self.fallback.clone());
        verdict.risk_score = clamp_risk(i32::from(verdict.risk_score));
        verdict
    }
}
