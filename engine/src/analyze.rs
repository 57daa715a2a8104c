use crate::aggregate::{aggregate, DiseaseDetails};
use crate::extract::extract;
use crate::rank::rank;
use crate::reason::explain;
use crate::score::score;
use crate::table::{ReferenceTable, SymptomToken};
use serde::Serialize;
use thiserror::Error;

/// Minimum number of recognized symptoms required before scoring runs.
pub const MIN_SYMPTOMS: usize = 1;

/// Why an analysis could not produce a ranking. Each variant is a distinct
/// failure kind so callers never have to parse message text; recognition
/// failures carry the partial extraction so the caller can show what was
/// understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    #[error("Symptoms field is required and cannot be empty")]
    EmptyInput,
    #[error("Insufficient symptoms. Please provide at least one known medical symptom.")]
    NoSymptomsRecognized { matched: Vec<SymptomToken> },
    #[error("No diseases could be matched to the provided symptoms.")]
    NoDiseaseMatch { matched: Vec<SymptomToken> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub name: String,
    pub confidence: f64,
    pub symptom_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub received_symptoms: String,
    pub matched_symptoms: Vec<SymptomToken>,
    pub candidates: Vec<RankedCandidate>,
    pub reasoning: String,
    pub details: DiseaseDetails,
}

/// Share of total matched symptoms this disease accounts for, clamped to
/// 1.0 and rounded to two decimal places.
pub fn confidence(score: u32, matched: usize) -> f64 {
    if matched == 0 {
        return 0.0;
    }
    let raw = (f64::from(score) / matched as f64).min(1.0);
    (raw * 100.0).round() / 100.0
}

/// Run the full pipeline: extract -> score -> rank -> explain + aggregate.
///
/// The table is read-only; every intermediate value is created fresh for
/// this call and dropped with the result, so repeated calls with the same
/// input and table are identical.
pub fn analyze(text: &str, table: &ReferenceTable) -> Result<Analysis, AnalyzeError> {
    let received = text.trim();
    if received.is_empty() {
        return Err(AnalyzeError::EmptyInput);
    }

    let matched = extract(received, table);
    if matched.len() < MIN_SYMPTOMS {
        return Err(AnalyzeError::NoSymptomsRecognized { matched });
    }
    tracing::debug!(count = matched.len(), "symptoms recognized");

    let scores = score(&matched, table);
    if scores.is_empty() {
        return Err(AnalyzeError::NoDiseaseMatch { matched });
    }

    let ranked = rank(&scores);
    let candidates = ranked
        .iter()
        .enumerate()
        .map(|(i, entry)| RankedCandidate {
            rank: i + 1,
            name: table.disease(entry.id).name.clone(),
            confidence: confidence(entry.score, matched.len()),
            symptom_count: entry.score,
        })
        .collect();

    let reasoning = explain(&matched, ranked[0], &ranked[1..], table);
    let details = aggregate(&ranked, table);

    Ok(Analysis {
        received_symptoms: received.to_string(),
        matched_symptoms: matched,
        candidates,
        reasoning,
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_clamped_and_rounded() {
        assert_eq!(confidence(3, 4), 0.75);
        assert_eq!(confidence(4, 4), 1.0);
        assert_eq!(confidence(5, 4), 1.0);
        assert_eq!(confidence(1, 3), 0.33);
        assert_eq!(confidence(2, 3), 0.67);
        assert_eq!(confidence(1, 0), 0.0);
    }

    #[test]
    fn blank_input_is_rejected_before_extraction() {
        let table = ReferenceTable::new();
        assert_eq!(analyze("   ", &table), Err(AnalyzeError::EmptyInput));
    }
}
