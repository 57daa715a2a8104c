use crate::table::{DiseaseId, ReferenceTable, SymptomToken};
use std::collections::HashMap;

/// Score diseases by symptom overlap: +1 per distinct matched symptom a
/// disease is associated with. The per-symptom disease lists in the table
/// are already duplicate-free, so a symptom recorded in several historical
/// rows still contributes exactly 1 for that symptom.
///
/// Diseases with zero overlap never appear in the result. An empty matched
/// set yields an empty map.
pub fn score(matched: &[SymptomToken], table: &ReferenceTable) -> HashMap<DiseaseId, u32> {
    let mut scores: HashMap<DiseaseId, u32> = HashMap::new();
    for token in matched {
        let ids = table.diseases_for(token);
        tracing::debug!(%token, diseases = ids.len(), "symptom mapped");
        for &id in ids {
            *scores.entry(id).or_insert(0) += 1;
        }
    }
    scores
}
