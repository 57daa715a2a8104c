use crate::table::DiseaseId;
use std::collections::HashMap;

/// At most this many candidates are ever returned to the caller.
pub const MAX_CANDIDATES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredDisease {
    pub id: DiseaseId,
    pub score: u32,
}

/// Order scored diseases by score descending and keep the top 3.
///
/// Ties are broken by ascending `DiseaseId`, i.e. first-seen order in the
/// reference table. The original data gives no designed tie order, so this
/// is the one deterministic policy we commit to.
pub fn rank(scores: &HashMap<DiseaseId, u32>) -> Vec<ScoredDisease> {
    let mut ranked: Vec<ScoredDisease> = scores
        .iter()
        .map(|(&id, &score)| ScoredDisease { id, score })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
    ranked.truncate(MAX_CANDIDATES);
    ranked
}
