use crate::rank::ScoredDisease;
use crate::table::ReferenceTable;
use serde::Serialize;
use std::collections::HashSet;

/// Advisory dosage used when the reference data carries no patient-specific
/// dosage (it never does).
pub const DEFAULT_DOSAGE: &str = "As prescribed by healthcare provider";

/// Placeholder when the top disease has no description row.
pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DietPlan {
    pub recommended: Vec<String>,
    pub avoid: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseDetails {
    pub description: String,
    pub medications: Vec<Medication>,
    pub precautions: Vec<String>,
    pub diet: DietPlan,
}

/// Merge auxiliary metadata across the ranked candidates.
///
/// The description comes from the rank 1 disease only; medications,
/// precautions and diet recommendations are unioned across the whole
/// ranked list, de-duplicated with first-seen order preserved. A disease
/// missing from an auxiliary table simply contributes nothing.
///
/// `diet.avoid` stays empty: the reference data records recommendations
/// only. Known gap in the source data, not in this code.
pub fn aggregate(ranked: &[ScoredDisease], table: &ReferenceTable) -> DiseaseDetails {
    let description = ranked
        .first()
        .and_then(|top| table.disease(top.id).description.clone())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let mut medications = Vec::new();
    let mut precautions = Vec::new();
    let mut recommended = Vec::new();
    let mut seen_medications = HashSet::new();
    let mut seen_precautions = HashSet::new();
    let mut seen_diet = HashSet::new();

    for entry in ranked {
        let disease = table.disease(entry.id);
        for name in &disease.medications {
            if seen_medications.insert(name.clone()) {
                medications.push(Medication {
                    name: name.clone(),
                    dosage: DEFAULT_DOSAGE.to_string(),
                });
            }
        }
        for precaution in &disease.precautions {
            if seen_precautions.insert(precaution.clone()) {
                precautions.push(precaution.clone());
            }
        }
        for item in &disease.diet {
            if seen_diet.insert(item.clone()) {
                recommended.push(item.clone());
            }
        }
    }

    DiseaseDetails {
        description,
        medications,
        precautions,
        diet: DietPlan {
            recommended,
            avoid: Vec::new(),
        },
    }
}
