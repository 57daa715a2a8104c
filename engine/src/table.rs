use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use unicode_normalization::UnicodeNormalization;

pub type DiseaseId = u32;
pub type SymptomToken = String;

/// Normalize a symptom token or free-text input: NFKC, lowercase, trim.
/// The same normalization is applied to vocabulary and request text so
/// case and width differences never affect matching.
pub fn normalize(s: &str) -> String {
    let folded = s.nfkc().collect::<String>().to_lowercase();
    folded.trim().to_string()
}

#[derive(Debug, Clone)]
pub struct Disease {
    /// Display name, original casing from the first row that named it.
    pub name: String,
    /// Union of symptom tokens across every reference row for this disease.
    pub symptoms: HashSet<SymptomToken>,
    pub description: Option<String>,
    pub medications: Vec<String>,
    pub precautions: Vec<String>,
    pub diet: Vec<String>,
}

/// Row counts observed while loading each reference file.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct TableStats {
    pub symptom_rows: usize,
    pub description_rows: usize,
    pub medication_rows: usize,
    pub precaution_rows: usize,
    pub diet_rows: usize,
}

/// Disease/symptom reference data, built once at startup and read-only
/// afterwards (share behind an `Arc`; nothing mutates it post-load).
///
/// Diseases are interned in first-seen order; `DiseaseId` is the index into
/// `diseases`. That order doubles as the documented tie-break when ranking.
/// The symptom index is inverted (token -> disease ids, de-duplicated at
/// build time) and keyed by a `BTreeMap` so vocabulary iteration, and hence
/// extraction output, is deterministic.
#[derive(Debug, Default)]
pub struct ReferenceTable {
    diseases: Vec<Disease>,
    by_name: HashMap<String, DiseaseId>,
    symptom_index: BTreeMap<SymptomToken, Vec<DiseaseId>>,
    pub stats: TableStats,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `name`, allocating a new entry on first sight.
    /// Lookup is case-insensitive; the first-seen casing is kept for display.
    pub fn intern(&mut self, name: &str) -> DiseaseId {
        let key = normalize(name);
        if let Some(&id) = self.by_name.get(&key) {
            return id;
        }
        let id = self.diseases.len() as DiseaseId;
        self.diseases.push(Disease {
            name: name.trim().to_string(),
            symptoms: HashSet::new(),
            description: None,
            medications: Vec::new(),
            precautions: Vec::new(),
            diet: Vec::new(),
        });
        self.by_name.insert(key, id);
        id
    }

    /// Add a token to the vocabulary without tying it to any disease.
    /// Rows with a symptom value but no disease still contribute here.
    pub fn add_symptom(&mut self, token: &str) {
        let token = normalize(token);
        if token.is_empty() {
            return;
        }
        self.symptom_index.entry(token).or_default();
    }

    /// Record that `id` has `token` among its symptoms. The per-token
    /// disease list is kept duplicate-free so a symptom repeated across
    /// several historical rows can never double-count in scoring.
    pub fn add_association(&mut self, id: DiseaseId, token: &str) {
        let token = normalize(token);
        if token.is_empty() {
            return;
        }
        self.diseases[id as usize].symptoms.insert(token.clone());
        let ids = self.symptom_index.entry(token).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    /// First description wins; later rows for the same disease are ignored.
    pub fn set_description(&mut self, id: DiseaseId, description: &str) {
        let entry = &mut self.diseases[id as usize];
        if entry.description.is_none() {
            entry.description = Some(description.to_string());
        }
    }

    pub fn add_medications(&mut self, id: DiseaseId, names: Vec<String>) {
        self.diseases[id as usize].medications.extend(names);
    }

    pub fn add_precaution(&mut self, id: DiseaseId, precaution: &str) {
        self.diseases[id as usize]
            .precautions
            .push(precaution.to_string());
    }

    pub fn add_diet(&mut self, id: DiseaseId, items: Vec<String>) {
        self.diseases[id as usize].diet.extend(items);
    }

    pub fn disease(&self, id: DiseaseId) -> &Disease {
        &self.diseases[id as usize]
    }

    pub fn lookup(&self, name: &str) -> Option<DiseaseId> {
        self.by_name.get(&normalize(name)).copied()
    }

    /// Disease ids associated with `token`, in first-seen reference order.
    /// Unknown tokens yield an empty slice.
    pub fn diseases_for(&self, token: &str) -> &[DiseaseId] {
        self.symptom_index
            .get(token)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every known symptom token, in sorted order.
    pub fn vocabulary(&self) -> impl Iterator<Item = &SymptomToken> {
        self.symptom_index.keys()
    }

    pub fn num_diseases(&self) -> usize {
        self.diseases.len()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.symptom_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptom_index.is_empty()
    }
}
