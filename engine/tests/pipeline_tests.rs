use engine::analyze::{analyze, AnalyzeError};
use engine::ReferenceTable;

fn associate(table: &mut ReferenceTable, disease: &str, symptoms: &[&str]) {
    let id = table.intern(disease);
    for symptom in symptoms {
        table.add_association(id, symptom);
    }
}

/// Reference data for the overlap scenarios: a fixed four-token vocabulary
/// where Pneumonia covers three tokens and Common Cold two.
fn respiratory_table() -> ReferenceTable {
    let mut table = ReferenceTable::new();
    associate(&mut table, "Pneumonia", &["fever", "cough", "chills"]);
    associate(&mut table, "Common Cold", &["cough", "body ache"]);
    table
}

#[test]
fn single_symptom_maps_to_its_disease() {
    let mut table = ReferenceTable::new();
    associate(&mut table, "Fungal infection", &["itching"]);

    let analysis = analyze("itching", &table).unwrap();
    assert_eq!(analysis.matched_symptoms, vec!["itching"]);
    assert_eq!(analysis.candidates.len(), 1);
    assert_eq!(analysis.candidates[0].name, "Fungal infection");
    assert_eq!(analysis.candidates[0].rank, 1);
    assert_eq!(analysis.candidates[0].symptom_count, 1);
    assert_eq!(analysis.candidates[0].confidence, 1.0);
    assert!(analysis.reasoning.contains("further evaluation is recommended"));
}

#[test]
fn overlap_ranks_pneumonia_above_common_cold() {
    let table = respiratory_table();
    let analysis = analyze("fever, cough, body ache, chills", &table).unwrap();

    assert_eq!(analysis.matched_symptoms.len(), 4);
    assert_eq!(analysis.candidates[0].name, "Pneumonia");
    assert_eq!(analysis.candidates[0].symptom_count, 3);
    assert_eq!(analysis.candidates[0].confidence, 0.75);
    assert_eq!(analysis.candidates[1].name, "Common Cold");
    assert_eq!(analysis.candidates[1].symptom_count, 2);
    assert_eq!(analysis.candidates[1].confidence, 0.5);
    assert!(analysis.reasoning.contains("high likelihood"));
    assert!(analysis
        .reasoning
        .contains("Other possible conditions include: Common Cold (2 symptom(s))"));
}

#[test]
fn unrecognized_text_is_a_recognition_failure() {
    let table = respiratory_table();
    let err = analyze("xyzxyz", &table).unwrap_err();
    assert_eq!(err, AnalyzeError::NoSymptomsRecognized { matched: vec![] });
}

#[test]
fn recognized_symptom_without_association_is_a_distinct_failure() {
    // sparse table: the token is in the vocabulary but tied to no disease
    let mut table = ReferenceTable::new();
    table.add_symptom("itching");

    let err = analyze("itching", &table).unwrap_err();
    assert_eq!(
        err,
        AnalyzeError::NoDiseaseMatch {
            matched: vec!["itching".to_string()]
        }
    );
    // different kind than plain non-recognition
    assert_ne!(
        err.to_string(),
        AnalyzeError::NoSymptomsRecognized { matched: vec![] }.to_string()
    );
}

#[test]
fn never_more_than_three_candidates_and_scores_non_increasing() {
    let mut table = ReferenceTable::new();
    associate(&mut table, "A", &["fever", "cough", "chills"]);
    associate(&mut table, "B", &["fever", "cough"]);
    associate(&mut table, "C", &["fever"]);
    associate(&mut table, "D", &["chills"]);

    let analysis = analyze("fever and cough with chills", &table).unwrap();
    assert_eq!(analysis.candidates.len(), 3);
    for pair in analysis.candidates.windows(2) {
        assert!(pair[0].symptom_count >= pair[1].symptom_count);
    }
    for candidate in &analysis.candidates {
        assert!(candidate.confidence >= 0.0 && candidate.confidence <= 1.0);
        assert!(candidate.symptom_count >= 1);
        assert!(candidate.symptom_count as usize <= analysis.matched_symptoms.len());
    }
}

#[test]
fn equal_scores_keep_reference_table_order() {
    let mut table = ReferenceTable::new();
    associate(&mut table, "First Seen", &["fever"]);
    associate(&mut table, "Second Seen", &["fever"]);

    let analysis = analyze("fever", &table).unwrap();
    assert_eq!(analysis.candidates[0].name, "First Seen");
    assert_eq!(analysis.candidates[1].name, "Second Seen");
}

#[test]
fn analyze_is_idempotent() {
    let table = respiratory_table();
    let first = analyze("fever, cough, body ache, chills", &table).unwrap();
    let second = analyze("fever, cough, body ache, chills", &table).unwrap();
    assert_eq!(first, second);
}
