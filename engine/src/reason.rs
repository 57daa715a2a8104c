use crate::rank::ScoredDisease;
use crate::table::{ReferenceTable, SymptomToken};

/// Fixed closing sentence appended to every generated explanation.
pub const CONSULT_NOTE: &str =
    "Please consult a qualified healthcare professional for proper diagnosis and treatment.";

/// Build the human-readable explanation for a ranking outcome.
///
/// One sentence names the matched symptoms and the top disease, a second
/// qualifies confidence by score (>= 3 high likelihood, == 2 moderate,
/// otherwise further evaluation), then any rank 2-3 alternates are listed,
/// and the consultation note always closes the text.
pub fn explain(
    matched: &[SymptomToken],
    top: ScoredDisease,
    others: &[ScoredDisease],
    table: &ReferenceTable,
) -> String {
    let name = &table.disease(top.id).name;
    if matched.is_empty() || top.score == 0 {
        return format!("Unable to generate reasoning for {name}");
    }

    let mut reasoning = format!(
        "The prediction is based on the presence of {} matching symptom(s): {} commonly associated with {}. ",
        top.score,
        matched.join(", "),
        name
    );
    reasoning.push_str(match top.score {
        s if s >= 3 => "The strong symptom overlap indicates a high likelihood of this condition.",
        2 => "The moderate symptom overlap suggests this condition is worth investigating.",
        _ => "While symptoms are present, further evaluation is recommended.",
    });

    if !others.is_empty() {
        let alternates: Vec<String> = others
            .iter()
            .map(|s| format!("{} ({} symptom(s))", table.disease(s.id).name, s.score))
            .collect();
        reasoning.push_str(&format!(
            " Other possible conditions include: {}.",
            alternates.join(", ")
        ));
    }

    reasoning.push(' ');
    reasoning.push_str(CONSULT_NOTE);
    reasoning
}
