use crate::table::{normalize, DiseaseId, ReferenceTable};
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    // Quoted items inside a serialized-list cell: 'Antifungal Cream' or "bed rest"
    static ref LIST_ITEM: Regex = Regex::new(r#"'([^']*)'|"([^"]*)""#).expect("valid regex");
}

/// Parse a serialized-list-shaped cell like `['Antibiotics', 'Antipyretics']`
/// into its items. Anything that does not look like a bracketed list of
/// quoted strings degrades to an empty sequence.
pub fn parse_string_list(cell: &str) -> Vec<String> {
    let trimmed = cell.trim();
    if !trimmed.starts_with('[') || !trimmed.ends_with(']') {
        return Vec::new();
    }
    LIST_ITEM
        .captures_iter(trimmed)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Load the full reference table from a directory of CSV files.
///
/// `symptoms.csv` is required (the engine is useless without associations);
/// the four auxiliary files are optional and a missing one just logs a
/// warning and contributes nothing. Unreadable rows are skipped, not fatal.
/// Disease names are interned across all five files, so a disease that only
/// appears in an auxiliary table still gets a stable id.
pub fn load_reference_table(data_dir: &Path) -> Result<ReferenceTable> {
    let mut table = ReferenceTable::new();

    table.stats.symptom_rows = load_symptoms(&data_dir.join("symptoms.csv"), &mut table)?;
    table.stats.description_rows = load_pairs(
        &data_dir.join("descriptions.csv"),
        "Description",
        &mut table,
        |t, id, value| t.set_description(id, value),
    );
    table.stats.medication_rows = load_pairs(
        &data_dir.join("medications.csv"),
        "Medication",
        &mut table,
        |t, id, value| {
            let items = parse_string_list(value);
            if items.is_empty() {
                tracing::warn!(disease = %t.disease(id).name, "unparseable medication list cell");
            }
            t.add_medications(id, items);
        },
    );
    table.stats.precaution_rows = load_pairs(
        &data_dir.join("precautions.csv"),
        "Precaution",
        &mut table,
        |t, id, value| t.add_precaution(id, value),
    );
    table.stats.diet_rows = load_pairs(
        &data_dir.join("diets.csv"),
        "Diet",
        &mut table,
        |t, id, value| {
            let items = parse_string_list(value);
            if items.is_empty() {
                tracing::warn!(disease = %t.disease(id).name, "unparseable diet list cell");
            }
            t.add_diet(id, items);
        },
    );

    tracing::info!(
        diseases = table.num_diseases(),
        vocabulary = table.vocabulary_len(),
        "reference table loaded"
    );
    Ok(table)
}

/// Read `symptoms.csv`: a `Disease` column plus every column whose header
/// starts with `Symptom`. Symptom cells feed the vocabulary even when the
/// row's disease cell is blank; only rows with both sides form associations.
fn load_symptoms(path: &Path, table: &mut ReferenceTable) -> Result<usize> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = reader.headers()?.clone();
    let disease_col = headers
        .iter()
        .position(|h| h == "Disease")
        .with_context(|| format!("{} has no Disease column", path.display()))?;
    let symptom_cols: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.starts_with("Symptom"))
        .map(|(i, _)| i)
        .collect();

    let mut rows = 0usize;
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(line, %err, "skipping unreadable symptoms row");
                continue;
            }
        };
        let disease = record.get(disease_col).unwrap_or("").trim();
        let id = (!disease.is_empty()).then(|| table.intern(disease));
        for &col in &symptom_cols {
            let token = normalize(record.get(col).unwrap_or(""));
            if token.is_empty() {
                continue;
            }
            match id {
                Some(id) => table.add_association(id, &token),
                None => table.add_symptom(&token),
            }
        }
        rows += 1;
    }
    tracing::info!(rows, path = %path.display(), "symptoms loaded");
    Ok(rows)
}

/// Read one auxiliary table shaped as (Disease, <value_col>) rows and apply
/// each pair to the table. Missing file, missing columns, or bad rows are
/// logged and skipped. Returns the number of rows applied.
fn load_pairs(
    path: &Path,
    value_col: &str,
    table: &mut ReferenceTable,
    mut apply: impl FnMut(&mut ReferenceTable, DiseaseId, &str),
) -> usize {
    let mut reader = match csv::Reader::from_path(path) {
        Ok(reader) => reader,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "auxiliary table unavailable");
            return 0;
        }
    };
    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "unreadable auxiliary header");
            return 0;
        }
    };
    let (Some(disease_col), Some(value_idx)) = (
        headers.iter().position(|h| h == "Disease"),
        headers.iter().position(|h| h == value_col),
    ) else {
        tracing::warn!(path = %path.display(), value_col, "auxiliary table missing expected columns");
        return 0;
    };

    let mut rows = 0usize;
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(line, path = %path.display(), %err, "skipping unreadable row");
                continue;
            }
        };
        let disease = record.get(disease_col).unwrap_or("").trim();
        let value = record.get(value_idx).unwrap_or("").trim();
        if disease.is_empty() || value.is_empty() {
            continue;
        }
        let id = table.intern(disease);
        apply(table, id, value);
        rows += 1;
    }
    tracing::info!(rows, path = %path.display(), "auxiliary table loaded");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_quoted_lists() {
        assert_eq!(
            parse_string_list("['Antifungal Cream', 'Fluconazole']"),
            vec!["Antifungal Cream", "Fluconazole"]
        );
    }

    #[test]
    fn parses_double_quoted_lists() {
        assert_eq!(
            parse_string_list(r#"["bed rest", "fluids"]"#),
            vec!["bed rest", "fluids"]
        );
    }

    #[test]
    fn malformed_cells_degrade_to_empty() {
        assert!(parse_string_list("not a list").is_empty());
        assert!(parse_string_list("").is_empty());
        assert!(parse_string_list("[]").is_empty());
        assert!(parse_string_list("[unquoted, items]").is_empty());
    }
}
