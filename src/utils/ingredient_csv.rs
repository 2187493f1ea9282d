//! Parsing of ingredient catalogue files.
//!
//! The file is a headerless two-column CSV: `name,measurement_unit`.

use std::io::Read;

use crate::domain::entities::NewIngredient;
use crate::domain::entities::ingredient::{
    INGREDIENT_NAME_MAX_LENGTH, MEASUREMENT_UNIT_MAX_LENGTH,
};

/// A row that could not be turned into an ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line number in the source file.
    pub line: u64,
    pub reason: String,
}

/// Result of parsing an ingredient file.
#[derive(Debug, Default)]
pub struct ParsedIngredients {
    pub ingredients: Vec<NewIngredient>,
    pub rejected: Vec<RejectedRow>,
}

/// Reads ingredients from CSV, trimming fields and collecting malformed rows
/// instead of failing on them.
pub fn parse_ingredients<R: Read>(reader: R) -> ParsedIngredients {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut parsed = ParsedIngredients::default();

    for (index, record) in csv_reader.records().enumerate() {
        let line = record
            .as_ref()
            .ok()
            .and_then(|r| r.position())
            .map(|p| p.line())
            .unwrap_or(index as u64 + 1);

        let record = match record {
            Ok(record) => record,
            Err(e) => {
                parsed.rejected.push(RejectedRow {
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match parse_record(&record) {
            Ok(ingredient) => parsed.ingredients.push(ingredient),
            Err(reason) => parsed.rejected.push(RejectedRow { line, reason }),
        }
    }

    parsed
}

fn parse_record(record: &csv::StringRecord) -> Result<NewIngredient, String> {
    if record.len() != 2 {
        return Err(format!("expected 2 columns, found {}", record.len()));
    }

    let name = &record[0];
    let unit = &record[1];

    if name.is_empty() || unit.is_empty() {
        return Err("name and measurement unit must not be empty".to_string());
    }
    if name.chars().count() > INGREDIENT_NAME_MAX_LENGTH {
        return Err(format!(
            "name is longer than {} characters",
            INGREDIENT_NAME_MAX_LENGTH
        ));
    }
    if unit.chars().count() > MEASUREMENT_UNIT_MAX_LENGTH {
        return Err(format!(
            "measurement unit is longer than {} characters",
            MEASUREMENT_UNIT_MAX_LENGTH
        ));
    }

    Ok(NewIngredient {
        name: name.to_string(),
        measurement_unit: unit.to_string(),
    })
}
