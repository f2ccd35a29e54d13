// src/manifest/csv_input.rs
//! CSV manifest parsing
//!
//! Headers are matched by label, so column order does not matter and extra
//! columns are ignored. Both the platform's native (Korean) labels and
//! English aliases are accepted.

use csv::{ReaderBuilder, StringRecord};

use crate::error::{ManifestError, Result};
use crate::manifest::normalize::PassengerRow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Gender,
    Job,
    BirthDate,
    PhoneNumber,
    Condition,
}

const FIELDS: [(Field, &[&str]); 6] = [
    (Field::Name, &["이름", "name", "passenger_name"]),
    (Field::Gender, &["성별", "gender"]),
    (Field::Job, &["직업", "job"]),
    (Field::BirthDate, &["생년월일", "birth_date", "birth"]),
    (Field::PhoneNumber, &["전화번호", "phone_number", "phone", "contact"]),
    (
        Field::Condition,
        &["지병여부", "pre_existing_condition", "special_needs"],
    ),
];

#[derive(Debug)]
struct ColumnMap {
    name: usize,
    gender: usize,
    job: usize,
    birth_date: usize,
    phone_number: usize,
    condition: usize,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |labels: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim();
                labels.iter().any(|label| h.eq_ignore_ascii_case(label))
            })
        };

        let mut missing = Vec::new();
        let mut idx = [0usize; 6];
        for (slot, (field, labels)) in FIELDS.iter().enumerate() {
            match find(labels) {
                Some(i) => idx[slot] = i,
                None => missing.push(format!("{field:?} ({})", labels.join(" / "))),
            }
        }
        if !missing.is_empty() {
            return Err(ManifestError::InputFormat(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }

        Ok(ColumnMap {
            name: idx[0],
            gender: idx[1],
            job: idx[2],
            birth_date: idx[3],
            phone_number: idx[4],
            condition: idx[5],
        })
    }

    fn extract(&self, record: &StringRecord) -> PassengerRow {
        let get = |i: usize| record.get(i).unwrap_or_default().to_string();
        PassengerRow {
            name: get(self.name),
            gender: get(self.gender),
            job: get(self.job),
            birth_date: get(self.birth_date),
            phone_number: get(self.phone_number),
            pre_existing_condition: get(self.condition),
        }
    }
}

/// Parse a whole CSV manifest into raw rows.
///
/// Fails with `InputFormat` on invalid UTF-8, ragged rows, missing required
/// columns or an empty passenger name. A header with no data rows yields an
/// empty vector; what that means is decided by the caller's policy.
pub fn parse_manifest_csv(data: &[u8]) -> Result<Vec<PassengerRow>> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let columns = ColumnMap::resolve(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = columns.extract(&record);
        if row.name.trim().is_empty() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(ManifestError::InputFormat(format!(
                "line {line}: passenger name is empty"
            )));
        }
        rows.push(row);
    }
    Ok(rows)
}
