// src/manifest/normalize.rs
//! Per-row field normalization (pure, no I/O)

use crate::crypto::SensitiveRecord;
use crate::enums::GenderCode;

/// One passenger as it arrives from the tabular source, before normalization
#[derive(Clone, Default)]
pub struct PassengerRow {
    pub name: String,
    pub gender: String,
    pub job: String,
    pub birth_date: String,
    pub phone_number: String,
    pub pre_existing_condition: String,
}

impl std::fmt::Debug for PassengerRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassengerRow")
            .field("name", &self.name)
            .field("gender", &self.gender)
            .field("job", &self.job)
            .finish_non_exhaustive()
    }
}

/// Normalized identity fields plus the record that still has to be sealed
#[derive(Debug, Clone)]
pub struct NormalizedPassenger {
    pub name: String,
    pub gender: GenderCode,
    pub job: Option<String>,
    pub sensitive: SensitiveRecord,
}

/// "male" / "female" (trimmed, any case) → M / F; everything else → Other
pub fn normalize_gender(raw: &str) -> GenderCode {
    let value = raw.trim();
    if value.eq_ignore_ascii_case("male") {
        GenderCode::Male
    } else if value.eq_ignore_ascii_case("female") {
        GenderCode::Female
    } else {
        GenderCode::Other
    }
}

/// Only the literal "true" (trimmed, any case) counts as a pre-existing condition
pub fn normalize_condition(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

pub fn normalize_row(row: &PassengerRow) -> NormalizedPassenger {
    let job = row.job.trim();
    NormalizedPassenger {
        name: row.name.clone(),
        gender: normalize_gender(&row.gender),
        job: (!job.is_empty()).then(|| row.job.clone()),
        sensitive: SensitiveRecord::new(
            row.birth_date.trim(),
            row.phone_number.trim(),
            normalize_condition(&row.pre_existing_condition),
        ),
    }
}
