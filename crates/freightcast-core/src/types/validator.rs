//! Dataset and record validation against the required trip schema
//!
//! Validation never coerces: a quoted number in a numeric column is an error,
//! not a value to be parsed. Errors block training; warnings are informational.

use super::dataset::{ColumnType, Dataset, Record};
use super::schema::{
    DELAY_LABEL, MAX_DEPARTURE_HOUR, MIN_DEPARTURE_HOUR, NON_NULL_COLUMNS, NUMERIC_COLUMNS,
    PLANNED_DEPARTURE_HOUR, REQUIRED_COLUMNS, ROUTE_VARIANT_ID, TRAFFIC_LEVEL_FORECAST,
    VALID_DELAY_LABELS, VALID_TRAFFIC_LEVELS, VEHICLE_TYPE,
};
use super::value::Value;
use serde::{Deserialize, Serialize};

/// Outcome of validating a dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Hard errors; any entry makes the dataset invalid
    pub errors: Vec<String>,
    /// Soft findings that never block processing
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a training dataset against the required schema.
pub fn validate_dataset(dataset: &Dataset) -> ValidationReport {
    let mut validator = DatasetValidator::default();
    validator.check_columns(dataset);
    validator.check_types(dataset);
    validator.check_value_sets(dataset);
    validator.check_missing(dataset);
    validator.report
}

/// Validate a single prediction record.
///
/// Returns every problem found; an `Ok` result means the record can be scored.
pub fn validate_record(record: &Record) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for field in NUMERIC_COLUMNS {
        match record.get(field) {
            None => errors.push(format!("Field '{}' is required", field)),
            Some(v) if !v.is_numeric() => errors.push(format!("Field '{}' must be numeric", field)),
            Some(_) => {}
        }
    }

    if let Some(hour) = record.get(PLANNED_DEPARTURE_HOUR).and_then(Value::as_f64) {
        if !(MIN_DEPARTURE_HOUR..=MAX_DEPARTURE_HOUR).contains(&hour) {
            errors.push(format!(
                "{} must be between 0 and 23",
                PLANNED_DEPARTURE_HOUR
            ));
        }
    }

    match record.get(TRAFFIC_LEVEL_FORECAST) {
        None | Some(Value::Null) => errors.push(format!(
            "Field '{}' is required",
            TRAFFIC_LEVEL_FORECAST
        )),
        Some(v) => {
            let valid = v
                .as_str()
                .map(|s| VALID_TRAFFIC_LEVELS.contains(&s))
                .unwrap_or(false);
            if !valid {
                errors.push(format!(
                    "{} must be one of: {}",
                    TRAFFIC_LEVEL_FORECAST,
                    VALID_TRAFFIC_LEVELS.join(", ")
                ));
            }
        }
    }

    for field in [VEHICLE_TYPE, ROUTE_VARIANT_ID] {
        if record.get(field).map(Value::is_null).unwrap_or(true) {
            errors.push(format!("Field '{}' is required", field));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[derive(Default)]
struct DatasetValidator {
    report: ValidationReport,
}

impl DatasetValidator {
    fn error(&mut self, msg: String) {
        self.report.errors.push(msg);
    }

    fn check_columns(&mut self, dataset: &Dataset) {
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !dataset.has_column(c))
            .collect();
        if !missing.is_empty() {
            self.error(format!("Missing required columns: {}", missing.join(", ")));
        }

        let extra: Vec<&str> = dataset
            .column_names()
            .filter(|c| !REQUIRED_COLUMNS.contains(c))
            .collect();
        if !extra.is_empty() {
            self.report.warnings.push(format!(
                "Extra columns outside the required schema: {}",
                extra.join(", ")
            ));
        }
    }

    fn check_types(&mut self, dataset: &Dataset) {
        for name in NUMERIC_COLUMNS {
            let Some(column) = dataset.column(name) else {
                continue;
            };

            if column.dtype() != ColumnType::Numeric {
                self.error(format!("{} must be numeric", name));
                continue;
            }

            if name == PLANNED_DEPARTURE_HOUR {
                let out_of_range = column
                    .values
                    .iter()
                    .filter_map(Value::as_f64)
                    .filter(|h| !(MIN_DEPARTURE_HOUR..=MAX_DEPARTURE_HOUR).contains(h))
                    .count();
                if out_of_range > 0 {
                    self.error(format!(
                        "{} must be between 0 and 23. Found {} invalid values.",
                        PLANNED_DEPARTURE_HOUR, out_of_range
                    ));
                }
            }
        }
    }

    fn check_value_sets(&mut self, dataset: &Dataset) {
        for (name, valid) in [
            (TRAFFIC_LEVEL_FORECAST, &VALID_TRAFFIC_LEVELS[..]),
            (DELAY_LABEL, &VALID_DELAY_LABELS[..]),
        ] {
            let Some(column) = dataset.column(name) else {
                continue;
            };

            // Distinct offenders in order of first appearance. Nulls are left
            // to the completeness check.
            let mut offenders: Vec<String> = Vec::new();
            for value in column.values.iter().filter(|v| !v.is_null()) {
                let is_valid = value.as_str().map(|s| valid.contains(&s)).unwrap_or(false);
                let label = value.to_string();
                if !is_valid && !offenders.contains(&label) {
                    offenders.push(label);
                }
            }

            if !offenders.is_empty() {
                self.error(format!(
                    "{} must be one of: [{}]. Found: [{}]",
                    name,
                    valid.join(", "),
                    offenders.join(", ")
                ));
            }
        }
    }

    fn check_missing(&mut self, dataset: &Dataset) {
        for name in NON_NULL_COLUMNS {
            if let Some(column) = dataset.column(name) {
                let nulls = column.null_count();
                if nulls > 0 {
                    self.error(format!("Column '{}' has {} missing values", name, nulls));
                }
            }
        }
    }
}
