//! Schema definitions for freight trip data
//!
//! The required-column list describes what an uploaded dataset must carry.
//! `FeatureSchema` is the categorical/numerical partition frozen at training
//! time and reused unchanged for every prediction against that model.

use serde::{Deserialize, Serialize};

/// Identifier column, kept for traceability but never used as a feature
pub const FREIGHT_DESCRIPTION: &str = "freight_description";
/// Binary target column
pub const DELAY_LABEL: &str = "delay_label";
pub const ROUTE_VARIANT_ID: &str = "route_variant_id";
pub const PLANNED_DEPARTURE_HOUR: &str = "planned_departure_hour";
pub const TRAFFIC_LEVEL_FORECAST: &str = "traffic_level_forecast";
pub const RAIN_FORECAST_MM: &str = "rain_forecast_mm";
pub const CARGO_WEIGHT_KG: &str = "cargo_weight_kg";
pub const VEHICLE_TYPE: &str = "vehicle_type";
pub const HISTORICAL_AVG_ROUTE_TIME_MIN: &str = "historical_avg_route_time_min";
pub const DISTANCE_KM: &str = "distance_km";

/// Columns every training dataset must contain
pub const REQUIRED_COLUMNS: [&str; 10] = [
    FREIGHT_DESCRIPTION,
    DELAY_LABEL,
    ROUTE_VARIANT_ID,
    PLANNED_DEPARTURE_HOUR,
    TRAFFIC_LEVEL_FORECAST,
    RAIN_FORECAST_MM,
    CARGO_WEIGHT_KG,
    VEHICLE_TYPE,
    HISTORICAL_AVG_ROUTE_TIME_MIN,
    DISTANCE_KM,
];

/// Columns that must be numeric in a dataset and in a prediction record
pub const NUMERIC_COLUMNS: [&str; 5] = [
    PLANNED_DEPARTURE_HOUR,
    RAIN_FORECAST_MM,
    CARGO_WEIGHT_KG,
    HISTORICAL_AVG_ROUTE_TIME_MIN,
    DISTANCE_KM,
];

/// Columns that may not contain missing values
pub const NON_NULL_COLUMNS: [&str; 8] = [
    DELAY_LABEL,
    PLANNED_DEPARTURE_HOUR,
    TRAFFIC_LEVEL_FORECAST,
    RAIN_FORECAST_MM,
    CARGO_WEIGHT_KG,
    VEHICLE_TYPE,
    HISTORICAL_AVG_ROUTE_TIME_MIN,
    DISTANCE_KM,
];

/// Columns never treated as features
pub const EXCLUDED_COLUMNS: [&str; 2] = [FREIGHT_DESCRIPTION, DELAY_LABEL];

pub const VALID_TRAFFIC_LEVELS: [&str; 3] = ["low", "medium", "high"];

pub const LABEL_DELAYED: &str = "delayed";
pub const LABEL_ON_TIME: &str = "on_time";
pub const VALID_DELAY_LABELS: [&str; 2] = [LABEL_DELAYED, LABEL_ON_TIME];

pub const MIN_DEPARTURE_HOUR: f64 = 0.0;
pub const MAX_DEPARTURE_HOUR: f64 = 23.0;

/// One feature column and how it is encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum FeatureColumn {
    /// One-hot encoded
    Categorical(String),
    /// Standardized
    Numerical(String),
}

impl FeatureColumn {
    pub fn name(&self) -> &str {
        match self {
            FeatureColumn::Categorical(name) | FeatureColumn::Numerical(name) => name,
        }
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self, FeatureColumn::Categorical(_))
    }
}

/// Frozen feature partition, in the dataset's original column order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    columns: Vec<FeatureColumn>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<FeatureColumn>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    /// Categorical column names in original order
    pub fn categorical(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.is_categorical())
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Numerical column names in original order
    pub fn numerical(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !c.is_categorical())
            .map(|c| c.name().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
