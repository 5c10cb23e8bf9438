//! Single-record scoring and risk bucketing

use freightcast_core::types::schema::{LABEL_DELAYED, LABEL_ON_TIME};
use freightcast_core::{Dataset, Record};
use serde::{Deserialize, Serialize};

use crate::artifact::TrainedArtifact;
use crate::error::Result;

/// Upper bound (exclusive) of the low risk tier
pub const LOW_RISK_BELOW: f64 = 0.30;
/// Upper bound (exclusive) of the medium risk tier
pub const MEDIUM_RISK_BELOW: f64 = 0.70;
/// Probability at or above which a trip is labeled delayed
pub const DELAYED_AT_OR_ABOVE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_probability(probability: f64) -> Self {
        if probability < LOW_RISK_BELOW {
            RiskLevel::Low
        } else if probability < MEDIUM_RISK_BELOW {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            RiskLevel::Low => "green",
            RiskLevel::Medium => "yellow",
            RiskLevel::High => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayLabel {
    Delayed,
    OnTime,
}

impl DelayLabel {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= DELAYED_AT_OR_ABOVE {
            DelayLabel::Delayed
        } else {
            DelayLabel::OnTime
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DelayLabel::Delayed => LABEL_DELAYED,
            DelayLabel::OnTime => LABEL_ON_TIME,
        }
    }
}

/// Score of one trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// P(delayed)
    pub probability: f64,
    /// `probability * 100`, rounded to two decimals
    pub probability_percent: f64,
    pub risk_level: RiskLevel,
    pub risk_color: String,
    pub binary_label: DelayLabel,
}

impl PredictionResult {
    pub fn from_probability(probability: f64) -> Self {
        let risk_level = RiskLevel::from_probability(probability);
        Self {
            probability,
            probability_percent: (probability * 100.0 * 100.0).round() / 100.0,
            risk_level,
            risk_color: risk_level.color().to_string(),
            binary_label: DelayLabel::from_probability(probability),
        }
    }
}

impl TrainedArtifact {
    /// Score one record with the frozen schema and pipeline. Fields outside
    /// the schema are ignored; schema fields the record lacks are missing.
    pub fn predict(&self, record: &Record) -> Result<PredictionResult> {
        let columns: Vec<&str> = self.schema.columns().iter().map(|c| c.name()).collect();
        let row = Dataset::from_records(&columns, std::slice::from_ref(record))?;

        let x = self.pipeline.preprocessor.transform(&row);
        let proba = self.pipeline.forest.predict_proba(&x)?;
        let probability = proba.first().copied().unwrap_or_default().clamp(0.0, 1.0);

        Ok(PredictionResult::from_probability(probability))
    }
}
