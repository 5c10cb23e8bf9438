//! Shared fixtures for repository tests

#![allow(dead_code)]

use freightcast_core::Dataset;
use freightcast_model::{train, ForestParams, ModelVersion, TrainedArtifact, TrainingOptions};

const HEADER: &str = "freight_description,delay_label,route_variant_id,planned_departure_hour,traffic_level_forecast,rain_forecast_mm,cargo_weight_kg,vehicle_type,historical_avg_route_time_min,distance_km";

/// Small deterministic dataset: heavy traffic plus rain is delayed
pub fn sample_dataset() -> Dataset {
    dataset_with_weights(|i| (500 + i * 25).to_string())
}

/// `sample_dataset` with cargo weights alternating between 1e200 and 2e200
pub fn extreme_weight_dataset() -> Dataset {
    dataset_with_weights(|i| (if i % 2 == 0 { "1e200" } else { "2e200" }).to_string())
}

fn dataset_with_weights(weight: impl Fn(usize) -> String) -> Dataset {
    let mut csv = format!("{}\n", HEADER);
    for i in 0..40 {
        let delayed = i % 4 == 0;
        csv.push_str(&format!(
            "Load {},{},ROUTE_{:03},{},{},{},{},{},{},{}\n",
            i,
            if delayed { "delayed" } else { "on_time" },
            i % 5,
            (i * 5) % 24,
            if delayed { "high" } else { "low" },
            if delayed { 48.5 } else { 1.5 },
            weight(i),
            ["Van", "Truck"][i % 2],
            40 + i,
            10 + i * 2,
        ));
    }
    Dataset::from_csv_reader(csv.as_bytes()).unwrap()
}

/// Train a small artifact with the given predecessor version
pub fn sample_artifact(previous: ModelVersion) -> TrainedArtifact {
    train_small(&sample_dataset(), previous)
}

pub fn train_small(dataset: &Dataset, previous: ModelVersion) -> TrainedArtifact {
    let options = TrainingOptions {
        forest: ForestParams {
            n_estimators: 5,
            ..ForestParams::default()
        },
        ..TrainingOptions::default()
    };
    train(dataset, &options, previous).unwrap().artifact
}
