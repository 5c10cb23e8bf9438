//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use freightcast_sdk::{
    Dataset, DelayEngine, DelayEngineBuilder, ForestParams, Record, RepositoryConfig, Value,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const HEADER: &str = "freight_description,delay_label,route_variant_id,planned_departure_hour,traffic_level_forecast,rain_forecast_mm,cargo_weight_kg,vehicle_type,historical_avg_route_time_min,distance_km";

const ROUTES: [&str; 5] = ["ROUTE_001", "ROUTE_002", "ROUTE_003", "ROUTE_004", "ROUTE_005"];
const VEHICLES: [&str; 4] = ["Van", "Box Truck", "Rigid Truck", "B-Double"];
const TRAFFIC: [&str; 3] = ["low", "medium", "high"];

/// Synthetic trips where exactly the rows with high traffic and more than
/// 40 mm of rain are delayed.
pub fn synthetic_csv(rows: usize, seed: u64) -> String {
    synthetic_csv_with_header(HEADER, rows, seed)
}

/// Same trips, but only the columns named in `header` survive
pub fn synthetic_csv_with_header(header: &str, rows: usize, seed: u64) -> String {
    let wanted: Vec<&str> = header.split(',').collect();
    let all: Vec<&str> = HEADER.split(',').collect();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut csv = format!("{}\n", header);

    for i in 0..rows {
        let scenario: f64 = rng.gen();
        let (traffic, rain) = if scenario < 0.3 {
            ("high", rng.gen_range(41.0..60.0))
        } else if scenario < 0.4 {
            (TRAFFIC[rng.gen_range(0..2)], rng.gen_range(41.0..60.0))
        } else {
            (TRAFFIC[rng.gen_range(0..3)], rng.gen_range(0.0..35.0))
        };
        let delayed = traffic == "high" && rain > 40.0;

        let route = ROUTES[rng.gen_range(0..ROUTES.len())];
        let vehicle = VEHICLES[rng.gen_range(0..VEHICLES.len())];
        let distance: u32 = rng.gen_range(25..140);

        let cells = [
            format!("FRT-{:04}", i),
            (if delayed { "delayed" } else { "on_time" }).to_string(),
            route.to_string(),
            rng.gen_range(0..24u32).to_string(),
            traffic.to_string(),
            format!("{:.1}", rain),
            rng.gen_range(500..4200u32).to_string(),
            vehicle.to_string(),
            (distance * 3 / 2 + rng.gen_range(0..30)).to_string(),
            distance.to_string(),
        ];

        let row: Vec<&str> = wanted
            .iter()
            .filter_map(|w| all.iter().position(|c| c == w).map(|p| cells[p].as_str()))
            .collect();
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

pub fn synthetic_dataset(rows: usize, seed: u64) -> Dataset {
    Dataset::from_csv_reader(synthetic_csv(rows, seed).as_bytes()).unwrap()
}

/// Smaller forest to keep tests quick
pub fn quick_forest() -> ForestParams {
    ForestParams {
        n_estimators: 30,
        ..ForestParams::default()
    }
}

/// Untrained engine persisting to memory
pub async fn memory_engine() -> DelayEngine {
    DelayEngineBuilder::new()
        .with_repository(RepositoryConfig::memory())
        .with_forest(quick_forest())
        .build()
        .await
        .unwrap()
}

/// Prediction record with the given conditions and typical other fields
pub fn trip(traffic: &str, rain: f64, vehicle: &str) -> Record {
    let mut record = Record::new();
    record.insert("freight_description".into(), Value::from("probe"));
    record.insert("route_variant_id".into(), Value::from("ROUTE_003"));
    record.insert("planned_departure_hour".into(), Value::from(8));
    record.insert("traffic_level_forecast".into(), Value::from(traffic));
    record.insert("rain_forecast_mm".into(), Value::from(rain));
    record.insert("cargo_weight_kg".into(), Value::from(2100));
    record.insert("vehicle_type".into(), Value::from(vehicle));
    record.insert("historical_avg_route_time_min".into(), Value::from(145));
    record.insert("distance_km".into(), Value::from(96.5));
    record
}
