//! Common helpers for API tests

#![allow(dead_code)]

use axum::{body::Body, http::Request, Router};
use freightcast_sdk::{DelayEngine, DelayEngineBuilder, ForestParams, RepositoryConfig};
use http_body_util::BodyExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const HEADER: &str = "freight_description,delay_label,route_variant_id,planned_departure_hour,traffic_level_forecast,rain_forecast_mm,cargo_weight_kg,vehicle_type,historical_avg_route_time_min,distance_km";

pub const BOUNDARY: &str = "freightcast-test-boundary";

/// Trips delayed exactly when traffic is high and rain exceeds 40 mm
pub fn trips_csv(rows: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut csv = format!("{}\n", HEADER);

    for i in 0..rows {
        let (traffic, rain) = if rng.gen_bool(0.3) {
            ("high", rng.gen_range(41.0..60.0))
        } else {
            (["low", "medium", "high"][rng.gen_range(0..3)], rng.gen_range(0.0..35.0))
        };
        let delayed = traffic == "high" && rain > 40.0;
        let distance: u32 = rng.gen_range(25..140);

        csv.push_str(&format!(
            "FRT-{:04},{},ROUTE_00{},{},{},{:.1},{},{},{},{}\n",
            i,
            if delayed { "delayed" } else { "on_time" },
            rng.gen_range(1..6),
            rng.gen_range(0..24),
            traffic,
            rain,
            rng.gen_range(500..4200),
            ["Van", "Box Truck", "Rigid Truck"][rng.gen_range(0..3)],
            distance * 3 / 2,
            distance,
        ));
    }
    csv
}

/// Wrap `csv` as the `file` field of a multipart form
pub fn multipart_body(csv: &str) -> String {
    format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"trips.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
        b = BOUNDARY,
        csv = csv
    )
}

pub async fn memory_engine() -> Arc<DelayEngine> {
    let engine = DelayEngineBuilder::new()
        .with_repository(RepositoryConfig::memory())
        .with_forest(ForestParams {
            n_estimators: 25,
            ..ForestParams::default()
        })
        .build()
        .await
        .unwrap();
    Arc::new(engine)
}

/// Send `request` and decode the JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (u16, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_csv(uri: &str, csv: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "text/csv")
        .body(Body::from(csv))
        .unwrap()
}

pub fn post_multipart(uri: &str, csv: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(csv)))
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}
