#![allow(missing_docs)]
//! Prints an aurora advisory for a location.
//!
//! ```text
//! cargo run --example aurora_report -- <latitude> <longitude> <kp> [time zone] [--geojson]
//! cargo run --example aurora_report -- 69.6492 18.9553 5.3 Europe/Oslo
//! ```
//!
//! Set `RUST_LOG=debug` (or `trace`) to see the estimator's reasoning on stderr.

use aurora_advisor::{
    advise, generate_oval_geometry, simulate_forecast, ActivityIndex, Coordinate, ForecastSettings,
};
use chrono::{Timelike, Utc};
use flexi_logger::Logger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logger = Logger::try_with_env_or_str("info")?.log_to_stderr().start()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let geojson = args.iter().any(|a| a == "--geojson");
    let positional: Vec<&str> = args.iter().map(String::as_str).filter(|a| !a.starts_with("--")).collect();

    let (lat, lon, kp) = match positional.as_slice() {
        [lat, lon, kp, ..] => (*lat, *lon, *kp),
        _ => ("69.6492", "18.9553", "5.0"),
    };
    let tz: chrono_tz::Tz = match positional.get(3) {
        Some(name) => name.parse().map_err(|_| format!("unknown time zone: {name}"))?,
        None => chrono_tz::UTC,
    };

    let here = Coordinate::parse(lat, lon)?;
    let index = ActivityIndex::new(kp.trim().parse::<f64>().map_err(|_| format!("kp is not a number: {kp}"))?)?;
    log::info!("advisory for {here} at Kp {index}");

    let advisory = advise(&here, index);
    let pollution = &advisory.light_pollution;

    println!("Aurora advisory for {here}");
    println!("{:=<60}", "");
    println!("Activity:    Kp {} ({})", index, advisory.activity_level);
    println!("Oval edge:   {:.1}°", advisory.base_latitude);
    println!("Visibility:  {:.0}%", advisory.visibility_chance);
    println!("             {}", advisory.outlook.message());
    println!();
    println!("Sky:         {} ({}/100)", pollution.level, pollution.value);
    println!("             {}", pollution.description);
    if let Some(nearest) = &pollution.nearest_source {
        println!("Nearest:     {} ({:.0} km)", nearest.name, nearest.distance_km);
    }
    if let Some(hint) = &pollution.travel_hint {
        println!("             {hint}");
    }
    println!();

    // Synthetic jitter for the chart, not a prediction
    let issued_at = Utc::now()
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .ok_or("cannot truncate current time")?;
    let series = simulate_forecast(index, ForecastSettings::default(), &mut rand::rng())?;
    println!("Illustrative activity (simulated, {tz}):");
    for sample in series.iter().step_by(3) {
        let when = sample
            .valid_at(issued_at)
            .map(|t| t.with_timezone(&tz).format("%a %H:%M").to_string())
            .unwrap_or_else(|| sample.label());
        println!("  {when:>9}  Kp {:>3.1}  {}", sample.predicted_index, sample.activity_level());
    }

    if geojson {
        let ovals = generate_oval_geometry(index);
        println!();
        println!("{}", serde_json::to_string_pretty(&ovals.to_feature_collection())?);
    }

    Ok(())
}
