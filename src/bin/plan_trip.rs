use std::time::Instant;

use chrono::Utc;
use chrono_tz::UTC;
use clap::Parser;
use tachograph::hos;

#[derive(Parser)]
struct PlanArgs {
    #[arg(short, long)]
    route_path: String,
    #[arg(short, long, default_value_t = 0.0)]
    current_cycle_used_hours: f64,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let args = PlanArgs::parse();

    let route_json = std::fs::read_to_string(&args.route_path)?;
    let route: tachograph::route::Route = serde_json::from_str(&route_json)?;

    let trip_start = Utc::now().with_timezone(&UTC);
    let start = Instant::now();
    let itinerary = hos::transform(
        &route,
        args.current_cycle_used_hours * 3600.0,
        trip_start,
    )?;
    log::debug!("planned in {:?}", Instant::now().duration_since(start));

    println!("{}", serde_json::to_string_pretty(&itinerary)?);
    Ok(())
}
