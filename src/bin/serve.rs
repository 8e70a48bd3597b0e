use chrono::Utc;
use chrono_tz::UTC;
use clap::Parser;
use rocket::{serde::json::Json, State};
use tachograph::{
    api::{request::TripRequest, response::TripResponse},
    hos,
    provider,
    route::Route,
};

#[macro_use]
extern crate rocket;

struct ProviderConfig {
    client: reqwest::Client,
    endpoint: String,
}

#[post("/v1/plan", data = "<request>")]
async fn plan(request: Json<TripRequest>, config: &State<ProviderConfig>) -> Json<TripResponse> {
    let request = request.0;
    if let Err(err) = request.validate() {
        return Json(TripResponse::invalid_request(err.to_string()));
    }

    let route = match provider::fetch_directions(
        &config.client,
        &config.endpoint,
        (request.current_location.lat, request.current_location.lon),
        (request.dropoff_location.lat, request.dropoff_location.lon),
    )
    .await
    {
        Ok(route) => route,
        Err(err) => return Json(TripResponse::invalid_request(err.to_string())),
    };

    let trip_start = Utc::now().with_timezone(&UTC);
    match transform_route(&route, &request, trip_start) {
        Ok(itinerary) => Json(TripResponse::ok(itinerary)),
        Err(err) => Json(TripResponse::invalid_request(err.to_string())),
    }
}

fn transform_route(
    route: &Route,
    request: &TripRequest,
    trip_start: chrono::DateTime<chrono_tz::Tz>,
) -> Result<tachograph::hos::Itinerary, tachograph::hos::TransformError> {
    hos::transform(route, request.current_cycle_used_seconds(), trip_start)
}

#[derive(Parser)]
struct ServeArgs {
    #[arg(short, long)]
    valhalla_endpoint: String,
    #[arg(short, long)]
    port: Option<u16>,
}

#[launch]
fn rocket() -> _ {
    env_logger::init();
    let args = ServeArgs::parse();

    rocket::build()
        .manage(ProviderConfig { client: reqwest::Client::new(), endpoint: args.valhalla_endpoint })
        .configure(rocket::Config::figment().merge(("port", args.port.unwrap_or(8000))))
        .mount("/", routes![plan])
}
