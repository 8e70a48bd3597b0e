use reqwest::Client;

use crate::route::Route;

pub async fn fetch_directions(
    client: &Client,
    endpoint: &str,
    from: (f64, f64),
    to: (f64, f64),
) -> Result<Route, anyhow::Error> {
    let body = client
        .get(format!(
            "{}/route/v1/driving/{},{};{},{}",
            endpoint, from.0, from.1, to.0, to.1
        ))
        .query(&[("overview", "full"), ("steps", "true")])
        .send()
        .await?
        .text()
        .await?;
    Ok(serde_json::from_str(&body)?)
}
