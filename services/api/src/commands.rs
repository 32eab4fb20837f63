use clap::Args;
use crisis_rescue::config::AppConfig;
use crisis_rescue::error::AppError;
use crisis_rescue::geo::{Coordinate, RouteQuery};
use crisis_rescue::requests::{CsvRequestStore, RequestStore, RescueRequest};
use crisis_rescue::routing::{OsrmClient, RouteLookup, RoutingService};
use crisis_rescue::units::minutes_to_hours;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RouteArgs {
    /// Start point as lon,lat
    #[arg(long, allow_hyphen_values = true, value_parser = crate::infra::parse_coordinate)]
    pub(crate) from: Coordinate,
    /// Destination as lon,lat
    #[arg(long, allow_hyphen_values = true, value_parser = crate::infra::parse_coordinate)]
    pub(crate) to: Coordinate,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListRequestsArgs {
    /// Read this log instead of the configured REQUESTS_CSV_PATH
    #[arg(long)]
    pub(crate) path: Option<PathBuf>,
}

pub(crate) async fn run_route_lookup(args: RouteArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let client = OsrmClient::from_config(&config.routing)?;
    let routing = RoutingService::uncached(Arc::new(client));

    let query = RouteQuery::new(args.from, args.to);
    let lookup = routing.lookup(&query).await;
    for line in describe_lookup(&query, &lookup) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_list_requests(args: ListRequestsArgs) -> Result<(), AppError> {
    let path = match args.path {
        Some(path) => path,
        None => AppConfig::load()?.storage.requests_path,
    };

    let requests = CsvRequestStore::new(&path).list()?;
    if requests.is_empty() {
        println!("No rescue requests stored in {}", path.display());
        return Ok(());
    }

    println!("Rescue requests in {}", path.display());
    for request in &requests {
        println!("{}", describe_request(request));
    }
    Ok(())
}

fn describe_lookup(query: &RouteQuery, lookup: &RouteLookup) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Route {},{} -> {},{}",
            query.start.lon, query.start.lat, query.end.lon, query.end.lat
        ),
        format!("- distance: {} km", lookup.route.distance_km()),
        format!(
            "- eta: {} min ({} h)",
            lookup.route.eta_min(),
            minutes_to_hours(lookup.route.eta_min())
        ),
    ];

    if lookup.is_fallback() {
        lines.push("- source: fallback (routing backend unavailable)".to_string());
    } else {
        lines.push(format!("- source: {}", lookup.source.label()));
    }

    if let Some(geometry) = &lookup.route.geometry {
        lines.push(format!("- geometry: {} points", geometry.coordinates.len()));
    }
    lines
}

fn describe_request(request: &RescueRequest) -> String {
    format!(
        "- [{}] {} for donor {} | {},{} -> {},{} | {} km, {} min",
        request.priority,
        request.request_type,
        request.donor_id.as_deref().unwrap_or("-"),
        request.start_lon,
        request.start_lat,
        request.end_lon,
        request.end_lat,
        request.distance_km,
        request.eta_min
    )
}
