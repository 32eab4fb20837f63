use crisis_rescue::geo::Coordinate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Parses `lon,lat` into a validated coordinate.
pub(crate) fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    let (lon, lat) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected 'lon,lat' but got '{raw}'"))?;

    let lon = lon
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse longitude '{lon}' ({err})"))?;
    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse latitude '{lat}' ({err})"))?;

    Coordinate::new(lon, lat).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lon_lat_pairs() {
        let point = parse_coordinate(" 77.209, 28.6139 ").expect("valid pair");
        assert_eq!(point.lon, 77.209);
        assert_eq!(point.lat, 28.6139);
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(parse_coordinate("77.209").is_err());
        assert!(parse_coordinate("east,28.6").is_err());
        assert!(parse_coordinate("200,28.6")
            .expect_err("longitude out of range")
            .contains("out of range"));
    }
}
