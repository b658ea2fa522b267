use std::sync::Arc;

use chrono::Duration;
use serde_json::Value;
use svgchart::api::{
    ChartRequest, ChartResponse, ChartService, InMemorySeriesSource, ManualClock, RateLimitConfig,
    ServiceConfig,
};
use svgchart::core::ChartType;

fn source() -> InMemorySeriesSource {
    let source = InMemorySeriesSource::new();
    source
        .insert_json("sales", r#"{"A": 10, "B": 20, "C": 30}"#)
        .expect("sales");
    source
        .insert_json(
            "weights",
            r#"[{"label":"a","value":1,"unit":"kg"},{"label":"b","value":2,"unit":"lb"}]"#,
        )
        .expect("weights");
    source.insert_json("empty", "[]").expect("empty");
    source
}

fn generous_config() -> ServiceConfig {
    ServiceConfig::default().with_rate_limit(RateLimitConfig::per_minute(6_000).with_burst(1_000))
}

fn service_with(config: ServiceConfig) -> (ChartService<InMemorySeriesSource>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let service =
        ChartService::with_clock(source(), config, clock.clone()).expect("service config");
    (service, clock)
}

fn markup(response: &ChartResponse) -> &str {
    response
        .rendered_markup()
        .unwrap_or_else(|| panic!("expected markup, got {response:?}"))
}

#[test]
fn bar_request_renders_three_bars() {
    let (service, _) = service_with(generous_config());
    let request = ChartRequest::new("sales")
        .with_chart_type("bar")
        .with_dimensions(500, 300);
    let response = service.handle(&request);

    let svg = markup(&response);
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="500" height="300""#));
    assert_eq!(svg.matches(r#"class="bar""#).count(), 3);
    assert_eq!(svg.matches(r#"class="grid""#).count(), 5);
    assert!(matches!(
        response,
        ChartResponse::Ok {
            chart_type: ChartType::Bar,
            cached: false,
            points_plotted: 3,
            ..
        }
    ));
}

#[test]
fn omitted_fields_use_service_defaults() {
    let (service, _) = service_with(generous_config());
    let response = service.handle(&ChartRequest::new("sales"));
    let svg = markup(&response);
    assert!(svg.contains(r#"width="800" height="400""#));
    assert!(svg.contains(r#"class="series-line""#));
}

#[test]
fn identical_requests_hit_the_cache_until_ttl() {
    let config = generous_config().with_cache_ttl_secs(60);
    let (service, clock) = service_with(config);
    let request = ChartRequest::new("sales").with_chart_type("pie");

    let first = service.handle(&request);
    assert!(first.is_ok());
    assert!(!first.is_cached());

    clock.advance(Duration::seconds(30));
    let second = service.handle(&request);
    assert!(second.is_cached());
    assert_eq!(markup(&first), markup(&second));

    clock.advance(Duration::seconds(30));
    let third = service.handle(&request);
    assert!(!third.is_cached());
    assert_eq!(markup(&first), markup(&third));

    let stats = service.cache().stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.stale, 1);
    assert_eq!(stats.size, 1);
}

#[test]
fn titles_do_not_split_the_cache_key() {
    let (service, _) = service_with(generous_config());
    let plain = service.handle(&ChartRequest::new("sales"));
    let titled = service.handle(&ChartRequest::new("sales").with_title("Quarterly"));

    assert!(!plain.is_cached());
    assert!(titled.is_cached());
    assert_eq!(markup(&plain), markup(&titled));
}

#[test]
fn dimensions_and_type_split_the_cache_key() {
    let (service, _) = service_with(generous_config());
    assert!(!service.handle(&ChartRequest::new("sales")).is_cached());
    assert!(!service.handle(&ChartRequest::new("sales").with_dimensions(640, 480)).is_cached());
    assert!(!service.handle(&ChartRequest::new("sales").with_chart_type("bar")).is_cached());
    assert!(service.handle(&ChartRequest::new("sales").with_chart_type("line")).is_cached());
    assert_eq!(service.cache().len(), 3);
}

#[test]
fn default_quota_denies_the_second_immediate_request() {
    let (service, clock) = service_with(ServiceConfig::default());
    let request = ChartRequest::new("sales");

    assert!(service.handle(&request).is_ok());
    let denied = service.handle(&request);
    assert_eq!(denied.error_message(), Some("rate limit exceeded"));

    clock.advance(Duration::milliseconds(600));
    assert!(service.handle(&request).is_cached());
}

#[test]
fn validation_failures_become_error_responses() {
    let (service, _) = service_with(generous_config());
    let cases = [
        (
            ChartRequest::new("sales").with_chart_type("radar"),
            "invalid chart type: radar. Valid types are: line, bar, pie",
        ),
        (
            ChartRequest::new("sales").with_dimensions(5000, 300),
            "invalid configuration: width must be between 0 and 4096, got 5000",
        ),
        (
            ChartRequest::new("sales").with_dimensions(300, -2),
            "invalid configuration: height must be between 0 and 4096, got -2",
        ),
        (ChartRequest::new("ghost"), "series not found: ghost"),
        (
            ChartRequest::new("weights").with_unit_filter("g"),
            "no data for unit g",
        ),
    ];
    for (request, message) in cases {
        assert_eq!(service.handle(&request).error_message(), Some(message));
    }
}

#[test]
fn unit_filter_is_echoed_and_counted() {
    let (service, _) = service_with(generous_config());
    let response = service.handle(&ChartRequest::new("weights").with_unit_filter("kg"));
    match response {
        ChartResponse::Ok {
            unit_filter,
            points_plotted,
            ..
        } => {
            assert_eq!(unit_filter.as_deref(), Some("kg"));
            assert_eq!(points_plotted, 1);
        }
        ChartResponse::Error { message } => panic!("unexpected error: {message}"),
    }
}

#[test]
fn empty_series_renders_placeholder_through_the_service() {
    let (service, _) = service_with(generous_config());
    let response = service.handle(&ChartRequest::new("empty").with_chart_type("bar"));
    assert!(markup(&response).contains("No data available"));
    assert!(matches!(response, ChartResponse::Ok { points_plotted: 0, .. }));
}

#[test]
fn small_in_range_canvases_render_through_the_service() {
    let (service, _) = service_with(generous_config());
    for (width, height) in [(60, 300), (500, 60)] {
        let response = service.handle(
            &ChartRequest::new("sales")
                .with_chart_type("bar")
                .with_dimensions(width, height),
        );
        let svg = markup(&response);
        assert!(svg.contains(&format!(r#"width="{width}" height="{height}""#)));
        assert_eq!(svg.matches(r#"class="bar""#).count(), 3);
        assert!(!svg.contains("NaN"));
    }

    let response = service.handle(
        &ChartRequest::new("empty")
            .with_chart_type("line")
            .with_dimensions(50, 50),
    );
    assert!(markup(&response).contains("No data available"));
}

#[test]
fn json_round_trip_through_the_service() {
    let (service, _) = service_with(generous_config());
    let response = service.handle_json(
        r#"{"sourceSeriesId":"sales","chartType":"bar","width":320,"height":240,"xLabel":"Region"}"#,
    );
    let body: Value = serde_json::from_str(&response.to_json().expect("json")).expect("value");

    assert_eq!(body["status"], "ok");
    assert_eq!(body["chartType"], "bar");
    assert_eq!(body["cached"], false);
    assert_eq!(body["pointsPlotted"], 3);
    assert!(body.get("unitFilter").is_none());
    let svg = body["renderedMarkup"].as_str().expect("markup string");
    assert!(svg.contains("Region"));

    let error = service.handle_json(r#"{"chartType":"bar"}"#);
    let body: Value = serde_json::from_str(&error.to_json().expect("json")).expect("value");
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().is_some_and(|m| m.starts_with("invalid request")));
}

#[test]
fn batch_preserves_request_order() {
    let (service, _) = service_with(generous_config());
    let requests = vec![
        ChartRequest::new("sales").with_chart_type("line"),
        ChartRequest::new("ghost"),
        ChartRequest::new("sales").with_chart_type("pie"),
    ];
    let responses = service.handle_batch(&requests);

    assert_eq!(responses.len(), 3);
    assert!(matches!(responses[0], ChartResponse::Ok { chart_type: ChartType::Line, .. }));
    assert_eq!(responses[1].error_message(), Some("series not found: ghost"));
    assert!(matches!(responses[2], ChartResponse::Ok { chart_type: ChartType::Pie, .. }));
}

#[test]
fn concurrent_requests_share_cache_and_quota() {
    let config = ServiceConfig::default().with_rate_limit(RateLimitConfig::per_minute(100).with_burst(40));
    let (service, _) = service_with(config);
    let service = Arc::new(service);

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let service = Arc::clone(&service);
            std::thread::spawn(move || {
                let chart_type = ["line", "bar"][worker % 2];
                (0..10)
                    .map(|_| service.handle(&ChartRequest::new("sales").with_chart_type(chart_type)))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let responses: Vec<ChartResponse> = handles
        .into_iter()
        .flat_map(|handle| handle.join().expect("worker thread"))
        .collect();

    let admitted: Vec<&ChartResponse> = responses.iter().filter(|r| r.is_ok()).collect();
    assert_eq!(admitted.len(), 40);
    assert_eq!(
        responses
            .iter()
            .filter(|r| r.error_message() == Some("rate limit exceeded"))
            .count(),
        40
    );

    let line = admitted
        .iter()
        .find(|r| matches!(r, ChartResponse::Ok { chart_type: ChartType::Line, .. }))
        .expect("a line render was admitted");
    for response in &admitted {
        if matches!(response, ChartResponse::Ok { chart_type: ChartType::Line, .. }) {
            assert_eq!(markup(response), markup(line));
        }
    }
    assert!(service.cache().len() <= 2);
}
