//! Request handling tests.
//!
//! Drives `SortService` directly with `http` types on the simulated
//! environment: no sockets, no real sleeping.

use http::{Method, Response, StatusCode, Uri, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use serde_json::Value;
use sleepsort_core::{DelayPolicy, SortConfig};
use sleepsort_harness::{SimEnv, block_on};
use sleepsort_server::{
    InputLimits, MISSING_INPUT_MESSAGE, OutputFormat, REQUEST_ID, RequestError, SortRequest,
    SortService, render::Body,
};

fn service(env: &SimEnv) -> SortService<SimEnv> {
    SortService::new(env.clone(), SortConfig::default(), InputLimits::default())
}

fn get(service: &SortService<SimEnv>, uri: &str) -> Response<Body> {
    let uri: Uri = uri.parse().unwrap();
    block_on(service.handle(&Method::GET, &uri))
}

fn body_text(response: Response<Body>) -> String {
    let bytes = block_on(response.into_body().collect()).unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response)).unwrap()
}

#[test]
fn json_sort_happy_path() {
    let env = SimEnv::with_seed(7);
    let response = get(&service(&env), "/sort?numbers=3,1,2");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

    let json = body_json(response);
    assert_eq!(json["sortedArray"], serde_json::json!([1, 2, 3]));
    assert!((json["totalSleepTime"].as_f64().unwrap() - 0.006).abs() < 1e-9);
    assert!(json["timeTaken"].as_f64().unwrap() >= json["totalSleepTime"].as_f64().unwrap());
}

#[test]
fn root_path_also_sorts() {
    let env = SimEnv::with_seed(7);
    let json = body_json(get(&service(&env), "/?numbers=0,0,0"));

    assert_eq!(json["sortedArray"], serde_json::json!([0, 0, 0]));
    assert_eq!(json["totalSleepTime"].as_f64(), Some(0.0));
}

#[test]
fn missing_numbers_json() {
    let env = SimEnv::with_seed(7);
    let response = get(&service(&env), "/sort");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    insta::assert_snapshot!(
        body_text(response),
        @r#"{"status":"error","message":"Please provide a list of numbers in the 'numbers' variable."}"#
    );
    assert_eq!(env.sleep_count(), 0);
}

#[test]
fn missing_numbers_has_no_sorted_array() {
    let env = SimEnv::with_seed(7);
    let json = body_json(get(&service(&env), "/sort?format=json"));

    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], MISSING_INPUT_MESSAGE);
    assert!(json.get("sortedArray").is_none());
}

#[test]
fn missing_numbers_html() {
    let env = SimEnv::with_seed(7);
    let response = get(&service(&env), "/sort?format=html");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
    insta::assert_snapshot!(
        body_text(response),
        @r#"<link rel="stylesheet" href="https://stackpath.bootstrapcdn.com/bootstrap/4.3.1/css/bootstrap.min.css"><pre class="danger">Please provide a list of numbers in the 'numbers' variable.</pre>"#
    );
}

#[test]
fn html_sort_renders_table() {
    let env = SimEnv::with_seed(7);
    let response = get(&service(&env), "/sort?format=Html&numbers=10,5,20");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response);
    assert!(html.contains(r#"<table class="table table-bordered">"#));
    assert!(html.contains("<th>Total Sleep Time (seconds)</th>"));
    assert!(html.contains("<td>5, 10, 20</td><td>0.035</td><td>0.035</td>"));
}

#[test]
fn garbage_tokens_coerce_to_zero() {
    let env = SimEnv::with_seed(7);
    let json = body_json(get(&service(&env), "/sort?numbers=4,abc,2x,%20"));

    assert_eq!(json["sortedArray"], serde_json::json!([0, 0, 2, 4]));
}

#[test]
fn negative_rejected_by_default() {
    let env = SimEnv::with_seed(7);
    let response = get(&service(&env), "/sort?numbers=2,-1");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response);
    assert_eq!(json["message"], "negative value -1 at index 1 cannot be scheduled");
    assert_eq!(env.sleep_count(), 0);
}

#[test]
fn negative_clamped_when_configured() {
    let env = SimEnv::with_seed(7);
    let config = SortConfig { delay_policy: DelayPolicy::Clamp, ..SortConfig::default() };
    let service = SortService::new(env.clone(), config, InputLimits::default());

    let json = body_json(get(&service, "/sort?numbers=2,-1"));
    assert_eq!(json["sortedArray"], serde_json::json!([-1, 2]));
}

#[test]
fn limits_short_circuit_before_engine() {
    let env = SimEnv::with_seed(7);
    let limits = InputLimits { max_numbers: 2, max_value: 100 };
    let service = SortService::new(env.clone(), SortConfig::default(), limits);

    let response = get(&service, "/sort?numbers=1,2,3");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(&service, "/sort?numbers=101");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response)["message"], "value 101 exceeds the maximum of 100");

    assert_eq!(env.sleep_count(), 0);
}

#[test]
fn health_and_unknown_routes() {
    let env = SimEnv::with_seed(7);
    let service = service(&env);

    let response = get(&service, "/health");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response), "OK");

    assert_eq!(get(&service, "/nope").status(), StatusCode::NOT_FOUND);

    let uri: Uri = "/sort?numbers=1".parse().unwrap();
    let response = block_on(service.handle(&Method::POST, &uri));
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn request_id_is_deterministic_under_seed() {
    let a = get(&service(&SimEnv::with_seed(99)), "/health");
    let b = get(&service(&SimEnv::with_seed(99)), "/health");

    let id_a = a.headers()[REQUEST_ID].to_str().unwrap().to_string();
    assert!(!id_a.is_empty());
    assert_eq!(id_a, b.headers()[REQUEST_ID].to_str().unwrap());
}

#[test]
fn execute_reports_missing_input() {
    let env = SimEnv::with_seed(7);
    let request = SortRequest { format: OutputFormat::Json, numbers: None };

    assert_eq!(block_on(service(&env).execute(request)), Err(RequestError::MissingInput));
}

#[test]
fn execute_returns_timed_sort() {
    let env = SimEnv::with_seed(7);
    let request = SortRequest::from_query(Some("numbers=3,1,3,2"));

    let result = block_on(service(&env).execute(request)).unwrap();
    assert_eq!(result.sorted_array, vec![1, 2, 3, 3]);
    assert!((result.total_sleep_time - 0.009).abs() < 1e-9);
}
