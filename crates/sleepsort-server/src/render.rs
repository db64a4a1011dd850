//! Response rendering.
//!
//! JSON responses carry the engine result verbatim; HTML responses use a
//! Bootstrap-styled table. Errors are rendered in the same format the client
//! asked for.

use std::fmt::Write as _;

use bytes::Bytes;
use http::{HeaderValue, Response, StatusCode, header::CONTENT_TYPE};
use http_body_util::Full;
use serde::Serialize;
use sleepsort_core::TimedSort;

use crate::request::OutputFormat;

/// Response body type used by every handler.
pub type Body = Full<Bytes>;

const BOOTSTRAP_LINK: &str = r#"<link rel="stylesheet" href="https://stackpath.bootstrapcdn.com/bootstrap/4.3.1/css/bootstrap.min.css">"#;

const JSON: &str = "application/json";
const HTML: &str = "text/html; charset=utf-8";
const TEXT: &str = "text/plain; charset=utf-8";

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: &'a str,
}

/// Render a successful sort.
pub fn result(format: OutputFormat, sorted: &TimedSort) -> Response<Body> {
    match format {
        OutputFormat::Json => json(StatusCode::OK, sorted),
        OutputFormat::Html => response(StatusCode::OK, HTML, result_html(sorted)),
    }
}

/// Render a request error with the given status.
pub fn error(format: OutputFormat, status: StatusCode, message: &str) -> Response<Body> {
    match format {
        OutputFormat::Json => json(status, &ErrorBody { status: "error", message }),
        OutputFormat::Html => response(status, HTML, error_html(message)),
    }
}

/// Plain-text response.
pub fn text(status: StatusCode, body: &'static str) -> Response<Body> {
    response(status, TEXT, body)
}

/// HTML table with one row: sorted numbers, time taken, total sleep time.
pub fn result_html(result: &TimedSort) -> String {
    let numbers =
        result.sorted_array.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");

    let mut html = String::from(BOOTSTRAP_LINK);
    html.push_str(r#"<div class="container mt-4">"#);
    html.push_str(r#"<table class="table table-bordered">"#);
    html.push_str(
        "<thead><tr><th>Sorted Numbers</th><th>Time Taken (seconds)</th>\
         <th>Total Sleep Time (seconds)</th></tr></thead>",
    );
    html.push_str("<tbody><tr>");
    // Writing to a String cannot fail
    let _ = write!(
        html,
        "<td>{numbers}</td><td>{}</td><td>{}</td>",
        result.time_taken, result.total_sleep_time
    );
    html.push_str("</tr></tbody></table></div>");
    html
}

/// Error message block.
pub fn error_html(message: &str) -> String {
    format!(r#"{BOOTSTRAP_LINK}<pre class="danger">{}</pre>"#, escape_html(message))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn json<T: Serialize>(status: StatusCode, value: &T) -> Response<Body> {
    match serde_json::to_vec(value) {
        Ok(body) => response(status, JSON, body),
        Err(e) => {
            tracing::error!("Failed to serialize response: {}", e);
            text(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        },
    }
}

fn response(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<Bytes>,
) -> Response<Body> {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
