//! Request handling.
//!
//! Routes a request, parses the query, enforces input limits, runs the engine,
//! and renders the outcome. Input errors short-circuit before the engine runs.

use http::{HeaderName, HeaderValue, Method, Response, StatusCode, Uri};
use sleepsort_core::{Environment, SleepSort, SortConfig, TimedSort};
use tracing::Instrument;

use crate::{
    error::RequestError,
    render::{self, Body},
    request::SortRequest,
};

/// Header carrying the per-request ID.
pub const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Bounds on a single request.
///
/// Wall-clock cost grows with the sum of values, so both the number of values
/// and the size of each value are capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    /// Maximum values per request
    pub max_numbers: usize,
    /// Maximum single value
    pub max_value: i64,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self { max_numbers: 1_000, max_value: 10_000 }
    }
}

impl InputLimits {
    /// Check `numbers` against the limits.
    pub fn check(&self, numbers: &[i64]) -> Result<(), RequestError> {
        if numbers.len() > self.max_numbers {
            return Err(RequestError::TooManyNumbers {
                count: numbers.len(),
                max: self.max_numbers,
            });
        }

        if let Some(&value) = numbers.iter().find(|&&v| v > self.max_value) {
            return Err(RequestError::ValueTooLarge { value, max: self.max_value });
        }

        Ok(())
    }
}

/// HTTP-facing sort service.
///
/// Holds no per-request state, so one instance serves every connection.
#[derive(Debug, Clone)]
pub struct SortService<E: Environment> {
    env: E,
    engine: SleepSort<E>,
    limits: InputLimits,
}

impl<E: Environment> SortService<E> {
    /// Create a service backed by `env`.
    pub fn new(env: E, config: SortConfig, limits: InputLimits) -> Self {
        let engine = SleepSort::new(env.clone(), config);
        Self { env, engine, limits }
    }

    /// Handle one request.
    ///
    /// - `GET /` and `GET /sort`: sort the `numbers` parameter
    /// - `GET /health`: liveness probe
    ///
    /// Every response carries an `x-request-id` header.
    pub async fn handle(&self, method: &Method, uri: &Uri) -> Response<Body> {
        let request_id = self.env.random_u64();
        let span = tracing::info_span!("request", request_id, %method, path = uri.path());

        let mut response = self.route(method, uri).instrument(span).await;
        response.headers_mut().insert(REQUEST_ID, HeaderValue::from(request_id));
        response
    }

    async fn route(&self, method: &Method, uri: &Uri) -> Response<Body> {
        match (method, uri.path()) {
            (&Method::GET, "/" | "/sort") => self.sort(uri.query()).await,
            (&Method::GET, "/health") => render::text(StatusCode::OK, "OK"),
            (_, "/" | "/sort" | "/health") => {
                render::text(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
            },
            _ => render::text(StatusCode::NOT_FOUND, "not found"),
        }
    }

    async fn sort(&self, query: Option<&str>) -> Response<Body> {
        let request = SortRequest::from_query(query);
        let format = request.format;

        match self.execute(request).await {
            Ok(result) => {
                tracing::info!(
                    count = result.sorted_array.len(),
                    time_taken = result.time_taken,
                    total_sleep_time = result.total_sleep_time,
                    "Sorted"
                );
                render::result(format, &result)
            },
            Err(e) => {
                tracing::warn!("Rejected request: {}", e);
                render::error(format, StatusCode::BAD_REQUEST, &e.to_string())
            },
        }
    }

    /// Validate a parsed request and run the engine.
    pub async fn execute(&self, request: SortRequest) -> Result<TimedSort, RequestError> {
        let numbers = request.numbers.ok_or(RequestError::MissingInput)?;
        self.limits.check(&numbers)?;

        Ok(self.engine.sort_with_time(&numbers).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_accept_boundaries() {
        let limits = InputLimits { max_numbers: 3, max_value: 10 };
        assert!(limits.check(&[10, 0, 10]).is_ok());
        assert!(limits.check(&[]).is_ok());
    }

    #[test]
    fn limits_reject_too_many() {
        let limits = InputLimits { max_numbers: 2, max_value: 10 };
        assert_eq!(
            limits.check(&[1, 2, 3]),
            Err(RequestError::TooManyNumbers { count: 3, max: 2 })
        );
    }

    #[test]
    fn limits_reject_first_large_value() {
        let limits = InputLimits { max_numbers: 10, max_value: 10 };
        assert_eq!(
            limits.check(&[1, 11, 50]),
            Err(RequestError::ValueTooLarge { value: 11, max: 10 })
        );
    }

    #[test]
    fn limits_leave_negatives_to_engine() {
        let limits = InputLimits::default();
        assert!(limits.check(&[-5]).is_ok());
    }
}
