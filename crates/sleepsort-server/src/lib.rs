//! Sleep sort HTTP server.
//!
//! Production server exposing [`sleepsort_core`] over HTTP/1.1 using Hyper and
//! the Tokio runtime, with system time and OS randomness.
//!
//! # Architecture
//!
//! This crate is the production "glue" around the Sans-IO engine. Parsing the
//! query ([`request`]), rendering JSON or HTML ([`render`]), and routing
//! ([`SortService`]) are plain functions over `http` types, so they are tested
//! without a socket. [`Server`] only accepts connections and hands each request
//! to the service.
//!
//! # Components
//!
//! - [`Server`]: Production runtime (TCP listener + Hyper connections)
//! - [`SortService`]: Routing, input limits, engine invocation
//! - [`SortRequest`]: Parsed `format` / `numbers` query
//! - [`SystemEnv`]: Production environment (real time, OS RNG)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod render;
pub mod request;
mod service;
mod system_env;

use std::{convert::Infallible, net::SocketAddr, sync::Arc};

pub use error::{MISSING_INPUT_MESSAGE, RequestError, ServerError};
use hyper::{body::Incoming, server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
pub use request::{OutputFormat, SortRequest};
pub use service::{InputLimits, REQUEST_ID, SortService};
use sleepsort_core::SortConfig;
pub use system_env::SystemEnv;
use tokio::net::{TcpListener, TcpStream};

/// Server configuration for the production runtime.
#[derive(Debug, Clone)]
pub struct ServerRuntimeConfig {
    /// Address to bind to (e.g., "127.0.0.1:8080")
    pub bind_address: String,
    /// Engine configuration (unit delay, negative value policy)
    pub sort: SortConfig,
    /// Per-request input limits
    pub limits: InputLimits,
}

impl Default for ServerRuntimeConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            sort: SortConfig::default(),
            limits: InputLimits::default(),
        }
    }
}

/// Production sleep sort server.
pub struct Server {
    /// Bound listener
    listener: TcpListener,
    /// Shared request handler
    service: Arc<SortService<SystemEnv>>,
}

impl Server {
    /// Create and bind a new server.
    pub async fn bind(config: ServerRuntimeConfig) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(&config.bind_address).await.map_err(|e| {
            ServerError::Config(format!("unable to listen on {}: {e}", config.bind_address))
        })?;

        let service = SortService::new(SystemEnv::new(), config.sort, config.limits);

        Ok(Self { listener, service: Arc::new(service) })
    }

    /// Run the server, accepting connections until the task is dropped.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Server starting on {}", self.local_addr()?);

        loop {
            match self.listener.accept().await {
                Ok((stream, client_addr)) => {
                    let service = Arc::clone(&self.service);
                    tokio::spawn(serve_connection(service, stream, client_addr));
                },
                Err(e) => {
                    tracing::error!("Accept error: {}", e);
                },
            }
        }
    }

    /// Local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }
}

/// Serve every request on a single TCP connection.
async fn serve_connection(
    service: Arc<SortService<SystemEnv>>,
    stream: TcpStream,
    client_addr: SocketAddr,
) {
    tracing::debug!("New connection from {}", client_addr);

    let handler = service_fn(move |request: hyper::Request<Incoming>| {
        let service = Arc::clone(&service);
        async move {
            // Sort requests are GETs; the body is never read.
            let (parts, _body) = request.into_parts();
            let response = service.handle(&parts.method, &parts.uri).await;
            Ok::<_, Infallible>(response)
        }
    });

    if let Err(e) =
        http1::Builder::new().keep_alive(true).serve_connection(TokioIo::new(stream), handler).await
    {
        tracing::debug!("Connection error from {}: {}", client_addr, e);
    }
}
