//! Sleep sort server binary.
//!
//! # Usage
//!
//! ```bash
//! # Serve on the default address
//! sleepsort-server
//!
//! # Faster delays, negative values sorted instead of rejected
//! sleepsort-server --bind 0.0.0.0:8080 --unit-delay-us 100 --negative clamp
//!
//! curl 'http://127.0.0.1:8080/sort?numbers=3,1,2'
//! curl 'http://127.0.0.1:8080/sort?numbers=3,1,2&format=html'
//! ```

use std::time::Duration;

use clap::{Parser, ValueEnum};
use sleepsort_core::{DelayPolicy, SortConfig};
use sleepsort_server::{InputLimits, Server, ServerRuntimeConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Handling of negative input values
#[derive(ValueEnum, Clone, Copy, Debug)]
enum NegativePolicy {
    /// Answer with an error
    Reject,
    /// Sort them with zero delay
    Clamp,
}

impl From<NegativePolicy> for DelayPolicy {
    fn from(policy: NegativePolicy) -> Self {
        match policy {
            NegativePolicy::Reject => Self::Reject,
            NegativePolicy::Clamp => Self::Clamp,
        }
    }
}

/// Sleep sort HTTP server
#[derive(Parser, Debug)]
#[command(name = "sleepsort-server")]
#[command(about = "Sorts numbers by sleeping on them")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Delay per unit of value, in microseconds
    #[arg(long, default_value = "1000")]
    unit_delay_us: u64,

    /// What to do with negative values
    #[arg(long, value_enum, default_value = "reject")]
    negative: NegativePolicy,

    /// Maximum numbers per request
    #[arg(long, default_value = "1000")]
    max_numbers: usize,

    /// Maximum single value
    #[arg(long, default_value = "10000")]
    max_value: i64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!("Sleep sort server starting");
    tracing::info!("Binding to {}", args.bind);

    let config = ServerRuntimeConfig {
        bind_address: args.bind,
        sort: SortConfig {
            unit_delay: Duration::from_micros(args.unit_delay_us),
            delay_policy: args.negative.into(),
        },
        limits: InputLimits { max_numbers: args.max_numbers, max_value: args.max_value },
    };

    let server = Server::bind(config).await?;

    tracing::info!("Server listening on {}", server.local_addr()?);

    server.run().await?;

    Ok(())
}
