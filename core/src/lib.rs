//! Blocking clients for the DexScreener and CoinGecko public APIs.
//!
//! # Overview
//! Every operation is one GET: build a URL from an endpoint descriptor and
//! caller arguments, send it, check the status, decode the JSON. Payloads
//! come back as `serde_json::Value`, unmodified; `types` offers optional
//! typed shapes on top.
//!
//! # Design
//! - `ResourceClient` is the single generic request path. Endpoints are
//!   `const` descriptors in `catalog`, not hand-written methods.
//! - Building and parsing are pure; only a `Transport` performs I/O, so
//!   tests substitute a stub and the default transport is `ureq`.
//! - `DexScreener` and `CoinGecko` are plain service objects constructed
//!   once (see `Clients`) and passed to whoever needs them.
//! - Failures are classified (`ApiError`), logged once through `tracing`,
//!   and returned. Nothing is retried or cached.

pub mod catalog;
pub mod client;
pub mod coingecko;
pub mod config;
pub mod dexscreener;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::ResourceClient;
pub use coingecko::{CoinDataOptions, CoinGecko, PriceOptions};
pub use config::ClientConfig;
pub use dexscreener::DexScreener;
pub use endpoint::{Args, EndpointDescriptor, Flags, QueryFlag, QueryParam};
pub use error::{ApiError, ErrorKind};
pub use http::{HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};

/// Both service objects, sharing one connection pool.
#[derive(Debug, Clone)]
pub struct Clients {
    pub dexscreener: DexScreener,
    pub coingecko: CoinGecko,
}

impl Clients {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = UreqTransport::new(config.timeout, &config.user_agent);
        Ok(Self {
            dexscreener: DexScreener::new(ResourceClient::new(&config.dexscreener_url, transport.clone())?),
            coingecko: CoinGecko::new(ResourceClient::new(&config.coingecko_url, transport)?),
        })
    }
}
