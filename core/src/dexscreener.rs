//! DexScreener: DEX pair and token aggregator.

use serde_json::Value;

use crate::catalog::dexscreener as ep;
use crate::client::ResourceClient;
use crate::config::ClientConfig;
use crate::endpoint::{Args, EndpointDescriptor, Flags};
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};

/// Service object for DexScreener. Every method is one GET returning the
/// provider's JSON untouched.
#[derive(Debug, Clone)]
pub struct DexScreener<T = UreqTransport> {
    client: ResourceClient<T>,
}

impl DexScreener {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = UreqTransport::new(config.timeout, &config.user_agent);
        Ok(Self::new(ResourceClient::new(&config.dexscreener_url, transport)?))
    }
}

impl<T: Transport> DexScreener<T> {
    pub fn new(client: ResourceClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ResourceClient<T> {
        &self.client
    }

    pub fn latest_profiles(&self) -> Result<Value, ApiError> {
        self.get(&ep::LATEST_PROFILES, Args::new())
    }

    pub fn latest_boosts(&self) -> Result<Value, ApiError> {
        self.get(&ep::LATEST_BOOSTS, Args::new())
    }

    pub fn top_boosts(&self) -> Result<Value, ApiError> {
        self.get(&ep::TOP_BOOSTS, Args::new())
    }

    /// Paid orders (profile, ads, boosts) for a token.
    pub fn check_orders(&self, chain: &str, token: &str) -> Result<Value, ApiError> {
        self.get(&ep::CHECK_ORDERS, Args::new().with("chain", chain).with("token", token))
    }

    pub fn pair_info(&self, chain: &str, pair: &str) -> Result<Value, ApiError> {
        self.get(&ep::PAIR_INFO, Args::new().with("chain", chain).with("pair", pair))
    }

    /// Free-text search over pairs by token name, symbol or address.
    pub fn search_pairs(&self, query: &str) -> Result<Value, ApiError> {
        self.get(&ep::SEARCH_PAIRS, Args::new().with("query", query))
    }

    /// All pools for a token address, across chains.
    pub fn token_pools(&self, token: &str) -> Result<Value, ApiError> {
        self.get(&ep::TOKEN_POOLS, Args::new().with("token", token))
    }

    pub fn token_details(&self, chain: &str, token: &str) -> Result<Value, ApiError> {
        self.get(&ep::TOKEN_DETAILS, Args::new().with("chain", chain).with("token", token))
    }

    fn get(&self, endpoint: &EndpointDescriptor, args: Args) -> Result<Value, ApiError> {
        self.client.request(endpoint, &args, Flags::empty())
    }
}
