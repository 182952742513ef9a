//! Endpoint descriptors for the two providers.
//!
//! Paths are relative to the provider base URL. Argument names here are
//! the ones the service objects fill in.

use crate::endpoint::{EndpointDescriptor, QueryFlag, QueryParam};

pub mod dexscreener {
    use super::*;

    pub const LATEST_PROFILES: EndpointDescriptor = EndpointDescriptor {
        name: "latest_profiles",
        path: "/token-profiles/latest/v1",
        query: &[],
        flags: &[],
    };

    pub const LATEST_BOOSTS: EndpointDescriptor = EndpointDescriptor {
        name: "latest_boosts",
        path: "/token-boosts/latest/v1",
        query: &[],
        flags: &[],
    };

    pub const TOP_BOOSTS: EndpointDescriptor = EndpointDescriptor {
        name: "top_boosts",
        path: "/token-boosts/top/v1",
        query: &[],
        flags: &[],
    };

    pub const CHECK_ORDERS: EndpointDescriptor = EndpointDescriptor {
        name: "check_orders",
        path: "/orders/v1/{chain}/{token}",
        query: &[],
        flags: &[],
    };

    pub const PAIR_INFO: EndpointDescriptor = EndpointDescriptor {
        name: "pair_info",
        path: "/latest/dex/pairs/{chain}/{pair}",
        query: &[],
        flags: &[],
    };

    pub const SEARCH_PAIRS: EndpointDescriptor = EndpointDescriptor {
        name: "search_pairs",
        path: "/latest/dex/search",
        query: &[QueryParam::Required { key: "q", arg: "query" }],
        flags: &[],
    };

    pub const TOKEN_POOLS: EndpointDescriptor = EndpointDescriptor {
        name: "token_pools",
        path: "/latest/dex/tokens/{token}",
        query: &[],
        flags: &[],
    };

    pub const TOKEN_DETAILS: EndpointDescriptor = EndpointDescriptor {
        name: "token_details",
        path: "/latest/dex/tokens/{chain}/{token}",
        query: &[],
        flags: &[],
    };

    pub const ALL: [EndpointDescriptor; 8] = [
        LATEST_PROFILES,
        LATEST_BOOSTS,
        TOP_BOOSTS,
        CHECK_ORDERS,
        PAIR_INFO,
        SEARCH_PAIRS,
        TOKEN_POOLS,
        TOKEN_DETAILS,
    ];
}

pub mod coingecko {
    use super::*;

    pub const PRICE: EndpointDescriptor = EndpointDescriptor {
        name: "price",
        path: "/simple/price",
        query: &[
            QueryParam::Required { key: "ids", arg: "ids" },
            QueryParam::Required { key: "vs_currencies", arg: "vs_currencies" },
        ],
        flags: &[
            QueryFlag::IncludeMarketCap,
            QueryFlag::Include24hrVol,
            QueryFlag::Include24hrChange,
            QueryFlag::IncludeLastUpdatedAt,
        ],
    };

    pub const TOKEN_PRICE: EndpointDescriptor = EndpointDescriptor {
        name: "token_price",
        path: "/simple/token_price/{platform}",
        query: &[
            QueryParam::Required { key: "contract_addresses", arg: "addresses" },
            QueryParam::Required { key: "vs_currencies", arg: "vs_currencies" },
        ],
        flags: &[],
    };

    pub const SUPPORTED_CURRENCIES: EndpointDescriptor = EndpointDescriptor {
        name: "supported_currencies",
        path: "/simple/supported_vs_currencies",
        query: &[],
        flags: &[],
    };

    pub const COINS_LIST: EndpointDescriptor = EndpointDescriptor {
        name: "coins_list",
        path: "/coins/list",
        query: &[],
        flags: &[],
    };

    /// First page of coins ordered by market cap, the market-data variant
    /// of `COINS_LIST`.
    pub const COINS_MARKETS: EndpointDescriptor = EndpointDescriptor {
        name: "coins_markets",
        path: "/coins/markets",
        query: &[
            QueryParam::Defaulted { key: "vs_currency", arg: "vs_currency", default: "usd" },
            QueryParam::Defaulted { key: "order", arg: "order", default: "market_cap_desc" },
            QueryParam::Defaulted { key: "per_page", arg: "per_page", default: "100" },
            QueryParam::Defaulted { key: "page", arg: "page", default: "1" },
        ],
        flags: &[],
    };

    pub const COIN_DATA: EndpointDescriptor = EndpointDescriptor {
        name: "coin_data",
        path: "/coins/{id}",
        query: &[QueryParam::Fixed { key: "localization", value: "false" }],
        flags: &[
            QueryFlag::Tickers,
            QueryFlag::MarketData,
            QueryFlag::CommunityData,
            QueryFlag::DeveloperData,
        ],
    };

    pub const COIN_HISTORY: EndpointDescriptor = EndpointDescriptor {
        name: "coin_history",
        path: "/coins/{id}/history",
        query: &[QueryParam::Required { key: "date", arg: "date" }],
        flags: &[],
    };

    pub const MARKET_CHART: EndpointDescriptor = EndpointDescriptor {
        name: "market_chart",
        path: "/coins/{id}/market_chart",
        query: &[
            QueryParam::Defaulted { key: "vs_currency", arg: "currency", default: "usd" },
            QueryParam::Defaulted { key: "days", arg: "days", default: "1" },
        ],
        flags: &[],
    };

    pub const ALL: [EndpointDescriptor; 8] = [
        PRICE,
        TOKEN_PRICE,
        SUPPORTED_CURRENCIES,
        COINS_LIST,
        COINS_MARKETS,
        COIN_DATA,
        COIN_HISTORY,
        MARKET_CHART,
    ];
}

/// Looks a descriptor up by its operation name across both providers.
pub fn by_name(name: &str) -> Option<EndpointDescriptor> {
    dexscreener::ALL
        .into_iter()
        .chain(coingecko::ALL)
        .find(|d| d.name == name)
}
