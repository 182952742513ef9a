//! CoinGecko: coin prices, metadata and history.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::warn;

use crate::catalog::coingecko as ep;
use crate::client::ResourceClient;
use crate::config::ClientConfig;
use crate::endpoint::{Args, Flags, QueryFlag};
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};

/// Quote currency used when the caller passes none.
pub const DEFAULT_VS_CURRENCY: &str = "usd";

/// Date format of `/coins/{id}/history`.
pub const HISTORY_DATE_FORMAT: &str = "%d-%m-%Y";

/// Extra fields for `price`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceOptions {
    pub include_market_cap: bool,
    pub include_24hr_vol: bool,
    pub include_24hr_change: bool,
    pub include_last_updated_at: bool,
}

impl PriceOptions {
    pub fn flags(&self) -> Flags {
        let mut flags = Flags::empty();
        flags.set(QueryFlag::IncludeMarketCap, self.include_market_cap);
        flags.set(QueryFlag::Include24hrVol, self.include_24hr_vol);
        flags.set(QueryFlag::Include24hrChange, self.include_24hr_change);
        flags.set(QueryFlag::IncludeLastUpdatedAt, self.include_last_updated_at);
        flags
    }
}

/// Sections to include in `coin_data`. Localization is always off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoinDataOptions {
    pub tickers: bool,
    pub market_data: bool,
    pub community_data: bool,
    pub developer_data: bool,
}

impl CoinDataOptions {
    pub fn flags(&self) -> Flags {
        let mut flags = Flags::empty();
        flags.set(QueryFlag::Tickers, self.tickers);
        flags.set(QueryFlag::MarketData, self.market_data);
        flags.set(QueryFlag::CommunityData, self.community_data);
        flags.set(QueryFlag::DeveloperData, self.developer_data);
        flags
    }
}

/// Service object for CoinGecko. Every method is one GET returning the
/// provider's JSON untouched.
#[derive(Debug, Clone)]
pub struct CoinGecko<T = UreqTransport> {
    client: ResourceClient<T>,
}

impl CoinGecko {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = UreqTransport::new(config.timeout, &config.user_agent);
        Ok(Self::new(ResourceClient::new(&config.coingecko_url, transport)?))
    }
}

impl<T: Transport> CoinGecko<T> {
    pub fn new(client: ResourceClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ResourceClient<T> {
        &self.client
    }

    /// Prices of `ids` in each of `vs_currencies` (`usd` when empty).
    pub fn price<I: AsRef<str>, C: AsRef<str>>(
        &self,
        ids: &[I],
        vs_currencies: &[C],
        options: PriceOptions,
    ) -> Result<Value, ApiError> {
        let args = Args::new().with_list("ids", ids);
        let args = with_vs_currencies(args, vs_currencies);
        self.client.request(&ep::PRICE, &args, options.flags())
    }

    /// Prices of token contracts on `platform` (e.g. `ethereum`,
    /// `binance-smart-chain`).
    pub fn token_price<A: AsRef<str>, C: AsRef<str>>(
        &self,
        platform: &str,
        addresses: &[A],
        vs_currencies: &[C],
    ) -> Result<Value, ApiError> {
        let args = Args::new()
            .with("platform", platform)
            .with_list("addresses", addresses);
        let args = with_vs_currencies(args, vs_currencies);
        self.client.request(&ep::TOKEN_PRICE, &args, Flags::empty())
    }

    pub fn supported_currencies(&self) -> Result<Value, ApiError> {
        self.client
            .request(&ep::SUPPORTED_CURRENCIES, &Args::new(), Flags::empty())
    }

    /// Every coin id, or with `include_market_data` the first hundred coins
    /// by market cap together with their USD market data.
    pub fn coins_list(&self, include_market_data: bool) -> Result<Value, ApiError> {
        let endpoint = if include_market_data {
            &ep::COINS_MARKETS
        } else {
            &ep::COINS_LIST
        };
        self.client.request(endpoint, &Args::new(), Flags::empty())
    }

    pub fn coin_data(&self, id: &str, options: CoinDataOptions) -> Result<Value, ApiError> {
        self.client
            .request(&ep::COIN_DATA, &Args::new().with("id", id), options.flags())
    }

    /// Snapshot of `id` at 00:00 UTC on `date`.
    pub fn coin_history(&self, id: &str, date: NaiveDate) -> Result<Value, ApiError> {
        let args = Args::new()
            .with("id", id)
            .with("date", date.format(HISTORY_DATE_FORMAT).to_string());
        self.client.request(&ep::COIN_HISTORY, &args, Flags::empty())
    }

    /// `coin_history` with the date given as `dd-mm-yyyy`.
    pub fn coin_history_str(&self, id: &str, date: &str) -> Result<Value, ApiError> {
        let date = parse_history_date(date).inspect_err(|err| {
            warn!(endpoint = ep::COIN_HISTORY.name, error = %err, "request rejected");
        })?;
        self.coin_history(id, date)
    }

    /// Price, market cap and volume series. `days` is `1`, `7`, `14`, `30`,
    /// `90`, `180`, `365` or `max` and defaults to `1`; `currency` defaults
    /// to `usd`.
    pub fn market_chart(
        &self,
        id: &str,
        days: Option<&str>,
        currency: Option<&str>,
    ) -> Result<Value, ApiError> {
        let mut args = Args::new().with("id", id);
        if let Some(days) = days {
            args = args.with("days", days);
        }
        if let Some(currency) = currency {
            args = args.with("currency", currency);
        }
        self.client.request(&ep::MARKET_CHART, &args, Flags::empty())
    }
}

fn with_vs_currencies<S: AsRef<str>>(args: Args, vs_currencies: &[S]) -> Args {
    if vs_currencies.is_empty() {
        args.with("vs_currencies", DEFAULT_VS_CURRENCY)
    } else {
        args.with_list("vs_currencies", vs_currencies)
    }
}

fn parse_history_date(date: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(date.trim(), HISTORY_DATE_FORMAT).map_err(|e| ApiError::Caller {
        endpoint: ep::COIN_HISTORY.name,
        reason: format!("date `{date}` is not dd-mm-yyyy: {e}"),
    })
}
