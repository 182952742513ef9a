//! Fixture server imitating the DexScreener and CoinGecko endpoints.
//!
//! DexScreener routes sit at the root, CoinGecko routes under `/api/v3`, so
//! one origin serves both providers. Payloads are small deterministic
//! fixtures shaped like the real ones. A few coin ids trigger failures:
//! `throttled` answers 429, `garbled` answers 200 with an HTML body, and
//! any id outside `KNOWN_COINS` answers 404.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

pub const KNOWN_COINS: [(&str, &str, &str); 3] = [
    ("bitcoin", "btc", "Bitcoin"),
    ("ethereum", "eth", "Ethereum"),
    ("solana", "sol", "Solana"),
];

/// Longest `market_chart` series served, one point per day.
const MAX_CHART_POINTS: u32 = 365;

const COIN_SECTIONS: [&str; 4] = ["tickers", "market_data", "community_data", "developer_data"];

type Params = Query<HashMap<String, String>>;

pub fn app() -> Router {
    let coingecko = Router::new()
        .route("/simple/price", get(simple_price))
        .route("/simple/token_price/{platform}", get(token_price))
        .route("/simple/supported_vs_currencies", get(supported_currencies))
        .route("/coins/list", get(coins_list))
        .route("/coins/markets", get(coins_markets))
        .route("/coins/{id}", get(coin_data))
        .route("/coins/{id}/history", get(coin_history))
        .route("/coins/{id}/market_chart", get(market_chart));

    Router::new()
        .route("/token-profiles/latest/v1", get(latest_profiles))
        .route("/token-boosts/latest/v1", get(latest_boosts))
        .route("/token-boosts/top/v1", get(top_boosts))
        .route("/orders/v1/{chain}/{token}", get(orders))
        .route("/latest/dex/pairs/{chain}/{pair}", get(pair_info))
        .route("/latest/dex/search", get(search_pairs))
        // Both token routes share the first parameter name; extraction is
        // positional.
        .route("/latest/dex/tokens/{segment}", get(token_pools))
        .route("/latest/dex/tokens/{segment}/{token}", get(token_details))
        .nest("/api/v3", coingecko)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// ---------------------------------------------------------------------------
// DexScreener
// ---------------------------------------------------------------------------

fn profile(chain: &str, token: &str) -> Value {
    json!({
        "url": format!("https://dexscreener.com/{chain}/{token}"),
        "chainId": chain,
        "tokenAddress": token,
        "icon": format!("https://cdn.dexscreener.com/{token}.png"),
        "description": "fixture token",
        "links": [{"type": "twitter", "url": "https://x.com/fixture"}]
    })
}

fn boost(chain: &str, token: &str, amount: u64) -> Value {
    let mut value = profile(chain, token);
    value["amount"] = json!(amount);
    value["totalAmount"] = json!(amount * 10);
    value
}

fn pair(chain: &str, pair_address: &str, base: &str) -> Value {
    json!({
        "chainId": chain,
        "dexId": "fixturedex",
        "url": format!("https://dexscreener.com/{chain}/{pair_address}"),
        "pairAddress": pair_address,
        "baseToken": {"address": base, "name": "Fixture", "symbol": "FIX"},
        "quoteToken": {"address": "QUOTE", "name": "Wrapped", "symbol": "WQ"},
        "priceNative": "0.0005",
        "priceUsd": "0.0812",
        "liquidity": {"usd": 125000.5, "base": 1000000.0, "quote": 500.0},
        "fdv": 812000.0,
        "marketCap": 790000.0,
        "pairCreatedAt": 1700000000000_i64
    })
}

fn pairs_envelope(pairs: Vec<Value>) -> Json<Value> {
    let pairs = if pairs.is_empty() { Value::Null } else { Value::Array(pairs) };
    Json(json!({"schemaVersion": "1.0.0", "pairs": pairs}))
}

async fn latest_profiles() -> Json<Value> {
    Json(json!([profile("solana", "So1Token"), profile("bsc", "0xbsctoken")]))
}

async fn latest_boosts() -> Json<Value> {
    Json(json!([boost("solana", "So1Token", 50)]))
}

async fn top_boosts() -> Json<Value> {
    Json(json!([boost("bsc", "0xbsctoken", 500), boost("solana", "So1Token", 50)]))
}

async fn orders(Path((chain, token)): Path<(String, String)>) -> Json<Value> {
    Json(json!([{
        "type": "tokenProfile",
        "status": "approved",
        "paymentTimestamp": 1700000000000_i64,
        "chainId": chain,
        "tokenAddress": token
    }]))
}

async fn pair_info(Path((chain, pair_address)): Path<(String, String)>) -> Json<Value> {
    pairs_envelope(vec![pair(&chain, &pair_address, "BASE")])
}

async fn search_pairs(Query(params): Params) -> Response {
    let Some(query) = params.get("q") else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "q is required"}))).into_response();
    };
    let mut found = pair("solana", "SEARCHPAIR", query);
    found["baseToken"]["name"] = json!(query);
    pairs_envelope(vec![found]).into_response()
}

async fn token_pools(Path(token): Path<String>) -> Json<Value> {
    pairs_envelope(vec![pair("solana", "POOL1", &token), pair("bsc", "POOL2", &token)])
}

async fn token_details(Path((chain, token)): Path<(String, String)>) -> Json<Value> {
    if chain == "unknownchain" {
        return pairs_envelope(Vec::new());
    }
    pairs_envelope(vec![pair(&chain, "POOL1", &token)])
}

// ---------------------------------------------------------------------------
// CoinGecko
// ---------------------------------------------------------------------------

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({"error": message}))).into_response()
}

fn csv(params: &HashMap<String, String>, key: &str) -> Option<Vec<String>> {
    params
        .get(key)
        .map(|raw| raw.split(',').map(str::to_string).collect())
}

fn is_set(params: &HashMap<String, String>, key: &str) -> bool {
    params.get(key).is_some_and(|v| v == "true")
}

fn quote_map(currencies: &[String], params: &HashMap<String, String>) -> Value {
    let mut quotes = Map::new();
    for currency in currencies {
        quotes.insert(currency.clone(), json!(100.5));
        if is_set(params, "include_market_cap") {
            quotes.insert(format!("{currency}_market_cap"), json!(1.0e9));
        }
        if is_set(params, "include_24hr_vol") {
            quotes.insert(format!("{currency}_24h_vol"), json!(2.0e7));
        }
        if is_set(params, "include_24hr_change") {
            quotes.insert(format!("{currency}_24h_change"), json!(-1.25));
        }
    }
    if is_set(params, "include_last_updated_at") {
        quotes.insert("last_updated_at".to_string(), json!(1712345678));
    }
    Value::Object(quotes)
}

async fn simple_price(Query(params): Params) -> Response {
    let (Some(ids), Some(currencies)) = (csv(&params, "ids"), csv(&params, "vs_currencies")) else {
        return bad_request("ids and vs_currencies are required");
    };
    let body: Map<String, Value> = ids
        .into_iter()
        .filter(|id| KNOWN_COINS.iter().any(|(known, _, _)| *known == id.as_str()))
        .map(|id| (id, quote_map(&currencies, &params)))
        .collect();
    Json(Value::Object(body)).into_response()
}

async fn token_price(Path(platform): Path<String>, Query(params): Params) -> Response {
    let (Some(addresses), Some(currencies)) =
        (csv(&params, "contract_addresses"), csv(&params, "vs_currencies"))
    else {
        return bad_request("contract_addresses and vs_currencies are required");
    };
    if platform != "ethereum" && platform != "binance-smart-chain" {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "platform not found"}))).into_response();
    }
    let body: Map<String, Value> = addresses
        .into_iter()
        .map(|address| (address.to_lowercase(), quote_map(&currencies, &params)))
        .collect();
    Json(Value::Object(body)).into_response()
}

async fn supported_currencies() -> Json<Value> {
    Json(json!(["btc", "eth", "usd", "eur", "jpy"]))
}

async fn coins_list() -> Json<Value> {
    let coins: Vec<Value> = KNOWN_COINS
        .iter()
        .map(|(id, symbol, name)| json!({"id": id, "symbol": symbol, "name": name}))
        .collect();
    Json(Value::Array(coins))
}

async fn coins_markets(Query(params): Params) -> Response {
    let Some(currency) = params.get("vs_currency") else {
        return bad_request("vs_currency is required");
    };
    let per_page: usize = params
        .get("per_page")
        .and_then(|v| v.parse().ok())
        .unwrap_or(100);
    let coins: Vec<Value> = KNOWN_COINS
        .iter()
        .take(per_page)
        .enumerate()
        .map(|(rank, (id, symbol, name))| {
            json!({
                "id": id,
                "symbol": symbol,
                "name": name,
                "current_price": 100.5,
                "market_cap": 1.0e9 / (rank as f64 + 1.0),
                "market_cap_rank": rank + 1,
                "total_volume": 2.0e7,
                "price_change_percentage_24h": -1.25,
                "last_updated": "2024-04-05T12:00:00.000Z",
                "quote_currency": currency,
                "order": params.get("order"),
                "page": params.get("page")
            })
        })
        .collect();
    Json(Value::Array(coins)).into_response()
}

/// Shared lookup for the `/coins/{id}...` routes, including the failure
/// trigger ids.
fn coin(id: &str) -> Result<(&'static str, &'static str), Response> {
    match id {
        "throttled" => Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"status": {"error_code": 429, "error_message": "You've exceeded the Rate Limit"}})),
        )
            .into_response()),
        "garbled" => Err((StatusCode::OK, "<html><body>maintenance</body></html>").into_response()),
        _ => KNOWN_COINS
            .iter()
            .find(|(known, _, _)| *known == id)
            .map(|(_, symbol, name)| (*symbol, *name))
            .ok_or_else(|| (StatusCode::NOT_FOUND, Json(json!({"error": "coin not found"}))).into_response()),
    }
}

async fn coin_data(Path(id): Path<String>, Query(params): Params) -> Response {
    let (symbol, name) = match coin(&id) {
        Ok(found) => found,
        Err(response) => return response,
    };
    let mut body = json!({"id": id, "symbol": symbol, "name": name});
    if params.get("localization").map(String::as_str) != Some("false") {
        body["localization"] = json!({"en": name});
    }
    for section in COIN_SECTIONS {
        if is_set(&params, section) {
            body[section] = json!({"fixture": true});
        }
    }
    Json(body).into_response()
}

async fn coin_history(Path(id): Path<String>, Query(params): Params) -> Response {
    let (symbol, name) = match coin(&id) {
        Ok(found) => found,
        Err(response) => return response,
    };
    let Some(date) = params.get("date") else {
        return bad_request("date is required");
    };
    Json(json!({
        "id": id,
        "symbol": symbol,
        "name": name,
        "date": date,
        "market_data": {"current_price": {"usd": 100.5}}
    }))
    .into_response()
}

async fn market_chart(Path(id): Path<String>, Query(params): Params) -> Response {
    if let Err(response) = coin(&id) {
        return response;
    }
    let (Some(currency), Some(days)) = (params.get("vs_currency"), params.get("days")) else {
        return bad_request("vs_currency and days are required");
    };
    let points: u32 = match days.as_str() {
        "max" => MAX_CHART_POINTS,
        other => match other.parse::<u32>() {
            Ok(n) => n.min(MAX_CHART_POINTS),
            Err(_) => return bad_request("days must be a number or max"),
        },
    };
    let series = |value: f64| -> Vec<[f64; 2]> {
        (0..points.max(1))
            .map(|i| [1711929600000.0 + f64::from(i) * 86_400_000.0, value])
            .collect()
    };
    Json(json!({
        "prices": series(100.5),
        "market_caps": series(1.0e9),
        "total_volumes": series(2.0e7),
        "vs_currency": currency
    }))
    .into_response()
}
