//! Generic request/response contract for one provider.
//!
//! # Design
//! `ResourceClient` holds a base URL and a `Transport` and carries no
//! mutable state between calls. A call is `build` (descriptor + args into
//! an `HttpRequest`, pure), `Transport::execute`, then `parse` (status
//! check and JSON decode, pure). `request` chains the three and logs a
//! failure once before handing it back unchanged. Nothing is retried.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::endpoint::{Args, EndpointDescriptor, Flags};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Stateless client bound to one provider base URL.
///
/// Path values are percent-encoded per segment; query keys and values use
/// form encoding, so a comma-joined list such as `usd,eur` is sent as
/// `usd%2Ceur`.
#[derive(Debug, Clone)]
pub struct ResourceClient<T = UreqTransport> {
    base_url: Url,
    transport: T,
}

impl<T: Transport> ResourceClient<T> {
    pub fn new(base_url: &str, transport: T) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!("base url `{base_url}` cannot carry a path")));
        }
        Ok(Self {
            base_url,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolves `endpoint` against `args` and `flags` into a GET request.
    ///
    /// Fails with `ApiError::Caller` when a required argument is missing;
    /// nothing is sent in that case.
    pub fn build(
        &self,
        endpoint: &EndpointDescriptor,
        args: &Args,
        flags: Flags,
    ) -> Result<HttpRequest, ApiError> {
        let segments = endpoint.resolve_path(args)?;
        let query = endpoint.resolve_query(args, flags)?;

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Config(format!("base url `{}` cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(HttpRequest::get(String::from(url)))
    }

    /// Classifies a response: 2xx bodies are decoded, anything else is
    /// `ApiError::Http` carrying the status alone.
    pub fn parse<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// One complete call returning the decoded body untouched.
    pub fn request(
        &self,
        endpoint: &EndpointDescriptor,
        args: &Args,
        flags: Flags,
    ) -> Result<Value, ApiError> {
        self.request_as(endpoint, args, flags)
    }

    /// Like `request`, decoding straight into `R`.
    pub fn request_as<R: DeserializeOwned>(
        &self,
        endpoint: &EndpointDescriptor,
        args: &Args,
        flags: Flags,
    ) -> Result<R, ApiError> {
        let request = match self.build(endpoint, args, flags) {
            Ok(request) => request,
            Err(err) => {
                warn!(endpoint = endpoint.name, error = %err, "request rejected");
                return Err(err);
            }
        };

        debug!(endpoint = endpoint.name, url = %request.url, "sending request");
        let outcome = self
            .transport
            .execute(&request)
            .and_then(|response| self.parse(response));

        match &outcome {
            Ok(_) => debug!(endpoint = endpoint.name, "request succeeded"),
            Err(err) => warn!(
                endpoint = endpoint.name,
                url = %request.url,
                status = err.status(),
                error = %err,
                "request failed"
            ),
        }
        outcome
    }
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::catalog::{coingecko, dexscreener};
    use crate::endpoint::QueryFlag;
    use crate::error::ErrorKind;

    /// Records every request and answers with a canned outcome.
    #[derive(Debug)]
    struct StubTransport {
        calls: Mutex<Vec<HttpRequest>>,
        reply: fn() -> Result<HttpResponse, ApiError>,
    }

    impl StubTransport {
        fn new(reply: fn() -> Result<HttpResponse, ApiError>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply,
            }
        }

        fn calls(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Transport for StubTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.calls.lock().unwrap().push(request.clone());
            (self.reply)()
        }
    }

    fn respond(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn client(reply: fn() -> Result<HttpResponse, ApiError>) -> ResourceClient<StubTransport> {
        ResourceClient::new("https://api.example.com/api/v3", StubTransport::new(reply)).unwrap()
    }

    fn ok_empty() -> Result<HttpResponse, ApiError> {
        respond(200, "{}")
    }

    #[test]
    fn build_joins_base_path_and_template() {
        let c = client(ok_empty);
        let req = c
            .build(&dexscreener::LATEST_PROFILES, &Args::new(), Flags::empty())
            .unwrap();
        assert_eq!(req.url, "https://api.example.com/api/v3/token-profiles/latest/v1");
        assert_eq!(req.headers, vec![("accept".to_string(), "application/json".to_string())]);
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let c = ResourceClient::new("http://localhost:3000/", StubTransport::new(ok_empty)).unwrap();
        let req = c
            .build(&coingecko::SUPPORTED_CURRENCIES, &Args::new(), Flags::empty())
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/simple/supported_vs_currencies");
    }

    #[test]
    fn path_values_are_encoded_per_segment() {
        let c = client(ok_empty);
        let args = Args::new().with("chain", "bsc").with("pair", "a/b?c");
        let req = c.build(&dexscreener::PAIR_INFO, &args, Flags::empty()).unwrap();
        assert_eq!(req.url, "https://api.example.com/api/v3/latest/dex/pairs/bsc/a%2Fb%3Fc");
    }

    #[test]
    fn dot_segment_values_are_caller_errors() {
        let c = client(ok_empty);
        let err = c
            .request(&dexscreener::TOKEN_POOLS, &Args::new().with("token", ".."), Flags::empty())
            .unwrap_err();
        assert!(matches!(err, ApiError::Caller { endpoint: "token_pools", .. }));

        let args = Args::new().with("chain", "solana").with("token", ".");
        let err = c.request(&dexscreener::CHECK_ORDERS, &args, Flags::empty()).unwrap_err();
        assert!(matches!(err, ApiError::Caller { endpoint: "check_orders", .. }));
        assert_eq!(c.transport().calls(), 0);
    }

    #[test]
    fn list_arguments_are_encoded_as_a_unit() {
        let c = client(ok_empty);
        let args = Args::new()
            .with("platform", "ethereum")
            .with_list("addresses", ["0xabc", "0xdef"])
            .with_list("vs_currencies", ["usd", "eur"]);
        let req = c.build(&coingecko::TOKEN_PRICE, &args, Flags::empty()).unwrap();
        assert_eq!(
            req.url,
            "https://api.example.com/api/v3/simple/token_price/ethereum\
             ?contract_addresses=0xabc%2C0xdef&vs_currencies=usd%2Ceur"
        );
    }

    #[test]
    fn only_set_flags_are_serialized() {
        let c = client(ok_empty);
        let args = Args::new().with("ids", "bitcoin").with("vs_currencies", "usd");
        let flags = Flags::empty().with(QueryFlag::IncludeMarketCap);
        let req = c.build(&coingecko::PRICE, &args, flags).unwrap();
        assert_eq!(req.query(), "ids=bitcoin&vs_currencies=usd&include_market_cap=true");

        let plain = c.build(&coingecko::PRICE, &args, Flags::empty()).unwrap();
        assert_eq!(plain.query(), "ids=bitcoin&vs_currencies=usd");
    }

    #[test]
    fn missing_argument_never_reaches_transport() {
        let c = client(ok_empty);
        let err = c
            .request(&dexscreener::CHECK_ORDERS, &Args::new().with("chain", "solana"), Flags::empty())
            .unwrap_err();
        assert!(matches!(err, ApiError::Caller { endpoint: "check_orders", .. }));
        assert_eq!(c.transport().calls(), 0);
    }

    #[test]
    fn non_success_status_is_http_error_without_body() {
        let c = client(|| respond(429, r#"{"status":{"error_message":"rate limited"}}"#));
        let err = c
            .request(&coingecko::COINS_LIST, &Args::new(), Flags::empty())
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 429 }));
        assert!(!err.to_string().contains("rate limited"));
        assert_eq!(c.transport().calls(), 1);
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let c = client(|| respond(200, "<html>not json</html>"));
        let err = c
            .request(&dexscreener::TOP_BOOSTS, &Args::new(), Flags::empty())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn transport_failure_passes_through() {
        let c = client(|| Err(ApiError::Transport("connection refused".to_string())));
        let err = c
            .request(&dexscreener::LATEST_BOOSTS, &Args::new(), Flags::empty())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn success_returns_body_unmodified() {
        let c = client(|| respond(200, r#"{"bitcoin":{"usd":67123.5,"usd_market_cap":1.3e12}}"#));
        let args = Args::new().with("ids", "bitcoin").with("vs_currencies", "usd");
        let value = c.request(&coingecko::PRICE, &args, Flags::empty()).unwrap();
        assert_eq!(value, json!({"bitcoin": {"usd": 67123.5, "usd_market_cap": 1.3e12}}));
    }

    #[test]
    fn any_2xx_status_is_success() {
        let c = client(|| respond(203, "[]"));
        let value = c
            .request(&dexscreener::LATEST_PROFILES, &Args::new(), Flags::empty())
            .unwrap();
        assert_eq!(value, json!([]));
    }

    #[test]
    fn opaque_base_url_is_rejected() {
        let err = ResourceClient::new("mailto:someone@example.com", StubTransport::new(ok_empty)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = ResourceClient::new("not a url", StubTransport::new(ok_empty)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
