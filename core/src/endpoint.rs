//! Declarative endpoint descriptors.
//!
//! # Design
//! Every remote operation is a `const EndpointDescriptor`: a path template
//! with `{name}` placeholder segments, the query parameters it always or
//! optionally carries, and the boolean flags it recognizes. The descriptor
//! resolves caller `Args` and `Flags` into path segments and query pairs;
//! percent-encoding is left to `ResourceClient`, which owns the base URL.

use std::collections::BTreeMap;

use crate::error::ApiError;

/// One query parameter of an endpoint, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryParam {
    /// Emitted from `arg`; a missing value is a caller error.
    Required { key: &'static str, arg: &'static str },
    /// Emitted from `arg` when present, `default` otherwise.
    Defaulted {
        key: &'static str,
        arg: &'static str,
        default: &'static str,
    },
    /// Always emitted with a constant value.
    Fixed { key: &'static str, value: &'static str },
}

/// Optional boolean query flags. A set flag serializes as `key=true`; an
/// unset flag is never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryFlag {
    IncludeMarketCap,
    Include24hrVol,
    Include24hrChange,
    IncludeLastUpdatedAt,
    Tickers,
    MarketData,
    CommunityData,
    DeveloperData,
}

impl QueryFlag {
    pub const ALL: [QueryFlag; 8] = [
        QueryFlag::IncludeMarketCap,
        QueryFlag::Include24hrVol,
        QueryFlag::Include24hrChange,
        QueryFlag::IncludeLastUpdatedAt,
        QueryFlag::Tickers,
        QueryFlag::MarketData,
        QueryFlag::CommunityData,
        QueryFlag::DeveloperData,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            QueryFlag::IncludeMarketCap => "include_market_cap",
            QueryFlag::Include24hrVol => "include_24hr_vol",
            QueryFlag::Include24hrChange => "include_24hr_change",
            QueryFlag::IncludeLastUpdatedAt => "include_last_updated_at",
            QueryFlag::Tickers => "tickers",
            QueryFlag::MarketData => "market_data",
            QueryFlag::CommunityData => "community_data",
            QueryFlag::DeveloperData => "developer_data",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.key() == key)
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A set of independently toggled `QueryFlag`s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags(u8);

impl Flags {
    pub const fn empty() -> Self {
        Flags(0)
    }

    #[must_use]
    pub const fn with(self, flag: QueryFlag) -> Self {
        Flags(self.0 | flag.bit())
    }

    pub fn set(&mut self, flag: QueryFlag, on: bool) {
        if on {
            self.0 |= flag.bit();
        } else {
            self.0 &= !flag.bit();
        }
    }

    pub const fn contains(self, flag: QueryFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<QueryFlag> for Flags {
    fn from_iter<I: IntoIterator<Item = QueryFlag>>(iter: I) -> Self {
        iter.into_iter().fold(Flags::empty(), Flags::with)
    }
}

/// Named arguments for one call, shared by path placeholders and query
/// parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    values: BTreeMap<&'static str, String>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    /// Comma-joins `values` into a single argument. The joined string is
    /// encoded as a unit, so the commas end up as `%2C` in a query.
    #[must_use]
    pub fn with_list<I, S>(self, name: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.with(name, joined)
    }

    /// The value of `name`, treating blank values as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

/// Immutable description of one remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Operation name used in logs and caller errors.
    pub name: &'static str,
    /// `/`-separated path; `{name}` segments are substituted from `Args`.
    pub path: &'static str,
    pub query: &'static [QueryParam],
    pub flags: &'static [QueryFlag],
}

impl EndpointDescriptor {
    /// Placeholder names in the path template, in order.
    pub fn path_args(&self) -> impl Iterator<Item = &'static str> {
        self.path.split('/').filter_map(placeholder)
    }

    /// Argument names that must be present for a call to be issued.
    pub fn required_args(&self) -> impl Iterator<Item = &'static str> + '_ {
        let query = self.query.iter().filter_map(|param| match param {
            QueryParam::Required { arg, .. } => Some(*arg),
            _ => None,
        });
        self.path_args().chain(query)
    }

    /// Every argument name the descriptor reads, required or defaulted.
    pub fn arg_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        let query = self.query.iter().filter_map(|param| match param {
            QueryParam::Required { arg, .. } | QueryParam::Defaulted { arg, .. } => Some(*arg),
            QueryParam::Fixed { .. } => None,
        });
        self.path_args().chain(query)
    }

    pub fn recognizes(&self, flag: QueryFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Path segments with placeholders replaced, unencoded.
    ///
    /// `.` and `..` are refused: URL normalization would collapse them and
    /// send the call to another resource.
    pub fn resolve_path<'a>(&self, args: &'a Args) -> Result<Vec<&'a str>, ApiError> {
        self.path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match placeholder(segment) {
                Some(arg) => self.path_value(args, arg),
                None => Ok(segment),
            })
            .collect()
    }

    fn path_value<'a>(&self, args: &'a Args, arg: &str) -> Result<&'a str, ApiError> {
        let value = args.get(arg).ok_or_else(|| ApiError::missing(self.name, arg))?;
        if matches!(value, "." | "..") {
            return Err(ApiError::Caller {
                endpoint: self.name,
                reason: format!("argument `{arg}` cannot be the path segment `{value}`"),
            });
        }
        Ok(value)
    }

    /// Query pairs in emission order, unencoded. Flags the descriptor does
    /// not recognize are dropped.
    pub fn resolve_query<'a>(
        &self,
        args: &'a Args,
        flags: Flags,
    ) -> Result<Vec<(&'static str, &'a str)>, ApiError> {
        let mut pairs = Vec::with_capacity(self.query.len() + self.flags.len());
        for param in self.query {
            let pair = match *param {
                QueryParam::Required { key, arg } => {
                    (key, args.get(arg).ok_or_else(|| ApiError::missing(self.name, arg))?)
                }
                QueryParam::Defaulted { key, arg, default } => (key, args.get(arg).unwrap_or(default)),
                QueryParam::Fixed { key, value } => (key, value),
            };
            pairs.push(pair);
        }
        pairs.extend(
            self.flags
                .iter()
                .filter(|flag| flags.contains(**flag))
                .map(|flag| (flag.key(), "true")),
        );
        Ok(pairs)
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDERS: EndpointDescriptor = EndpointDescriptor {
        name: "orders",
        path: "/orders/v1/{chain}/{token}",
        query: &[],
        flags: &[],
    };

    const CHART: EndpointDescriptor = EndpointDescriptor {
        name: "chart",
        path: "/coins/{id}/market_chart",
        query: &[
            QueryParam::Required { key: "vs_currency", arg: "currency" },
            QueryParam::Defaulted { key: "days", arg: "days", default: "1" },
            QueryParam::Fixed { key: "interval", value: "daily" },
        ],
        flags: &[QueryFlag::Tickers, QueryFlag::MarketData],
    };

    #[test]
    fn path_args_lists_placeholders_in_order() {
        assert_eq!(ORDERS.path_args().collect::<Vec<_>>(), vec!["chain", "token"]);
        assert_eq!(CHART.required_args().collect::<Vec<_>>(), vec!["id", "currency"]);
        assert_eq!(CHART.arg_names().collect::<Vec<_>>(), vec!["id", "currency", "days"]);
        assert!(CHART.recognizes(QueryFlag::Tickers));
        assert!(!ORDERS.recognizes(QueryFlag::Tickers));
    }

    #[test]
    fn resolve_path_substitutes_by_name() {
        let args = Args::new().with("token", "0xabc").with("chain", "bsc");
        assert_eq!(ORDERS.resolve_path(&args).unwrap(), vec!["orders", "v1", "bsc", "0xabc"]);
    }

    #[test]
    fn resolve_path_rejects_missing_and_blank() {
        let err = ORDERS.resolve_path(&Args::new().with("chain", "bsc")).unwrap_err();
        assert!(matches!(err, ApiError::Caller { endpoint: "orders", .. }));

        let blank = Args::new().with("chain", "  ").with("token", "0xabc");
        assert!(ORDERS.resolve_path(&blank).is_err());
    }

    #[test]
    fn resolve_path_rejects_dot_segments() {
        for value in [".", ".."] {
            let args = Args::new().with("chain", "bsc").with("token", value);
            let err = ORDERS.resolve_path(&args).unwrap_err();
            assert!(matches!(err, ApiError::Caller { endpoint: "orders", .. }), "{value}");
        }
        let args = Args::new().with("chain", "bsc").with("token", "...");
        assert_eq!(ORDERS.resolve_path(&args).unwrap()[3], "...");
    }

    #[test]
    fn resolve_query_applies_defaults_and_fixed_values() {
        let args = Args::new().with("id", "bitcoin").with("currency", "eur");
        let pairs = CHART.resolve_query(&args, Flags::empty()).unwrap();
        assert_eq!(pairs, vec![("vs_currency", "eur"), ("days", "1"), ("interval", "daily")]);
    }

    #[test]
    fn resolve_query_emits_only_recognized_set_flags() {
        let args = Args::new().with("currency", "usd");
        let flags = Flags::empty()
            .with(QueryFlag::MarketData)
            .with(QueryFlag::IncludeMarketCap);
        let pairs = CHART.resolve_query(&args, flags).unwrap();
        assert_eq!(pairs.last(), Some(&("market_data", "true")));
        assert!(!pairs.iter().any(|(k, _)| *k == "include_market_cap" || *k == "tickers"));
    }

    #[test]
    fn flags_toggle_independently() {
        let mut flags: Flags = [QueryFlag::Tickers, QueryFlag::DeveloperData].into_iter().collect();
        assert!(flags.contains(QueryFlag::Tickers));
        flags.set(QueryFlag::Tickers, false);
        assert!(!flags.contains(QueryFlag::Tickers));
        assert!(flags.contains(QueryFlag::DeveloperData));
        flags.set(QueryFlag::DeveloperData, false);
        assert!(flags.is_empty());
    }

    #[test]
    fn flag_keys_roundtrip() {
        for flag in QueryFlag::ALL {
            assert_eq!(QueryFlag::from_key(flag.key()), Some(flag));
        }
        assert_eq!(QueryFlag::from_key("localization"), None);
    }

    #[test]
    fn list_args_are_comma_joined() {
        let args = Args::new().with_list("ids", ["bitcoin", "ethereum"]);
        assert_eq!(args.get("ids"), Some("bitcoin,ethereum"));
        assert_eq!(Args::new().with_list("ids", Vec::<String>::new()).get("ids"), None);
    }
}
