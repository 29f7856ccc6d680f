//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Contract inputs shared
//! by `price` and `payoff` live here.

pub mod check;
pub mod live_vol;
pub mod payoff;
pub mod price;

use std::str::FromStr;

use adapter_feeds::{FeedConfig, VolatilityFeedClient};
use chrono::{DateTime, Utc};
use clap::Args;
use pricer_core::types::time::{parse_expiry, TimeToExpiry};
use pricer_models::instruments::{OptionContract, OptionSide};
use serde::Serialize;
use tracing::{info, warn};

use crate::{CliError, Result};

/// Option contract inputs
#[derive(Debug, Clone, Args)]
pub struct ContractArgs {
    /// Spot price of the underlying
    #[arg(long, allow_hyphen_values = true)]
    pub spot: f64,

    /// Strike price
    #[arg(long, allow_hyphen_values = true)]
    pub strike: f64,

    /// Expiry instant (RFC 3339, YYYY-MM-DDTHH:MM or YYYY-MM-DD, UTC)
    #[arg(long, conflicts_with_all = ["hours", "minutes", "seconds"])]
    pub expiry: Option<String>,

    /// Hours until expiry
    #[arg(long, default_value_t = 0.0)]
    pub hours: f64,

    /// Minutes until expiry
    #[arg(long, default_value_t = 0.0)]
    pub minutes: f64,

    /// Seconds until expiry
    #[arg(long, default_value_t = 0.0)]
    pub seconds: f64,

    /// Annualised volatility as a decimal (0.5 = 50%)
    #[arg(long, allow_hyphen_values = true)]
    pub volatility: f64,

    /// Risk-free rate as a decimal (0.05 = 5%)
    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    pub rate: f64,

    /// Option side (call, put)
    #[arg(long, default_value = "call")]
    pub side: OptionSide,

    /// Take volatility from the live feed for this asset, falling back to
    /// --volatility if the feed fails
    #[arg(long, value_name = "ASSET")]
    pub live_vol: Option<String>,
}

impl ContractArgs {
    /// Time-to-expiry selected by the arguments.
    pub fn time_to_expiry(&self) -> Result<TimeToExpiry> {
        match &self.expiry {
            Some(expiry) => Ok(TimeToExpiry::instant(parse_expiry(expiry)?)),
            None => Ok(TimeToExpiry::duration(self.hours, self.minutes, self.seconds)?),
        }
    }

    /// Builds the contract valued at `now` with the given volatility.
    ///
    /// Only non-finite numbers are rejected; range problems price to zero.
    pub fn contract_at(&self, volatility: f64, now: DateTime<Utc>) -> Result<OptionContract<f64>> {
        let expiry = self.time_to_expiry()?.year_fraction_at(now);
        Ok(OptionContract::try_new(
            self.spot,
            self.strike,
            expiry,
            volatility,
            self.rate,
            self.side,
        )?)
    }
}

/// Where the volatility input came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilitySource {
    /// Entered on the command line
    Manual,
    /// Read from the live feed
    Live,
}

impl std::fmt::Display for VolatilitySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolatilitySource::Manual => write!(f, "manual"),
            VolatilitySource::Live => write!(f, "live"),
        }
    }
}

/// Runs one feed cycle for `asset` and returns its volatility as a decimal,
/// or `fallback` if the cycle fails.
///
/// # Errors
/// - `CliError::Feed` if the asset is not supported
pub async fn live_or_fallback(
    client: &VolatilityFeedClient,
    asset: &str,
    fallback: f64,
) -> Result<(f64, VolatilitySource)> {
    match client.fetch(asset).await {
        Ok(sample) => {
            info!(asset = %asset, volatility = sample.value, "Using live volatility");
            Ok((sample.as_decimal(), VolatilitySource::Live))
        }
        Err(e) if e.is_recoverable() => {
            warn!(asset = %asset, error = %e, fallback, "Live volatility unavailable; using --volatility");
            Ok((fallback, VolatilitySource::Manual))
        }
        Err(e) => Err(e.into()),
    }
}

/// Volatility for `args`: live when `--live-vol` is given, else manual.
pub async fn resolve_volatility(
    args: &ContractArgs,
    feed: &FeedConfig,
) -> Result<(f64, VolatilitySource)> {
    match &args.live_vol {
        Some(asset) => {
            let client = VolatilityFeedClient::websocket(feed.clone())?;
            live_or_fallback(&client, asset, args.volatility).await
        }
        None => Ok((args.volatility, VolatilitySource::Manual)),
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, csv, table",
                other
            ))),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use adapter_feeds::transport::{Frame, Script, ScriptedTransport};
    use adapter_feeds::FeedError;
    use chrono::TimeZone;
    use std::sync::Arc;

    pub(crate) fn contract_args() -> ContractArgs {
        ContractArgs {
            spot: 100.0,
            strike: 100.0,
            expiry: None,
            hours: 8760.0,
            minutes: 0.0,
            seconds: 0.0,
            volatility: 0.2,
            rate: 0.05,
            side: OptionSide::Call,
            live_vol: None,
        }
    }

    fn client(scripts: Vec<Script>) -> VolatilityFeedClient {
        VolatilityFeedClient::new(Arc::new(ScriptedTransport::new(scripts)), FeedConfig::default())
    }

    #[test]
    fn test_duration_contract() {
        let contract = contract_args().contract_at(0.2, Utc::now()).unwrap();
        assert!((contract.expiry() - 1.0).abs() < 1e-12);
        assert!(contract.is_valid());
    }

    #[test]
    fn test_instant_contract() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let args = ContractArgs {
            expiry: Some("2025-01-02T00:00".to_string()),
            ..contract_args()
        };
        let contract = args.contract_at(0.2, now).unwrap();
        assert!((contract.expiry() - 1.0 / 365.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_inputs_pass_through() {
        let args = ContractArgs {
            spot: -5.0,
            ..contract_args()
        };
        let contract = args.contract_at(0.2, Utc::now()).unwrap();
        assert!(!contract.is_valid());
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        let args = ContractArgs {
            strike: f64::INFINITY,
            ..contract_args()
        };
        assert!(matches!(
            args.contract_at(0.2, Utc::now()),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            contract_args().contract_at(f64::NAN, Utc::now()),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bad_expiry_is_time_error() {
        let args = ContractArgs {
            expiry: Some("whenever".to_string()),
            ..contract_args()
        };
        assert!(matches!(args.time_to_expiry(), Err(CliError::Time(_))));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[tokio::test]
    async fn test_live_volatility_used_when_available() {
        let client = client(vec![Script::respond([Frame::text(
            r#"{"jsonrpc":"2.0","id":1,"result":[[1700000000000,54.789]]}"#,
        )])]);
        let (vol, source) = live_or_fallback(&client, "BTC", 0.3).await.unwrap();
        assert!((vol - 0.5478).abs() < 1e-12);
        assert_eq!(source, VolatilitySource::Live);
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_failure_falls_back() {
        let client = client(vec![Script::silent()]);
        let (vol, source) = live_or_fallback(&client, "ETH", 0.3).await.unwrap();
        assert_eq!(vol, 0.3);
        assert_eq!(source, VolatilitySource::Manual);
    }

    #[tokio::test]
    async fn test_unsupported_asset_is_error() {
        let client = client(vec![]);
        let err = live_or_fallback(&client, "DOGE", 0.3).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Feed(FeedError::UnsupportedAsset(_))
        ));
    }
}
