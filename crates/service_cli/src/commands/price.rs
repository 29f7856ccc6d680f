//! Price command implementation
//!
//! Values a single European option and prints its premium and Greeks.

use std::fmt::Write as _;

use adapter_feeds::FeedConfig;
use chrono::Utc;
use pricer_models::analytical::{BlackScholes, GreeksResult};
use pricer_models::instruments::{OptionContract, OptionSide};
use serde::Serialize;
use tracing::info;

use super::{resolve_volatility, ContractArgs, OutputFormat, VolatilitySource};
use crate::{CliError, Result};

/// Premium and Greeks for one contract
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub side: OptionSide,
    pub spot: f64,
    pub strike: f64,
    pub expiry_years: f64,
    pub volatility: f64,
    pub volatility_source: VolatilitySource,
    pub rate: f64,
    pub premium: f64,
    pub greeks: GreeksResult<f64>,
}

impl PriceReport {
    /// Values `contract`.
    pub fn new(contract: &OptionContract<f64>, volatility_source: VolatilitySource) -> Self {
        let valuation = BlackScholes::value(contract);
        Self {
            side: contract.side(),
            spot: contract.spot(),
            strike: contract.strike(),
            expiry_years: contract.expiry(),
            volatility: contract.volatility(),
            volatility_source,
            rate: contract.rate(),
            premium: valuation.premium,
            greeks: valuation.greeks,
        }
    }
}

/// Run the price command
pub async fn run(args: &ContractArgs, format: &str, feed: &FeedConfig) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    if format == OutputFormat::Csv {
        return Err(CliError::InvalidArgument(
            "Unknown format: csv. Supported: json, table".to_string(),
        ));
    }

    let (volatility, source) = resolve_volatility(args, feed).await?;
    let contract = args.contract_at(volatility, Utc::now())?;
    info!(
        side = %contract.side(),
        expiry_years = contract.expiry(),
        volatility,
        source = %source,
        "Pricing contract"
    );

    let report = PriceReport::new(&contract, source);
    print!("{}", render(&report, format)?);
    Ok(())
}

/// Render a report as a table or JSON
pub fn render(report: &PriceReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)? + "\n"),
        OutputFormat::Table => Ok(table(report)),
        OutputFormat::Csv => Err(CliError::InvalidArgument(
            "Price output does not support csv".to_string(),
        )),
    }
}

fn table(report: &PriceReport) -> String {
    let rows = [
        ("Side", report.side.to_string()),
        ("Spot", format!("{:.4}", report.spot)),
        ("Strike", format!("{:.4}", report.strike)),
        ("Expiry (years)", format!("{:.6}", report.expiry_years)),
        (
            "Volatility",
            format!("{:.4} ({})", report.volatility, report.volatility_source),
        ),
        ("Rate", format!("{:.4}", report.rate)),
        ("Premium", format!("{:.4}", report.premium)),
        ("Delta", format!("{:.6}", report.greeks.delta)),
        ("Gamma", format!("{:.6}", report.greeks.gamma)),
        ("Theta (per day)", format!("{:.6}", report.greeks.theta)),
        ("Vega (per 1%)", format!("{:.6}", report.greeks.vega)),
        ("Rho (per 1%)", format!("{:.6}", report.greeks.rho)),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "┌─────────────────┬──────────────────────┐");
    for (label, value) in rows {
        let _ = writeln!(out, "│ {:<15} │ {:>20} │", label, value);
    }
    let _ = writeln!(out, "└─────────────────┴──────────────────────┘");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::contract_args;
    use approx::assert_relative_eq;

    fn reference_report() -> PriceReport {
        let contract = contract_args().contract_at(0.2, Utc::now()).unwrap();
        PriceReport::new(&contract, VolatilitySource::Manual)
    }

    #[test]
    fn test_reference_values() {
        let report = reference_report();
        assert_relative_eq!(report.premium, 10.4506, epsilon = 1e-3);
        assert_relative_eq!(report.greeks.delta, 0.6368, epsilon = 1e-3);
    }

    #[test]
    fn test_json_output() {
        let text = render(&reference_report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["side"], "call");
        assert_eq!(value["volatility_source"], "manual");
        assert!(value["greeks"]["gamma"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_table_output() {
        let text = render(&reference_report(), OutputFormat::Table).unwrap();
        assert!(text.contains("Premium"));
        assert!(text.contains("10.45"));
        assert!(text.contains("call"));
        assert_eq!(text.lines().count(), 14);
    }

    #[test]
    fn test_degenerate_contract_reports_zero() {
        let args = ContractArgs {
            hours: 0.0,
            volatility: 0.5,
            ..contract_args()
        };
        let contract = args.contract_at(0.5, Utc::now()).unwrap();
        let report = PriceReport::new(&contract, VolatilitySource::Manual);
        assert_eq!(report.premium, 0.0);
        assert!(report.greeks.is_zero());
    }

    #[test]
    fn test_csv_rejected() {
        assert!(matches!(
            render(&reference_report(), OutputFormat::Csv),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_run_rejects_unknown_format() {
        let result = run(&contract_args(), "yaml", &FeedConfig::default()).await;
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }
}
