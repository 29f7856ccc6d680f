//! Payoff command implementation
//!
//! Prices the contract, then prints the buyer/seller profit-and-loss curve
//! at expiry, rounded to two decimals.

use adapter_feeds::FeedConfig;
use chrono::Utc;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::OptionSide;
use pricer_models::payoff::{round2, PayoffCurve, PayoffPoint};
use serde::Serialize;
use std::fmt::Write as _;
use tracing::info;

use super::{resolve_volatility, ContractArgs, OutputFormat};
use crate::Result;

/// Curve plus the premium it was built from
#[derive(Debug, Clone, Serialize)]
pub struct PayoffReport {
    pub side: OptionSide,
    pub premium: f64,
    pub breakeven: f64,
    pub points: Vec<PayoffPoint<f64>>,
}

impl PayoffReport {
    /// Builds the report from an unrounded curve.
    pub fn new(curve: &PayoffCurve<f64>) -> Self {
        Self {
            side: curve.side(),
            premium: round2(curve.premium()),
            breakeven: round2(curve.breakeven()),
            points: curve.rounded(),
        }
    }
}

/// Run the payoff command
pub async fn run(args: &ContractArgs, format: &str, feed: &FeedConfig) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let (volatility, _) = resolve_volatility(args, feed).await?;
    let contract = args.contract_at(volatility, Utc::now())?;

    let premium = BlackScholes::price(&contract);
    let curve = PayoffCurve::for_contract(&contract, premium);
    info!(points = curve.len(), premium, "Payoff curve generated");

    print!("{}", render(&PayoffReport::new(&curve), format)?);
    Ok(())
}

/// Render a report as a table, CSV or JSON
pub fn render(report: &PayoffReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)? + "\n"),
        OutputFormat::Csv => csv_points(&report.points),
        OutputFormat::Table => Ok(table(report)),
    }
}

fn csv_points(points: &[PayoffPoint<f64>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for point in points {
        writer.serialize(point)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| crate::CliError::Serialisation(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| crate::CliError::Serialisation(e.to_string()))
}

fn table(report: &PayoffReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} premium {:.2}, breakeven {:.2}",
        report.side, report.premium, report.breakeven
    );
    let _ = writeln!(out, "┌────────────┬────────────┬────────────┐");
    let _ = writeln!(out, "│ Underlying │ Buyer P&L  │ Seller P&L │");
    let _ = writeln!(out, "├────────────┼────────────┼────────────┤");
    for point in &report.points {
        let _ = writeln!(
            out,
            "│ {:>10.2} │ {:>10.2} │ {:>10.2} │",
            point.underlying_price, point.buyer_pnl, point.seller_pnl
        );
    }
    let _ = writeln!(out, "└────────────┴────────────┴────────────┘");
    out
}
