//! Check command implementation
//!
//! Prints the resolved configuration.

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    print!("{}", render(config)?);
    Ok(())
}

/// Render the resolved configuration
pub fn render(config: &CliConfig) -> Result<String> {
    let toml = toml::to_string_pretty(config).map_err(|e| CliError::Serialisation(e.to_string()))?;
    let feed = config.feed.to_feed_config();
    Ok(format!(
        "greekscope {}\n\n{}\nLive volatility assets: {}\n",
        env!("CARGO_PKG_VERSION"),
        toml,
        feed.supported_assets
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_config() {
        let text = render(&CliConfig::default()).unwrap();
        assert!(text.contains("log_level = \"info\""));
        assert!(text.contains("[feed]"));
        assert!(text.contains("timeout_secs = 5"));
        assert!(text.ends_with("Live volatility assets: BTC, ETH\n"));
    }
}
