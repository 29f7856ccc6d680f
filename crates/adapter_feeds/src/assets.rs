//! Allow-list of assets the feed can poll.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::FeedError;

/// Set of asset symbols with a live volatility series.
///
/// Symbols are stored upper-case; lookups are case-insensitive. The default
/// set is `BTC` and `ETH`.
///
/// # Examples
/// ```
/// use adapter_feeds::SupportedAssets;
///
/// let assets = SupportedAssets::default();
/// assert!(assets.contains("btc"));
/// assert_eq!(assets.resolve(" eth ").unwrap(), "ETH");
/// assert!(assets.resolve("DOGE").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedAssets {
    symbols: BTreeSet<String>,
}

impl SupportedAssets {
    /// Builds a set from symbols; blank entries are skipped.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symbols = symbols
            .into_iter()
            .map(|s| normalise(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        Self { symbols }
    }

    /// Returns whether an asset is supported.
    pub fn contains(&self, asset: &str) -> bool {
        self.symbols.contains(&normalise(asset))
    }

    /// Returns the canonical symbol for a supported asset.
    ///
    /// # Errors
    /// - `FeedError::UnsupportedAsset` if the asset is not in the set
    pub fn resolve(&self, asset: &str) -> Result<String, FeedError> {
        let symbol = normalise(asset);
        if self.symbols.contains(&symbol) {
            Ok(symbol)
        } else {
            Err(FeedError::UnsupportedAsset(asset.trim().to_string()))
        }
    }

    /// Iterates over the symbols in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// Number of supported assets.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns whether no asset is supported.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for SupportedAssets {
    fn default() -> Self {
        Self::new(["BTC", "ETH"])
    }
}

impl fmt::Display for SupportedAssets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(", "))
    }
}

fn normalise(asset: &str) -> String {
    asset.trim().to_ascii_uppercase()
}
