//! # Filter Model
//!
//! The complete, user-visible filter configuration. A [`FilterModel`] is made of
//! six independent dimensions; a dimension that is disabled (or empty) never
//! constrains the result.
//!
//! | Dimension | Type | Field read |
//! |-----------|------|------------|
//! | `price` | [`RangeFilter`] | `current_price` |
//! | `marketCap` | [`MarketCapFilter`] | `market_cap` |
//! | `volume` | [`RangeFilter`] | `total_volume` |
//! | `change24h` | [`ChangeFilter`] | `price_change_percentage_24h` |
//! | `ranking` | [`RankingFilter`] | `market_cap_rank` |
//! | `quickFilters` | [`QuickFilters`] | `total_volume` (high volume only) |
//!
//! ## Two Flavours of "enabled"
//!
//! Price and volume derive `enabled` from the presence of a bound (see
//! [`RangeFilter::from_bounds`]). Every other dimension carries an explicit flag
//! that the caller sets. Both shapes serialize identically (`{enabled, ...}`), so
//! the asymmetry lives in the constructors, not in the stored JSON.
//!
//! ## Persisted Layout
//!
//! ```json
//! {
//!   "price": { "enabled": true, "min": 10.0 },
//!   "marketCap": { "enabled": true, "category": "large" },
//!   "volume": { "enabled": false },
//!   "change24h": { "enabled": true, "type": "gainers" },
//!   "ranking": { "enabled": true, "topN": 50 },
//!   "quickFilters": { "trending": false, "recentlyAdded": false, "highVolume": true }
//! }
//! ```
//!
//! Unset bounds are omitted rather than written as `null`.
//!
//! ## Immutability
//!
//! Models are plain `Copy` values. Updating one always produces a new value; the
//! [`crate::filter_store::FilterStore`] wraps each new value in a fresh `Arc` so
//! consumers can diff by pointer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound (exclusive) of the small-cap band.
pub const SMALL_CAP_CEILING: f64 = 1e9;

/// Upper bound (exclusive) of the mid-cap band; also the large-cap floor.
pub const MID_CAP_CEILING: f64 = 1e10;

/// The canonical "no filters" model.
pub const DEFAULT_MODEL: FilterModel = FilterModel {
    price: RangeFilter::DISABLED,
    market_cap: MarketCapFilter {
        enabled: false,
        category: None,
        min: None,
        max: None,
    },
    volume: RangeFilter::DISABLED,
    change_24h: ChangeFilter {
        enabled: false,
        kind: None,
        min: None,
        max: None,
    },
    ranking: RankingFilter {
        enabled: false,
        top_n: None,
    },
    quick_filters: QuickFilters {
        trending: false,
        recently_added: false,
        high_volume: false,
    },
};

/// An inclusive numeric interval. A missing side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// `true` if `value` lies within the interval, both ends included.
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Range filter used by the price and volume dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeFilter {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl RangeFilter {
    pub const DISABLED: RangeFilter = RangeFilter {
        enabled: false,
        min: None,
        max: None,
    };

    /// Build a range filter whose `enabled` flag follows the bounds: it is on
    /// as soon as either side is set.
    pub fn from_bounds(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            enabled: min.is_some() || max.is_some(),
            min,
            max,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.min, self.max)
    }
}

impl Default for RangeFilter {
    fn default() -> Self {
        Self::DISABLED
    }
}

/// Market capitalization bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCapCategory {
    /// Below 1B.
    Small,
    /// From 1B up to (not including) 10B.
    Mid,
    /// 10B and above.
    Large,
    /// User supplied min/max.
    Custom,
}

impl MarketCapCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketCapCategory::Small => "small",
            MarketCapCategory::Mid => "mid",
            MarketCapCategory::Large => "large",
            MarketCapCategory::Custom => "custom",
        }
    }

    /// The fixed band for this category, or `None` for `Custom`.
    pub fn band(&self) -> Option<Band> {
        match self {
            MarketCapCategory::Small => Some(Band {
                floor: None,
                ceiling: Some(SMALL_CAP_CEILING),
            }),
            MarketCapCategory::Mid => Some(Band {
                floor: Some(SMALL_CAP_CEILING),
                ceiling: Some(MID_CAP_CEILING),
            }),
            MarketCapCategory::Large => Some(Band {
                floor: Some(MID_CAP_CEILING),
                ceiling: None,
            }),
            MarketCapCategory::Custom => None,
        }
    }
}

impl fmt::Display for MarketCapCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketCapCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(MarketCapCategory::Small),
            "mid" => Ok(MarketCapCategory::Mid),
            "large" => Ok(MarketCapCategory::Large),
            "custom" => Ok(MarketCapCategory::Custom),
            other => Err(format!(
                "unknown market cap category '{}' (expected small, mid, large or custom)",
                other
            )),
        }
    }
}

/// A half-open band `[floor, ceiling)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub floor: Option<f64>,
    pub ceiling: Option<f64>,
}

impl Band {
    pub fn contains(&self, value: f64) -> bool {
        self.floor.is_none_or(|floor| value >= floor)
            && self.ceiling.is_none_or(|ceiling| value < ceiling)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketCapFilter {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<MarketCapCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl MarketCapFilter {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.min, self.max)
    }
}

impl Default for MarketCapFilter {
    fn default() -> Self {
        DEFAULT_MODEL.market_cap
    }
}

/// Which side of the 24h change a filter keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Strictly positive change.
    Gainers,
    /// Strictly negative change.
    Losers,
    /// User supplied min/max.
    Custom,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Gainers => "gainers",
            ChangeKind::Losers => "losers",
            ChangeKind::Custom => "custom",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gainers" => Ok(ChangeKind::Gainers),
            "losers" => Ok(ChangeKind::Losers),
            "custom" => Ok(ChangeKind::Custom),
            other => Err(format!(
                "unknown change type '{}' (expected gainers, losers or custom)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeFilter {
    pub enabled: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChangeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ChangeFilter {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.min, self.max)
    }
}

impl Default for ChangeFilter {
    fn default() -> Self {
        DEFAULT_MODEL.change_24h
    }
}

/// The supported "top N by market cap rank" cutoffs.
///
/// Serialized as the bare number; any other number fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TopN {
    Top10,
    Top50,
    Top100,
    Top500,
}

impl TopN {
    pub const ALL: [TopN; 4] = [TopN::Top10, TopN::Top50, TopN::Top100, TopN::Top500];

    pub fn value(&self) -> u32 {
        match self {
            TopN::Top10 => 10,
            TopN::Top50 => 50,
            TopN::Top100 => 100,
            TopN::Top500 => 500,
        }
    }
}

impl From<TopN> for u32 {
    fn from(top: TopN) -> u32 {
        top.value()
    }
}

impl TryFrom<u32> for TopN {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        TopN::ALL
            .into_iter()
            .find(|top| top.value() == value)
            .ok_or_else(|| format!("unsupported top N value {} (expected 10, 50, 100 or 500)", value))
    }
}

impl fmt::Display for TopN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for TopN {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("'{}' is not a number", s))?;
        TopN::try_from(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RankingFilter {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_n: Option<TopN>,
}

impl Default for RankingFilter {
    fn default() -> Self {
        DEFAULT_MODEL.ranking
    }
}

/// Names one of the boolean quick filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickFilter {
    Trending,
    RecentlyAdded,
    HighVolume,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 3] = [
        QuickFilter::Trending,
        QuickFilter::RecentlyAdded,
        QuickFilter::HighVolume,
    ];

    /// The key used in the persisted JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuickFilter::Trending => "trending",
            QuickFilter::RecentlyAdded => "recentlyAdded",
            QuickFilter::HighVolume => "highVolume",
        }
    }
}

impl fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickFilter {
    type Err = String;

    /// Accepts the JSON key as well as kebab/snake case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "trending" => Ok(QuickFilter::Trending),
            "recentlyadded" => Ok(QuickFilter::RecentlyAdded),
            "highvolume" => Ok(QuickFilter::HighVolume),
            _ => Err(format!(
                "unknown quick filter '{}' (expected trending, recently-added or high-volume)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuickFilters {
    pub trending: bool,
    pub recently_added: bool,
    pub high_volume: bool,
}

impl QuickFilters {
    pub fn get(&self, which: QuickFilter) -> bool {
        match which {
            QuickFilter::Trending => self.trending,
            QuickFilter::RecentlyAdded => self.recently_added,
            QuickFilter::HighVolume => self.high_volume,
        }
    }

    /// Returns a copy with `which` flipped and the other two untouched.
    pub fn toggled(self, which: QuickFilter) -> Self {
        match which {
            QuickFilter::Trending => Self {
                trending: !self.trending,
                ..self
            },
            QuickFilter::RecentlyAdded => Self {
                recently_added: !self.recently_added,
                ..self
            },
            QuickFilter::HighVolume => Self {
                high_volume: !self.high_volume,
                ..self
            },
        }
    }
}

impl Default for QuickFilters {
    fn default() -> Self {
        DEFAULT_MODEL.quick_filters
    }
}

/// The full filter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterModel {
    pub price: RangeFilter,
    pub market_cap: MarketCapFilter,
    pub volume: RangeFilter,
    #[serde(rename = "change24h")]
    pub change_24h: ChangeFilter,
    pub ranking: RankingFilter,
    pub quick_filters: QuickFilters,
}

impl Default for FilterModel {
    fn default() -> Self {
        DEFAULT_MODEL
    }
}

impl FilterModel {
    pub fn is_default(&self) -> bool {
        *self == DEFAULT_MODEL
    }
}

/// One "on" entry of a model, as counted by
/// [`crate::engine::count_active`]. Each quick filter counts on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveFilter {
    Price,
    MarketCap,
    Volume,
    Change24h,
    Ranking,
    Quick(QuickFilter),
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveFilter::Price => f.write_str("price"),
            ActiveFilter::MarketCap => f.write_str("marketCap"),
            ActiveFilter::Volume => f.write_str("volume"),
            ActiveFilter::Change24h => f.write_str("change24h"),
            ActiveFilter::Ranking => f.write_str("ranking"),
            ActiveFilter::Quick(q) => write!(f, "{}", q),
        }
    }
}
