//! # Filter Engine
//!
//! Pure evaluation of a [`FilterModel`] against a list of assets. The engine
//! holds no state: every call is a function of `(model, data)` and the input is
//! never modified.
//!
//! ## Pipeline
//!
//! Filtering is an ordered sequence of narrowing [`Stage`]s, not a set of
//! independent predicates. Each enabled stage sees only the candidates that
//! survived the stages before it:
//!
//! ```text
//! data ─▶ Price ─▶ MarketCap ─▶ Volume ─▶ Change24h ─▶ Ranking ─▶ HighVolume ─▶ result
//! ```
//!
//! The order matters for [`Stage::HighVolume`], whose threshold is computed from
//! the current candidate set. For every other stage the order only affects
//! how much work is done.
//!
//! ## Stage Rules
//!
//! | Stage | Keeps |
//! |-------|-------|
//! | Price | `min <= current_price <= max` (missing side unbounded) |
//! | MarketCap | fixed band for small/mid/large, range for custom, everything otherwise |
//! | Volume | `min <= total_volume <= max` |
//! | Change24h | `> 0` for gainers, `< 0` for losers, range for custom, everything otherwise |
//! | Ranking | `market_cap_rank <= topN` (100 when unset) |
//! | HighVolume | `total_volume >=` the volume at position `ceil(n * 0.2) - 1` of the candidates sorted by volume, descending |
//!
//! The `trending` and `recentlyAdded` quick filters are part of the model but
//! have no stage: asset records carry no signal to evaluate them against.
//! They still count towards [`count_active`].

use crate::asset::AssetRecord;
use crate::model::{ActiveFilter, ChangeKind, FilterModel, MarketCapCategory, QuickFilter};
use log::debug;

/// Ranking cutoff used when the ranking filter is on without a `topN`.
pub const DEFAULT_TOP_N: u32 = 100;

/// Share of the candidate set (by count) the high volume filter keeps.
pub const HIGH_VOLUME_SHARE: f64 = 0.2;

/// One narrowing step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Price,
    MarketCap,
    Volume,
    Change24h,
    Ranking,
    HighVolume,
}

/// Stages in evaluation order.
pub const PIPELINE: [Stage; 6] = [
    Stage::Price,
    Stage::MarketCap,
    Stage::Volume,
    Stage::Change24h,
    Stage::Ranking,
    Stage::HighVolume,
];

impl Stage {
    pub fn is_enabled(&self, model: &FilterModel) -> bool {
        match self {
            Stage::Price => model.price.enabled,
            Stage::MarketCap => model.market_cap.enabled,
            Stage::Volume => model.volume.enabled,
            Stage::Change24h => model.change_24h.enabled,
            Stage::Ranking => model.ranking.enabled,
            Stage::HighVolume => model.quick_filters.high_volume,
        }
    }

    /// Run this stage over `candidates`, whether or not it is enabled.
    pub fn narrow<'a, A: AssetRecord>(
        &self,
        model: &FilterModel,
        candidates: Vec<&'a A>,
    ) -> Vec<&'a A> {
        match self {
            Stage::Price => {
                let bounds = model.price.bounds();
                keep(candidates, |a| bounds.contains(a.current_price()))
            }
            Stage::MarketCap => match model.market_cap.category {
                Some(MarketCapCategory::Custom) => {
                    let bounds = model.market_cap.bounds();
                    keep(candidates, |a| bounds.contains(a.market_cap()))
                }
                Some(category) => match category.band() {
                    Some(band) => keep(candidates, |a| band.contains(a.market_cap())),
                    None => candidates,
                },
                None => candidates,
            },
            Stage::Volume => {
                let bounds = model.volume.bounds();
                keep(candidates, |a| bounds.contains(a.total_volume()))
            }
            Stage::Change24h => match model.change_24h.kind {
                Some(ChangeKind::Gainers) => {
                    keep(candidates, |a| a.price_change_percentage_24h() > 0.0)
                }
                Some(ChangeKind::Losers) => {
                    keep(candidates, |a| a.price_change_percentage_24h() < 0.0)
                }
                Some(ChangeKind::Custom) => {
                    let bounds = model.change_24h.bounds();
                    keep(candidates, |a| bounds.contains(a.price_change_percentage_24h()))
                }
                None => candidates,
            },
            Stage::Ranking => {
                let top_n = model
                    .ranking
                    .top_n
                    .map_or(DEFAULT_TOP_N, |top| top.value());
                keep(candidates, |a| a.market_cap_rank() <= top_n)
            }
            Stage::HighVolume => {
                let threshold = high_volume_threshold(&candidates);
                keep(candidates, |a| a.total_volume() >= threshold)
            }
        }
    }
}

fn keep<'a, A, F>(candidates: Vec<&'a A>, pred: F) -> Vec<&'a A>
where
    A: AssetRecord,
    F: Fn(&A) -> bool,
{
    candidates.into_iter().filter(|a| pred(a)).collect()
}

/// The minimum volume a candidate needs to count as high volume: the volume
/// of the candidate at index `ceil(len * 0.2) - 1` once sorted by volume,
/// highest first. An empty set has a threshold of 0.
pub fn high_volume_threshold<A: AssetRecord>(candidates: &[&A]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    let mut volumes: Vec<f64> = candidates.iter().map(|a| a.total_volume()).collect();
    volumes.sort_by(|a, b| b.total_cmp(a));

    let cutoff = (volumes.len() as f64 * HIGH_VOLUME_SHARE).ceil() as usize;
    let index = cutoff.saturating_sub(1).min(volumes.len() - 1);
    volumes[index]
}

/// Borrowing form of [`apply`]: references to the matching records, in input order.
pub fn select<'a, A: AssetRecord>(model: &FilterModel, data: &'a [A]) -> Vec<&'a A> {
    let mut candidates: Vec<&A> = data.iter().collect();
    for stage in PIPELINE {
        if !stage.is_enabled(model) {
            continue;
        }
        let before = candidates.len();
        candidates = stage.narrow(model, candidates);
        debug!("{:?} stage kept {} of {}", stage, candidates.len(), before);
    }
    candidates
}

/// Filter `data` with `model`. Records are returned unmodified, in input order.
pub fn apply<A: AssetRecord + Clone>(model: &FilterModel, data: &[A]) -> Vec<A> {
    select(model, data).into_iter().cloned().collect()
}

/// Number of "on" entries: one per enabled dimension plus one per set quick
/// filter flag.
pub fn count_active(model: &FilterModel) -> usize {
    let quick = &model.quick_filters;
    [
        model.price.enabled,
        model.market_cap.enabled,
        model.volume.enabled,
        model.change_24h.enabled,
        model.ranking.enabled,
        quick.trending,
        quick.recently_added,
        quick.high_volume,
    ]
    .into_iter()
    .filter(|on| *on)
    .count()
}

/// `true` as soon as any dimension or quick filter is on.
pub fn has_active(model: &FilterModel) -> bool {
    model.price.enabled
        || model.market_cap.enabled
        || model.volume.enabled
        || model.change_24h.enabled
        || model.ranking.enabled
        || model.quick_filters.trending
        || model.quick_filters.recently_added
        || model.quick_filters.high_volume
}

/// The "on" entries of `model`, in pipeline order followed by quick filters.
pub fn active_filters(model: &FilterModel) -> Vec<ActiveFilter> {
    let mut active = Vec::new();
    if model.price.enabled {
        active.push(ActiveFilter::Price);
    }
    if model.market_cap.enabled {
        active.push(ActiveFilter::MarketCap);
    }
    if model.volume.enabled {
        active.push(ActiveFilter::Volume);
    }
    if model.change_24h.enabled {
        active.push(ActiveFilter::Change24h);
    }
    if model.ranking.enabled {
        active.push(ActiveFilter::Ranking);
    }
    for quick in QuickFilter::ALL {
        if model.quick_filters.get(quick) {
            active.push(ActiveFilter::Quick(quick));
        }
    }
    active
}
