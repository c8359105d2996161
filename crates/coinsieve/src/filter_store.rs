//! # Filter Store
//!
//! The single owner of the session's current [`FilterModel`]. UI code holds one
//! `FilterStore` (passed down explicitly, never global) and changes filters only
//! through its setters.
//!
//! ## State
//!
//! [`FilterState`] bundles the model with two flags:
//! - `is_loading`: `true` from construction until [`FilterStore::hydrate`] has run.
//! - `has_active`: recomputed on every change, never lazily on read.
//!
//! Snapshots are cheap clones. The model lives behind an `Arc` that is replaced
//! (never mutated) on each change, so `Arc::ptr_eq` tells a consumer whether
//! anything changed since its last snapshot.
//!
//! ## Mutation Flow
//!
//! ```text
//! setter ─▶ build new model from current ─▶ swap in-memory state ─▶ save
//! ```
//!
//! The in-memory swap happens first and is kept whatever the save outcome: a
//! failed write is logged by the persistence layer and reported through the
//! setter's `bool` return, nothing more. Every setter performs exactly one write.
//!
//! ## Enabled Rules
//!
//! | Setter | `enabled` becomes |
//! |--------|-------------------|
//! | `update_price`, `update_volume` | `min.is_some() \|\| max.is_some()` |
//! | `update_market_cap`, `update_change_24h` | `true`, even with no arguments |
//! | `update_ranking` | `top_n.is_some()` |

use crate::asset::AssetRecord;
use crate::engine;
use crate::model::{
    ChangeFilter, ChangeKind, FilterModel, MarketCapCategory, MarketCapFilter, QuickFilter,
    RangeFilter, RankingFilter, TopN, DEFAULT_MODEL,
};
use crate::store::backend::KeyValueStore;
use crate::store::persistence::FilterPersistence;
use log::info;
use std::sync::Arc;

/// A consistent view of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub model: Arc<FilterModel>,
    pub is_loading: bool,
    pub has_active: bool,
}

impl FilterState {
    fn loading() -> Self {
        Self {
            model: Arc::new(DEFAULT_MODEL),
            is_loading: true,
            has_active: false,
        }
    }

    fn ready(model: FilterModel) -> Self {
        Self {
            has_active: engine::has_active(&model),
            model: Arc::new(model),
            is_loading: false,
        }
    }
}

pub struct FilterStore<B: KeyValueStore> {
    persistence: FilterPersistence<B>,
    state: FilterState,
}

impl<B: KeyValueStore> FilterStore<B> {
    /// A store that has not loaded yet: `is_loading` is set and the model is
    /// the default until [`Self::hydrate`] runs.
    pub fn new(persistence: FilterPersistence<B>) -> Self {
        Self {
            persistence,
            state: FilterState::loading(),
        }
    }

    /// Create and hydrate in one step.
    pub fn open(persistence: FilterPersistence<B>) -> Self {
        let mut store = Self::new(persistence);
        store.hydrate();
        store
    }

    /// Load the persisted model. Always clears `is_loading`; any load failure
    /// has already degraded to the default model.
    pub fn hydrate(&mut self) {
        let model = self.persistence.load();
        self.state = FilterState::ready(model);
        info!(
            "filter store ready with {} active filter(s)",
            engine::count_active(&model)
        );
    }

    pub fn state(&self) -> FilterState {
        self.state.clone()
    }

    pub fn model(&self) -> Arc<FilterModel> {
        Arc::clone(&self.state.model)
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn has_active(&self) -> bool {
        self.state.has_active
    }

    pub fn count_active(&self) -> usize {
        engine::count_active(&self.state.model)
    }

    pub fn persistence(&self) -> &FilterPersistence<B> {
        &self.persistence
    }

    /// Filter `data` with the current model.
    pub fn apply<A: AssetRecord + Clone>(&self, data: &[A]) -> Vec<A> {
        engine::apply(&self.state.model, data)
    }

    /// Borrowing form of [`Self::apply`].
    pub fn select<'a, A: AssetRecord>(&self, data: &'a [A]) -> Vec<&'a A> {
        engine::select(&self.state.model, data)
    }

    pub fn update_price(&mut self, min: Option<f64>, max: Option<f64>) -> bool {
        let model = FilterModel {
            price: RangeFilter::from_bounds(min, max),
            ..*self.state.model
        };
        self.commit(model)
    }

    /// Always leaves the market cap filter enabled, even with no arguments.
    pub fn update_market_cap(
        &mut self,
        category: Option<MarketCapCategory>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> bool {
        let model = FilterModel {
            market_cap: MarketCapFilter {
                enabled: true,
                category,
                min,
                max,
            },
            ..*self.state.model
        };
        self.commit(model)
    }

    pub fn update_volume(&mut self, min: Option<f64>, max: Option<f64>) -> bool {
        let model = FilterModel {
            volume: RangeFilter::from_bounds(min, max),
            ..*self.state.model
        };
        self.commit(model)
    }

    /// Always leaves the 24h change filter enabled, even with no arguments.
    pub fn update_change_24h(
        &mut self,
        kind: Option<ChangeKind>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> bool {
        let model = FilterModel {
            change_24h: ChangeFilter {
                enabled: true,
                kind,
                min,
                max,
            },
            ..*self.state.model
        };
        self.commit(model)
    }

    pub fn update_ranking(&mut self, top_n: Option<TopN>) -> bool {
        let model = FilterModel {
            ranking: RankingFilter {
                enabled: top_n.is_some(),
                top_n,
            },
            ..*self.state.model
        };
        self.commit(model)
    }

    pub fn toggle_quick_filter(&mut self, which: QuickFilter) -> bool {
        let model = FilterModel {
            quick_filters: self.state.model.quick_filters.toggled(which),
            ..*self.state.model
        };
        self.commit(model)
    }

    /// Back to [`DEFAULT_MODEL`], persisted like any other change.
    pub fn clear_all(&mut self) -> bool {
        self.commit(DEFAULT_MODEL)
    }

    /// Remove the persisted model altogether and reset memory to the default.
    pub fn reset(&mut self) -> bool {
        self.state = FilterState::ready(DEFAULT_MODEL);
        self.persistence.clear()
    }

    fn commit(&mut self, model: FilterModel) -> bool {
        self.state = FilterState::ready(model);
        self.persistence.save(&model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::FILTER_STORAGE_KEY;
    use crate::test_utils::*;

    fn fresh() -> FilterStore<MemBackend> {
        FilterStore::open(FilterPersistence::new(MemBackend::new()))
    }

    fn stored(store: &FilterStore<MemBackend>) -> FilterModel {
        let raw = store
            .persistence()
            .backend()
            .raw(FILTER_STORAGE_KEY)
            .expect("model should be persisted");
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn new_store_is_loading_until_hydrated() {
        let mut store = FilterStore::new(FilterPersistence::new(MemBackend::new()));
        assert!(store.is_loading());
        assert_eq!(*store.model(), DEFAULT_MODEL);

        store.hydrate();
        assert!(!store.is_loading());
        assert!(!store.has_active());
    }

    #[test]
    fn hydrate_picks_up_persisted_model() {
        let backend = MemBackend::new();
        let saved = FilterModel {
            price: RangeFilter::from_bounds(Some(3.0), None),
            ..DEFAULT_MODEL
        };
        backend.insert_raw(FILTER_STORAGE_KEY, &serde_json::to_string(&saved).unwrap());

        let store = FilterStore::open(FilterPersistence::new(backend));
        assert_eq!(*store.model(), saved);
        assert!(store.has_active());
        assert_eq!(store.count_active(), 1);
    }

    #[test]
    fn hydrate_never_stays_loading_on_failure() {
        let backend = MemBackend::new();
        backend.insert_raw(FILTER_STORAGE_KEY, "][");
        let mut store = FilterStore::new(FilterPersistence::new(backend));
        store.hydrate();
        assert!(!store.is_loading());
        assert_eq!(*store.model(), DEFAULT_MODEL);

        store.persistence().backend().set_simulate_read_error(true);
        store.hydrate();
        assert!(!store.is_loading());
    }

    #[test]
    fn update_price_derives_enabled() {
        let mut store = fresh();
        store.update_price(Some(1.0), None);
        assert!(store.model().price.enabled);
        assert!(store.has_active());

        store.update_price(None, None);
        assert!(!store.model().price.enabled);
        assert!(!store.has_active());
    }

    #[test]
    fn update_volume_derives_enabled() {
        let mut store = fresh();
        store.update_volume(None, Some(10.0));
        assert_eq!(store.model().volume, RangeFilter::from_bounds(None, Some(10.0)));
        assert!(store.model().volume.enabled);

        store.update_volume(None, None);
        assert!(!store.model().volume.enabled);
    }

    #[test]
    fn update_market_cap_and_change_always_enable() {
        let mut store = fresh();
        store.update_market_cap(None, None, None);
        store.update_change_24h(None, None, None);

        let model = store.model();
        assert!(model.market_cap.enabled);
        assert!(model.change_24h.enabled);
        assert_eq!(store.count_active(), 2);
    }

    #[test]
    fn update_ranking_enabled_follows_top_n() {
        let mut store = fresh();
        store.update_ranking(Some(TopN::Top10));
        assert_eq!(store.model().ranking.top_n, Some(TopN::Top10));
        assert!(store.model().ranking.enabled);

        store.update_ranking(None);
        assert!(!store.model().ranking.enabled);
    }

    #[test]
    fn setters_leave_other_dimensions_alone() {
        let mut store = fresh();
        store.update_price(Some(1.0), Some(2.0));
        store.toggle_quick_filter(QuickFilter::Trending);
        store.update_market_cap(Some(MarketCapCategory::Large), None, None);

        let model = store.model();
        assert_eq!(model.price, RangeFilter::from_bounds(Some(1.0), Some(2.0)));
        assert!(model.quick_filters.trending);
        assert_eq!(model.market_cap.category, Some(MarketCapCategory::Large));
        assert_eq!(model.volume, RangeFilter::DISABLED);
    }

    #[test]
    fn toggle_flips_one_flag() {
        let mut store = fresh();
        store.toggle_quick_filter(QuickFilter::HighVolume);
        let flags = store.model().quick_filters;
        assert!(flags.high_volume && !flags.trending && !flags.recently_added);

        store.toggle_quick_filter(QuickFilter::HighVolume);
        assert!(!store.model().quick_filters.high_volume);
        assert!(!store.has_active());
    }

    #[test]
    fn every_mutation_writes_once() {
        let mut store = fresh();
        store.update_price(Some(1.0), None);
        store.update_volume(None, None);
        store.toggle_quick_filter(QuickFilter::Trending);
        store.clear_all();
        assert_eq!(store.persistence().backend().write_count(), 4);
        assert_eq!(stored(&store), DEFAULT_MODEL);
    }

    #[test]
    fn each_mutation_produces_new_model() {
        let mut store = fresh();
        let before = store.state();
        store.update_ranking(Some(TopN::Top50));
        let after = store.state();

        assert!(!Arc::ptr_eq(&before.model, &after.model));
        assert_eq!(*before.model, DEFAULT_MODEL);
        assert!(after.has_active);
    }

    #[test]
    fn write_failure_keeps_in_memory_update() {
        let mut store = fresh();
        store.persistence().backend().set_simulate_write_error(true);

        let persisted = store.update_price(Some(5.0), Some(6.0));
        assert!(!persisted);
        assert!(store.model().price.enabled);
        assert!(store.has_active());
        assert_eq!(store.persistence().backend().raw(FILTER_STORAGE_KEY), None);
    }

    #[test]
    fn clear_all_restores_defaults() {
        let mut store = fresh();
        store.update_price(Some(1.0), None);
        store.update_market_cap(Some(MarketCapCategory::Small), None, None);
        store.update_change_24h(Some(ChangeKind::Gainers), None, None);
        store.update_ranking(Some(TopN::Top100));
        store.toggle_quick_filter(QuickFilter::RecentlyAdded);

        assert!(store.clear_all());
        assert!(!store.has_active());
        assert_eq!(*store.model(), DEFAULT_MODEL);
        assert_eq!(stored(&store), DEFAULT_MODEL);
    }

    #[test]
    fn reset_removes_persisted_key() {
        let mut store = fresh();
        store.update_volume(Some(1.0), None);
        assert!(store.reset());
        assert_eq!(*store.model(), DEFAULT_MODEL);
        assert!(!store.has_active());
        assert_eq!(store.persistence().backend().raw(FILTER_STORAGE_KEY), None);
    }

    #[test]
    fn apply_uses_current_model() {
        let mut store = fresh();
        let data = vec![priced("cheap", 1.0), priced("pricey", 100.0)];
        assert_eq!(store.apply(&data), data);

        store.update_price(None, Some(10.0));
        assert_eq!(ids(&store.apply(&data)), vec!["cheap"]);
        assert_eq!(store.select(&data).len(), 1);
    }
}
