use coinsieve::{
    apply, count_active, parse_assets, FilterPersistence, FilterStore, MarketAsset,
    MarketCapCategory, MemBackend, QuickFilter, TopN, DEFAULT_MODEL,
};

const MARKET: &str = r#"[
  {"id":"bitcoin","symbol":"btc","name":"Bitcoin","current_price":64000,"market_cap":1260000000000,"total_volume":31000000000,"price_change_percentage_24h":-1.2,"market_cap_rank":1,"image":"btc.png"},
  {"id":"ethereum","symbol":"eth","name":"Ethereum","current_price":3100,"market_cap":372000000000,"total_volume":15000000000,"price_change_percentage_24h":2.4,"market_cap_rank":2},
  {"id":"solana","symbol":"sol","name":"Solana","current_price":145,"market_cap":67000000000,"total_volume":2500000000,"price_change_percentage_24h":5.1,"market_cap_rank":5},
  {"id":"chainlink","symbol":"link","name":"Chainlink","current_price":14.2,"market_cap":8400000000,"total_volume":310000000,"price_change_percentage_24h":-0.4,"market_cap_rank":15},
  {"id":"render","symbol":"rndr","name":"Render","current_price":7.1,"market_cap":2700000000,"total_volume":150000000,"price_change_percentage_24h":0.0,"market_cap_rank":34},
  {"id":"tiny","symbol":"tny","name":"Tiny","current_price":0.002,"market_cap":45000000,"total_volume":900000,"price_change_percentage_24h":12.0,"market_cap_rank":812}
]"#;

fn market() -> Vec<MarketAsset> {
    parse_assets(MARKET).unwrap()
}

fn ids(assets: &[MarketAsset]) -> Vec<&str> {
    assets.iter().map(|a| a.id.as_str()).collect()
}

fn store() -> FilterStore<MemBackend> {
    FilterStore::open(FilterPersistence::new(MemBackend::new()))
}

#[test]
fn no_filters_shows_everything() {
    let data = market();
    assert_eq!(apply(&DEFAULT_MODEL, &data), data);
    assert_eq!(count_active(&DEFAULT_MODEL), 0);
}

#[test]
fn mid_caps_that_lost() {
    let mut store = store();
    store.update_market_cap(Some(MarketCapCategory::Mid), None, None);
    store.update_change_24h(Some(coinsieve::ChangeKind::Losers), None, None);

    assert_eq!(ids(&store.apply(&market())), vec!["chainlink"]);
}

#[test]
fn top_ten_high_volume() {
    let mut store = store();
    store.update_ranking(Some(TopN::Top10));
    store.toggle_quick_filter(QuickFilter::HighVolume);

    // Ranking leaves 3 candidates; ceil(3 * 0.2) - 1 = 0 -> only the largest volume.
    assert_eq!(ids(&store.apply(&market())), vec!["bitcoin"]);
}

#[test]
fn extra_fields_pass_through() {
    let mut store = store();
    store.update_price(Some(1000.0), None);
    let result = store.apply(&market());

    assert_eq!(ids(&result), vec!["bitcoin", "ethereum"]);
    assert_eq!(result[0].extra["image"], "btc.png");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json[0]["image"], "btc.png");
}

#[test]
fn ranking_default_keeps_top_hundred() {
    let mut store = store();
    store.update_ranking(Some(TopN::Top100));
    let explicit = store.apply(&market());

    let mut unset = *store.model();
    unset.ranking.top_n = None;
    assert_eq!(apply(&unset, &market()), explicit);
    assert_eq!(ids(&explicit).len(), 5);
}
