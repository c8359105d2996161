//! Plain-text rendering for the CLI. Every function returns a `String`; the
//! caller decides where it is printed.

use coinsieve::model::{Bounds, FilterModel};
use coinsieve::{active_filters, MarketAsset};
use unicode_width::UnicodeWidthStr;

const NAME_WIDTH: usize = 24;

fn pad_right(text: &str, width: usize) -> String {
    let shown = truncate(text, width);
    let fill = width.saturating_sub(shown.width());
    format!("{}{}", shown, " ".repeat(fill))
}

fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        let next = format!("{}{}", out, ch);
        if next.width() + 1 > width {
            break;
        }
        out = next;
    }
    out.push('…');
    out
}

/// Compact money figure: 1.26T, 372.00B, 310.00M, 14.2
pub fn compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1.0 {
        format!("{:.2}", value)
    } else {
        format!("{}", value)
    }
}

fn bounds(b: Bounds) -> String {
    match (b.min, b.max) {
        (Some(min), Some(max)) => format!("{} to {}", min, max),
        (Some(min), None) => format!(">= {}", min),
        (None, Some(max)) => format!("<= {}", max),
        (None, None) => "any".to_string(),
    }
}

/// One line per active filter, followed by the count.
pub fn render_summary(model: &FilterModel) -> String {
    let active = active_filters(model);
    if active.is_empty() {
        return "No active filters\n".to_string();
    }

    let mut out = String::new();
    if model.price.enabled {
        out.push_str(&format!("  price        {}\n", bounds(model.price.bounds())));
    }
    if model.market_cap.enabled {
        let detail = match model.market_cap.category {
            Some(coinsieve::MarketCapCategory::Custom) => {
                format!("custom {}", bounds(model.market_cap.bounds()))
            }
            Some(category) => category.to_string(),
            None => "any".to_string(),
        };
        out.push_str(&format!("  market cap   {}\n", detail));
    }
    if model.volume.enabled {
        out.push_str(&format!("  volume       {}\n", bounds(model.volume.bounds())));
    }
    if model.change_24h.enabled {
        let detail = match model.change_24h.kind {
            Some(coinsieve::ChangeKind::Custom) => {
                format!("custom {}", bounds(model.change_24h.bounds()))
            }
            Some(kind) => kind.to_string(),
            None => "any".to_string(),
        };
        out.push_str(&format!("  change 24h   {}\n", detail));
    }
    if model.ranking.enabled {
        let top = model
            .ranking
            .top_n
            .map_or(coinsieve::engine::DEFAULT_TOP_N, |top| top.value());
        out.push_str(&format!("  ranking      top {}\n", top));
    }
    let quick: Vec<String> = coinsieve::QuickFilter::ALL
        .into_iter()
        .filter(|q| model.quick_filters.get(*q))
        .map(|q| q.to_string())
        .collect();
    if !quick.is_empty() {
        out.push_str(&format!("  quick        {}\n", quick.join(", ")));
    }

    format!("Active filters ({}):\n{}", active.len(), out)
}

/// Tabular listing of assets.
pub fn render_table(assets: &[MarketAsset], total: usize) -> String {
    let mut out = format!(
        "{:>5}  {}  {:>12}  {:>10}  {:>10}  {:>8}\n",
        "RANK",
        pad_right("NAME", NAME_WIDTH),
        "PRICE",
        "MCAP",
        "VOLUME",
        "24H %"
    );
    for asset in assets {
        out.push_str(&format!(
            "{:>5}  {}  {:>12}  {:>10}  {:>10}  {:>8.2}\n",
            asset.market_cap_rank,
            pad_right(asset.label(), NAME_WIDTH),
            compact(asset.current_price),
            compact(asset.market_cap),
            compact(asset.total_volume),
            asset.price_change_percentage_24h
        ));
    }
    out.push_str(&format!("{} of {} assets\n", assets.len(), total));
    out
}
