use super::render::{render_summary, render_table};
use super::setup::{Cli, Commands};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use coinsieve::config::{OutputFormat, SieveConfig};
use coinsieve::init::{initialize, SieveContext};
use coinsieve::load_assets;
use std::path::PathBuf;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut ctx = initialize(&cwd, cli.data.clone())?;
    log::debug!("filters stored under {}", ctx.data_dir.display());

    // Naked coinsieve shows the current filters
    let command = cli.command.unwrap_or(Commands::Show { json: false });

    match command {
        Commands::Show { json } => handle_show(&ctx, json),
        Commands::Price { min, max } => {
            check_bounds(min, max)?;
            let saved = ctx.store.update_price(min, max);
            report_change(&ctx, saved);
            Ok(())
        }
        Commands::MarketCap { category, min, max } => {
            check_bounds(min, max)?;
            let saved = ctx.store.update_market_cap(category, min, max);
            report_change(&ctx, saved);
            Ok(())
        }
        Commands::Volume { min, max } => {
            check_bounds(min, max)?;
            let saved = ctx.store.update_volume(min, max);
            report_change(&ctx, saved);
            Ok(())
        }
        Commands::Change { kind, min, max } => {
            check_bounds(min, max)?;
            let saved = ctx.store.update_change_24h(kind, min, max);
            report_change(&ctx, saved);
            Ok(())
        }
        Commands::Rank { top } => {
            let saved = ctx.store.update_ranking(top);
            report_change(&ctx, saved);
            Ok(())
        }
        Commands::Toggle { filter } => {
            let saved = ctx.store.toggle_quick_filter(filter);
            let state = if ctx.store.model().quick_filters.get(filter) {
                "on"
            } else {
                "off"
            };
            println!("{} is now {}", filter, state);
            report_change(&ctx, saved);
            Ok(())
        }
        Commands::Clear => {
            let saved = ctx.store.clear_all();
            report_change(&ctx, saved);
            Ok(())
        }
        Commands::Reset => {
            if ctx.store.reset() {
                println!("Stored filters removed");
            } else {
                eprintln!("Warning: stored filters could not be removed");
            }
            Ok(())
        }
        Commands::Apply { file, output } => handle_apply(&ctx, &cwd, file, output),
        Commands::Config { key } => handle_config(&ctx.config, key.as_deref()),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn check_bounds(min: Option<f64>, max: Option<f64>) -> Result<()> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(anyhow!("--min ({}) is greater than --max ({})", min, max));
        }
    }
    Ok(())
}

fn report_change(ctx: &SieveContext, saved: bool) {
    print!("{}", render_summary(&ctx.store.model()));
    if !saved {
        eprintln!(
            "Warning: filters could not be saved to {}",
            ctx.data_dir.display()
        );
    }
}

fn handle_show(ctx: &SieveContext, json: bool) -> Result<()> {
    let model = ctx.store.model();
    if json {
        println!("{}", serde_json::to_string_pretty(model.as_ref())?);
    } else {
        print!("{}", render_summary(&model));
    }
    Ok(())
}

fn handle_apply(
    ctx: &SieveContext,
    cwd: &std::path::Path,
    file: Option<PathBuf>,
    output: Option<OutputFormat>,
) -> Result<()> {
    let path = file.unwrap_or_else(|| cwd.join(&ctx.config.assets_file));
    let assets =
        load_assets(&path).with_context(|| format!("reading assets from {}", path.display()))?;

    let visible = ctx.store.apply(&assets);
    match output.unwrap_or(ctx.config.output) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&visible)?),
        OutputFormat::Table => print!("{}", render_table(&visible, assets.len())),
    }
    Ok(())
}

fn handle_config(config: &SieveConfig, key: Option<&str>) -> Result<()> {
    match key {
        Some(key) => {
            let value = config
                .get(key)
                .ok_or_else(|| anyhow!("Unknown config key: {}", key))?;
            println!("{}", value);
        }
        None => {
            println!("assets_file = {}", config.assets_file);
            println!("output = {}", config.output);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_must_be_ordered() {
        assert!(check_bounds(Some(1.0), Some(2.0)).is_ok());
        assert!(check_bounds(Some(2.0), Some(2.0)).is_ok());
        assert!(check_bounds(Some(3.0), None).is_ok());
        assert!(check_bounds(Some(3.0), Some(2.0)).is_err());
    }
}
