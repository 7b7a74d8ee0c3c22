// src/bin/dinetree.rs

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use dinetree::{flag_label, BuildConfig, IndexBuilder, Query};

/// Recommend restaurants for a set of outings within a budget.
#[derive(Parser, Debug)]
#[command(name = "dinetree", version)]
struct Cli {
    /// Restaurant CSV file
    data: PathBuf,

    /// Total budget for all visits, in converted currency
    #[arg(long)]
    budget: Option<f64>,

    /// Number of places to go
    #[arg(long, default_value_t = 1)]
    visits: usize,

    /// Cuisine to include (repeat for several)
    #[arg(long = "cuisine")]
    cuisines: Vec<String>,

    #[arg(long)]
    dining_type: Option<String>,

    #[arg(long)]
    table_booking: bool,

    #[arg(long)]
    online_order: bool,

    /// The CSV starts with a header row
    #[arg(long)]
    has_headers: bool,

    /// List available cuisines and dining types, then exit
    #[arg(long)]
    list: bool,

    /// Print the whole category tree, then exit
    #[arg(long)]
    tree: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = BuildConfig {
        has_headers: cli.has_headers,
        ..BuildConfig::default()
    };
    let builder = IndexBuilder::from_path(&cli.data, config)
        .with_context(|| format!("Failed to load {}", cli.data.display()))?;
    let index = builder.build().context("Failed to build category index")?;
    info!("{} restaurants indexed", index.restaurant_count());

    if cli.tree {
        print!("{index}");
        return Ok(());
    }
    if cli.list {
        println!("Cuisines: {}", index.cuisines().join(", "));
        println!("Dining types: {}", index.dining_types().join(", "));
        return Ok(());
    }

    let Some(budget) = cli.budget else {
        bail!("--budget is required");
    };
    let Some(dining_type) = cli.dining_type else {
        bail!("--dining-type is required");
    };
    let query = Query::new(
        cli.visits,
        budget,
        cli.cuisines,
        dining_type,
        cli.table_booking,
        cli.online_order,
    )?;
    info!(
        "planning {} visits on {:.2} ({:.2} per visit), booking {}, online order {}",
        query.visit_count(),
        query.total_budget(),
        query.per_visit_budget(),
        flag_label(query.table_booking()),
        flag_label(query.online_order())
    );

    let selected = match index.recommend(&query) {
        Some(selected) if !selected.is_empty() => selected,
        _ => {
            println!("No restaurants match these preferences and budget.");
            return Ok(());
        }
    };

    println!("{:<32} {:<32} {:<20} {:>6} {:>8}", "Name", "Cuisines", "Type", "Rating", "Price");
    for info in builder.describe(&selected)? {
        println!(
            "{:<32} {:<32} {:<20} {:>6.1} {:>8.2}",
            info.name, info.cuisines, info.dining_type, info.rating, info.price
        );
    }
    Ok(())
}
