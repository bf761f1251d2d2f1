//! Pharmacat - inspect and query a multilingual pharmacy catalog
//!
//! Thin front end over `pharmacat_core`: it resolves configuration, picks the
//! language and renders the engine's projections as tables or JSON.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pharmacat_core::catalog::{CartQuote, CatalogStats, Page};
use pharmacat_core::{Catalog, CatalogConfig, Language, LocalizedGroup, LocalizedItem};

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "pharmacat",
    about = "Query a multilingual pharmacy catalog document",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Catalog configuration file
    #[clap(long, default_value = "catalog.yaml", global = true)]
    config: PathBuf,

    /// Catalog document (overrides the config file and PHARMACAT_CATALOG)
    #[clap(long, global = true)]
    catalog: Option<PathBuf>,

    /// Language code (fa, en, tr, ar); defaults to the configured language
    #[clap(long, global = true)]
    lang: Option<String>,

    /// Output format
    #[clap(long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Emit logs as JSON
    #[clap(long, global = true)]
    log_json: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Show catalog counts
    Stats,

    /// Show a single item
    Item {
        /// Item id
        id: String,
    },

    /// Show a group and its variants
    Group {
        /// Group key
        key: String,
    },

    /// List groups, one page at a time
    List {
        /// Keep only variants matching this text
        #[clap(long, short)]
        query: Option<String>,

        /// Page number (out-of-range values clamp)
        #[clap(long, short)]
        page: Option<String>,
    },

    /// Search items by name, description or id
    Search {
        /// Search text
        query: String,
    },

    /// Look up a UI translation
    Translate {
        /// Translation key
        key: String,
    },

    /// Price a cart given as id=qty pairs
    Quote {
        /// Cart lines, e.g. asp1=2
        #[clap(required = true)]
        lines: Vec<String>,
    },
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Expiry")]
    expiry: String,
}

impl From<&LocalizedItem> for ItemRow {
    fn from(item: &LocalizedItem) -> Self {
        Self {
            id: item.id.clone(),
            group: item.group_key.clone(),
            name: item.name.clone(),
            price: format!("{:.2}", item.price),
            expiry: item.expiry.clone(),
        }
    }
}

fn initialize_tracing(log_level: &LogLevel, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn resolve_config(cli: &Cli) -> Result<CatalogConfig> {
    let mut config = CatalogConfig::load_from_path(&cli.config)
        .with_context(|| format!("Failed to load config: {}", cli.config.display()))?
        .with_env_overrides();
    if let Some(catalog) = &cli.catalog {
        config.source = catalog.clone();
    }
    debug!("Using catalog source {}", config.source.display());
    Ok(config)
}

/// Unknown codes are not an error: resolution falls back to the chain
fn resolve_language(requested: Option<&str>, config: &CatalogConfig) -> Option<Language> {
    match requested {
        Some(code) => {
            let lang = Language::parse(code);
            if lang.is_none() {
                debug!("Unsupported language {:?}, using fallbacks", code);
            }
            lang
        }
        None => Some(config.default_language),
    }
}

fn parse_cart_line(line: &str) -> Result<(String, u32)> {
    let (id, qty) = line
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid cart line {:?}, expected id=qty", line))?;
    let qty = qty
        .trim()
        .parse::<u32>()
        .with_context(|| format!("Invalid quantity in cart line {:?}", line))?;
    Ok((id.trim().to_string(), qty))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_items(items: &[LocalizedItem]) {
    if items.is_empty() {
        println!("No items found.");
        return;
    }
    let rows: Vec<ItemRow> = items.iter().map(ItemRow::from).collect();
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();
    println!("{table}");
}

fn print_group(group: &LocalizedGroup) {
    println!("{} ({})", group.name, group.key);
    print_items(&group.variants);
}

fn print_page(page: &Page<LocalizedGroup>) {
    for group in &page.items {
        print_group(group);
        println!();
    }
    println!(
        "Page {} of {} ({} groups)",
        page.number, page.num_pages, page.total
    );
}

fn print_stats(stats: &CatalogStats) {
    println!("Groups:        {} ({} with items)", stats.groups, stats.listed_groups);
    println!("Items:         {}", stats.items);
    println!("Images:        {}", stats.images);
    println!("Translations:  {}", stats.translations);
    println!("Duplicate ids: {}", stats.duplicate_ids);
}

fn print_quote(quote: &CartQuote) {
    for line in &quote.lines {
        println!(
            "{:<30} {:>4} x {:>8.2} = {:>10.2}",
            line.item.name, line.quantity, line.item.price, line.subtotal
        );
    }
    println!("Total: {:.2}", quote.total);
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let lang = resolve_language(cli.lang.as_deref(), &config);
    let catalog = Catalog::new(config);
    let json = cli.format == OutputFormat::Json;

    match cli.command {
        Command::Stats => {
            let stats = catalog.stats()?;
            if json {
                print_json(&stats)?;
            } else {
                print_stats(&stats);
            }
        }
        Command::Item { id } => {
            let item = catalog
                .get_item(&id, lang)?
                .ok_or_else(|| anyhow!("Item not found: {}", id))?;
            if json {
                print_json(&item)?;
            } else {
                print_items(std::slice::from_ref(&item));
                if !item.description.is_empty() {
                    println!("{}", item.description);
                }
                if let Some(image) = &item.image {
                    println!("Image: {}", image);
                }
            }
        }
        Command::Group { key } => {
            let group = catalog
                .get_group(&key, lang)?
                .ok_or_else(|| anyhow!("Group not found: {}", key))?;
            if json {
                print_json(&group)?;
            } else {
                print_group(&group);
            }
        }
        Command::List { query, page } => {
            let number = Page::<LocalizedGroup>::parse_number(page.as_deref());
            let page = catalog.list_page(lang, query.as_deref(), number)?;
            if json {
                print_json(&page)?;
            } else {
                print_page(&page);
            }
        }
        Command::Search { query } => {
            let items = catalog.search_items(&query, lang)?;
            if json {
                print_json(&items)?;
            } else {
                print_items(&items);
            }
        }
        Command::Translate { key } => {
            let text = catalog.translate(&key, lang)?;
            if json {
                print_json(&text)?;
            } else {
                println!("{}", text);
            }
        }
        Command::Quote { lines } => {
            let lines = lines
                .iter()
                .map(|line| parse_cart_line(line))
                .collect::<Result<Vec<_>>>()?;
            let quote = catalog.quote_cart(lines, lang)?;
            if json {
                print_json(&quote)?;
            } else {
                print_quote(&quote);
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level, cli.log_json);
    run(cli)
}
