//! CLI command implementations.
//!
//! A small terminal front-end over the [`Explorer`] facade, standing in
//! for the browser rendering layer.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `list` | Accumulate and print catalog pages |
//! | `show` | Print the joined aggregate for one record |
//! | `search` | Filter the accumulated catalog by term and type |
//! | `favorites` | Manage the team of six |
//! | `history` | Show recent searches and recently viewed records |

use crate::catalog::TypeFilter;
use crate::config::DexConfig;
use crate::models::AggregateDetail;
use crate::services::Explorer;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dexcore - creature-catalog explorer.
#[derive(Parser)]
#[command(name = "dexcore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Accumulate and print catalog pages.
    List {
        /// Number of pages to load.
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// Print the joined aggregate for one record.
    Show {
        /// Numeric id or name.
        identifier: String,
    },
    /// Filter the accumulated catalog by term and type.
    Search {
        /// Search term (name or id substring).
        term: String,
        /// Type filter; `all` matches every type.
        #[arg(short = 't', long = "type", default_value = "all")]
        type_filter: String,
        /// Number of pages to accumulate before filtering.
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// Manage the favorites team of six.
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },
    /// Show recent searches and recently viewed records.
    History,
}

/// Favorites subcommands.
#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// Add a record id to the favorites.
    Add {
        /// Numeric record id.
        id: u32,
    },
    /// Remove a record id from the favorites.
    Remove {
        /// Numeric record id.
        id: u32,
    },
    /// List the favorites.
    List,
    /// Clear the favorites.
    Clear,
}

impl Cli {
    /// Resolves the effective configuration for this invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given config file cannot be
    /// loaded.
    pub fn load_config(&self) -> anyhow::Result<DexConfig> {
        match &self.config {
            Some(path) => DexConfig::load_from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))
                .map(DexConfig::with_env_overrides),
            None => Ok(DexConfig::load_default()),
        }
    }
}

/// Runs the parsed command to completion.
///
/// # Errors
///
/// Returns an error when the underlying operation fails.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    let mut explorer = Explorer::from_config(&config).context("failed to initialize explorer")?;

    match cli.command {
        Commands::List { pages } => cmd_list(&mut explorer, pages).await,
        Commands::Show { identifier } => cmd_show(&mut explorer, &identifier).await,
        Commands::Search {
            term,
            type_filter,
            pages,
        } => cmd_search(&mut explorer, &term, &type_filter, pages).await,
        Commands::Favorites { command } => cmd_favorites(&mut explorer, &command),
        Commands::History => cmd_history(&explorer),
    }
}

async fn load_pages(explorer: &mut Explorer, pages: usize) -> anyhow::Result<()> {
    for _ in 0..pages {
        if !explorer.has_more() {
            break;
        }
        explorer
            .load_next_page()
            .await
            .context("failed to load catalog page")?;
    }
    Ok(())
}

async fn cmd_list(explorer: &mut Explorer, pages: usize) -> anyhow::Result<()> {
    load_pages(explorer, pages).await?;
    for record in explorer.accumulated() {
        let types: Vec<&str> = record.types.iter().map(|t| t.name.as_str()).collect();
        println!("#{:04} {:<16} [{}]", record.id, record.name, types.join(", "));
    }
    println!(
        "{} records accumulated{}",
        explorer.accumulated().len(),
        if explorer.has_more() {
            ", more available"
        } else {
            ""
        }
    );
    Ok(())
}

async fn cmd_show(explorer: &mut Explorer, identifier: &str) -> anyhow::Result<()> {
    let aggregate = explorer
        .full_aggregate(identifier)
        .await
        .with_context(|| format!("failed to fetch '{identifier}'"))?;
    explorer.record_viewed(aggregate.detail.id);
    print_aggregate(&aggregate);
    Ok(())
}

fn print_aggregate(aggregate: &AggregateDetail) {
    let detail = &aggregate.detail;
    println!("#{:04} {}", detail.id, detail.name);
    println!(
        "  height: {:.1} m  weight: {:.1} kg  base exp: {}",
        f64::from(detail.height) / 10.0,
        f64::from(detail.weight) / 10.0,
        detail.base_experience
    );

    let types: Vec<&str> = detail.types.iter().map(|t| t.name.as_str()).collect();
    println!("  types: {}", types.join(", "));

    for ability in &detail.abilities {
        let hidden = if ability.is_hidden { " (hidden)" } else { "" };
        println!("  ability: {}{hidden}", ability.name);
    }
    for stat in &detail.stats {
        println!("  {:<16} {:>3}", stat.name, stat.base_value);
    }

    if let Some(text) = aggregate.species.flavor_text("en") {
        println!("  \"{text}\"");
    }

    match &aggregate.evolution_chain {
        Some(chain) if chain.len() > 1 => {
            let line: Vec<String> = chain
                .iter()
                .map(|stage| {
                    stage.min_level.map_or_else(
                        || stage.name.clone(),
                        |level| format!("{} (Lv. {level})", stage.name),
                    )
                })
                .collect();
            println!("  evolution: {}", line.join(" -> "));
        }
        Some(_) => println!("  does not evolve"),
        None => {}
    }
}

async fn cmd_search(
    explorer: &mut Explorer,
    term: &str,
    type_filter: &str,
    pages: usize,
) -> anyhow::Result<()> {
    load_pages(explorer, pages).await?;
    explorer.record_search(term);

    let filter = TypeFilter::parse(type_filter);
    explorer.save_filter(&filter);

    let view = explorer.accumulated_view(term, &filter);
    for record in &view {
        println!("#{:04} {}", record.id, record.name);
    }
    println!("{} of {} records match", view.len(), explorer.accumulated().len());
    Ok(())
}

fn cmd_favorites(explorer: &mut Explorer, command: &FavoritesCommand) -> anyhow::Result<()> {
    match command {
        FavoritesCommand::Add { id } => {
            if explorer.add_favorite(*id) {
                println!("added #{id} to favorites");
            } else if explorer.is_favorite(*id) {
                println!("#{id} is already a favorite");
            } else {
                println!("favorites are full ({} of 6)", explorer.favorites_count());
            }
        }
        FavoritesCommand::Remove { id } => {
            if explorer.remove_favorite(*id) {
                println!("removed #{id} from favorites");
            } else {
                println!("#{id} is not a favorite");
            }
        }
        FavoritesCommand::List => {
            for id in explorer.favorite_ids() {
                println!("#{id}");
            }
            println!("{} of 6 favorites", explorer.favorites_count());
        }
        FavoritesCommand::Clear => {
            explorer.clear_favorites();
            println!("favorites cleared");
        }
    }
    Ok(())
}

fn cmd_history(explorer: &Explorer) -> anyhow::Result<()> {
    let searches = explorer.recent_searches();
    if searches.is_empty() {
        println!("no recent searches");
    } else {
        println!("recent searches:");
        for term in searches {
            println!("  {term}");
        }
    }

    let viewed = explorer.recently_viewed();
    if viewed.is_empty() {
        println!("no recently viewed records");
    } else {
        println!("recently viewed:");
        for id in viewed {
            println!("  #{id}");
        }
    }
    Ok(())
}
