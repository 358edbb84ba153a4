mod seed;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mise_core::{recipe_nutrition, render_ingredients, Store, TermIndex};

#[derive(Parser)]
#[command(name = "mise")]
#[command(about = "Mise CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a demo store (glossary, nutrients, recipes, reviews)
    Seed {
        /// Path of the JSON store file to write
        #[arg(long, default_value = "mise-store.json")]
        store: PathBuf,
    },
    /// Render a recipe's linked-ingredient HTML
    Render {
        /// Path of the JSON store file
        #[arg(long, default_value = "mise-store.json")]
        store: PathBuf,
        /// Recipe slug
        #[arg(long)]
        recipe: String,
    },
    /// Print a recipe's per-serving nutrition
    Nutrition {
        /// Path of the JSON store file
        #[arg(long, default_value = "mise-store.json")]
        store: PathBuf,
        /// Recipe slug
        #[arg(long)]
        recipe: String,
        /// Also print whole-recipe totals and % daily values
        #[arg(long)]
        detailed: bool,
    },
    /// Print the glossary term tree
    Glossary {
        /// Path of the JSON store file
        #[arg(long, default_value = "mise-store.json")]
        store: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Seed { store } => {
            let seeded = seed::build_demo_store()?;
            save_store(&seeded, &store)?;
            println!("Seeded demo store at {}", store.display());
        }
        Commands::Render { store, recipe } => {
            let store = load_store(&store)?;
            let found = find_recipe(&store, &recipe)?;
            let index = TermIndex::build(&store, Some(found.id));
            println!("{}", render_ingredients(found, &index));
        }
        Commands::Nutrition {
            store,
            recipe,
            detailed,
        } => {
            let store = load_store(&store)?;
            let found = find_recipe(&store, &recipe)?;
            let summary = recipe_nutrition(&store, found);

            println!("Per serving ({} servings):", found.servings);
            print_totals(&store, &summary.per_serving);
            if detailed {
                println!("\nWhole recipe:");
                print_totals(&store, &summary.totals);
                println!("\n% of daily value:");
                for (name, percent) in &summary.daily_value_percentages {
                    println!("  {name}: {percent:.1}%");
                }
            }
        }
        Commands::Glossary { store } => {
            let store = load_store(&store)?;
            for root in store.root_terms() {
                print_term_tree(&store, root.id, 0);
            }
        }
    }

    Ok(())
}

fn load_store(path: &Path) -> Result<Store> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read store file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("store file {} is not valid JSON", path.display()))
}

fn save_store(store: &Store, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(store)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write store file {}", path.display()))
}

fn find_recipe<'a>(store: &'a Store, slug: &str) -> Result<&'a mise_core::Recipe> {
    match store.recipe_by_slug(slug) {
        Some(recipe) => Ok(recipe),
        None => bail!("no recipe with slug {slug:?}"),
    }
}

fn print_totals(store: &Store, totals: &mise_core::NutrientTotals) {
    for (name, value) in totals {
        let unit = store
            .nutrients()
            .iter()
            .find(|n| n.name.eq_ignore_ascii_case(name))
            .map(|n| n.unit.as_str())
            .unwrap_or("");
        println!("  {name}: {value:.2} {unit}");
    }
}

fn print_term_tree(store: &Store, id: mise_core::TermId, depth: usize) {
    let Some(term) = store.term(id) else {
        return;
    };
    println!("{}{} ({})", "  ".repeat(depth), term.name, term.slug);
    for child in store.children(id) {
        print_term_tree(store, child.id, depth + 1);
    }
}
