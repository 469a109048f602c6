use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use pantry_core::config::DEFAULT_LEARNING_PATH;
use pantry_core::intake::{classify_items, review_categories, ExtractionReport, StoredItem};
use pantry_core::persistence::{export_json, import_json};
use pantry_core::{CategoryResolver, ResolverConfig};
use std::fs;
use std::io::{stdin, stdout, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pantry_sorter")]
#[command(about = "Sort kitchen items into categories and learn from corrections", long_about = None)]
#[command(version)]
struct Cli {
    /// File holding learned categories (.json for a readable copy)
    #[arg(long, env = "PANTRY_LEARNING_FILE", default_value = DEFAULT_LEARNING_PATH)]
    learning_file: PathBuf,

    /// Ignore learned categories that are not in the category table
    #[arg(long, env = "PANTRY_STRICT_LEARNING")]
    strict: bool,

    /// More log output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest a category for each name
    Suggest {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Show the names treated as the same item
    Similar { name: String },
    /// List the category table
    Categories,
    /// Record a confirmed category for an item
    Learn { name: String, category: String },
    /// Interactive sorting session
    Sort,
    /// Classify a vision/chat model response ("-" reads stdin)
    Intake { path: PathBuf },
    /// Suggest category changes for stored items given as a JSON array
    Review { path: PathBuf },
    /// Write learned categories to a JSON file
    Export { path: PathBuf },
    /// Merge learned categories from a JSON export
    Import { path: PathBuf },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ResolverConfig::in_memory()
        .with_learning_path(&cli.learning_file)
        .strict(cli.strict);
    let mut resolver = CategoryResolver::from_file_or_new(&config);
    info!(items = resolver.learning().len(), "resolver ready");

    match cli.command {
        Commands::Suggest { names } => {
            for name in &names {
                print_suggestion(&resolver, name);
            }
        }
        Commands::Similar { name } => {
            for similar in resolver.similar_items(&name) {
                println!("{}", similar);
            }
        }
        Commands::Categories => print_categories(&resolver),
        Commands::Learn { name, category } => {
            if !resolver.is_valid_category(&category) {
                eprintln!("{} '{}' is not in the category table", "note:".yellow(), category);
            }
            match resolver.learn_category(&name, &category) {
                Some(count) => println!("{} -> {} (confirmed {}x)", resolver.normalize(&name), category, count),
                None => eprintln!("{} nothing to learn from a blank name or category", "note:".yellow()),
            }
            save(&resolver)?;
        }
        Commands::Sort => {
            run_sort_session(&mut resolver)?;
            save(&resolver)?;
        }
        Commands::Intake { path } => {
            let response = read_input(&path)?;
            let report = ExtractionReport::parse(&response).context("could not read model response")?;
            if !report.contains_food || report.items.is_empty() {
                println!("No food items in this response.");
                return Ok(());
            }
            let drafts = classify_items(&resolver, &report.items);
            println!("{}", serde_json::to_string_pretty(&drafts)?);
        }
        Commands::Review { path } => {
            let stored: Vec<StoredItem> = serde_json::from_str(&read_input(&path)?)
                .with_context(|| format!("{} is not a JSON array of items", path.display()))?;
            let changes = review_categories(&resolver, &stored);
            if changes.is_empty() {
                println!("No category changes suggested.");
            } else {
                println!("{}", serde_json::to_string_pretty(&changes)?);
            }
        }
        Commands::Export { path } => {
            export_json(resolver.learning(), &path)
                .with_context(|| format!("could not export to {}", path.display()))?;
            println!("Exported {} items to '{}'", resolver.learning().len(), path.display());
        }
        Commands::Import { path } => {
            let imported = import_json(&path)
                .with_context(|| format!("could not import {}", path.display()))?;
            let count = imported.len();
            resolver.absorb(imported);
            save(&resolver)?;
            println!("Merged {} items from '{}'", count, path.display());
        }
    }

    Ok(())
}

fn save(resolver: &CategoryResolver) -> Result<()> {
    resolver.save_learning().context("could not save learned categories")
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
    }
}

fn print_suggestion(resolver: &CategoryResolver, name: &str) {
    let suggestion = resolver.explain(name);
    let description = resolver.category_description(&suggestion.category).unwrap_or("");
    println!(
        "{} -> {} [{}] {}",
        name.trim().bold(),
        suggestion.category.as_str().green(),
        suggestion.source.to_string().dark_grey(),
        description
    );
}

fn print_categories(resolver: &CategoryResolver) {
    for key in resolver.list_categories() {
        let description = resolver.category_description(key).unwrap_or("");
        println!("  {} {}", format!("{:<18}", key).cyan(), description);
    }
}

fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    stdout().flush()?;
    let mut input = String::new();
    if stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn run_sort_session(resolver: &mut CategoryResolver) -> Result<()> {
    println!("Pantry sorter. Type an item name, 'list' for categories, 'exit' to save and quit.");
    println!("---------------------------------------------------------------------------");

    loop {
        let Some(name) = prompt("\nItem> ")? else { break };
        match name.as_str() {
            "exit" => break,
            "" => continue,
            "list" => {
                print_categories(resolver);
                continue;
            }
            _ => {}
        }

        print_suggestion(resolver, &name);
        let similar: Vec<String> = resolver.similar_items(&name).into_iter().collect();
        if !similar.is_empty() {
            println!("  same as: {}", similar.join(", ").dark_grey());
        }

        let suggested = resolver.suggest_category(&name);
        let Some(answer) = prompt("[Enter] to accept, or type a category: ")? else { break };
        let chosen = if answer.is_empty() {
            suggested
        } else if resolver.is_valid_category(&answer) {
            answer.to_lowercase()
        } else {
            println!("{} '{}' is not a category, keeping '{}'", "!".red(), answer, suggested);
            suggested
        };

        if let Some(count) = resolver.learn_category(&name, &chosen) {
            println!("Filed '{}' under {} (confirmed {}x)", name, chosen.as_str().green(), count);
        }
    }

    println!("\nSaving learned categories...");
    Ok(())
}
