use std::fmt;

use nusantara_core::model::{Difficulty, RecipeId, Region, SearchFilters};
use services::recipe_service::LIST_LIMIT;
use services::{AppServices, Clock};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidRecipeId { raw: String },
    InvalidRegion { raw: String },
    InvalidDifficulty { raw: String },
    InvalidLimit { raw: String },
    InvalidDbUrl { raw: String },
    MissingRecipeId,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidRecipeId { raw } => write!(f, "invalid --recipe-id value: {raw}"),
            ArgsError::InvalidRegion { raw } => write!(f, "invalid --region value: {raw}"),
            ArgsError::InvalidDifficulty { raw } => {
                write!(f, "invalid --difficulty value: {raw}")
            }
            ArgsError::InvalidLimit { raw } => write!(f, "invalid --limit value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::MissingRecipeId => write!(f, "show requires --recipe-id <uuid>"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- list [--db <sqlite_url>] [--region <code>] [--difficulty <code>] [--search <text>] [--limit <n>]"
    );
    eprintln!("  cargo run -p app -- show --recipe-id <uuid> [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- seed");
    eprintln!();
    eprintln!("Region codes: jawa, sumatra, sulawesi, kalimantan, other");
    eprintln!("Difficulty codes: mudah, sedang, sulit");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://dev.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  NUSANTARA_DB_URL");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    List,
    Show,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "list" => Some(Self::List),
            "show" => Some(Self::Show),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    filters: SearchFilters,
    limit: u32,
    recipe_id: Option<RecipeId>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("NUSANTARA_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://dev.sqlite3".into(), normalize_sqlite_url);
        let mut filters = SearchFilters::new();
        let mut limit = LIST_LIMIT;
        let mut recipe_id = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--region" => {
                    let value = require_value(args, "--region")?;
                    let region = Region::from_code(&value)
                        .map_err(|_| ArgsError::InvalidRegion { raw: value.clone() })?;
                    filters = filters.with_region(region);
                }
                "--difficulty" => {
                    let value = require_value(args, "--difficulty")?;
                    let difficulty = Difficulty::from_code(&value)
                        .map_err(|_| ArgsError::InvalidDifficulty { raw: value.clone() })?;
                    filters = filters.with_difficulty(difficulty);
                }
                "--search" => {
                    let value = require_value(args, "--search")?;
                    filters = filters.with_query(value);
                }
                "--limit" => {
                    let value = require_value(args, "--limit")?;
                    limit = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidLimit { raw: value.clone() })?;
                }
                "--recipe-id" => {
                    let value = require_value(args, "--recipe-id")?;
                    let parsed = value
                        .parse::<RecipeId>()
                        .map_err(|_| ArgsError::InvalidRecipeId { raw: value.clone() })?;
                    recipe_id = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            filters,
            limit,
            recipe_id,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None | Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    argv.remove(0);

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    if cmd == Command::Seed {
        // Seeding stays a separate tool so the app launch path never writes
        // sample data by accident.
        eprintln!("seed: use `cargo run -p storage --bin seed -- --db {}`", parsed.db_url);
        return Ok(());
    }

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let app = AppServices::new_sqlite(&parsed.db_url, Clock::default_clock()).await?;

    match cmd {
        Command::List => {
            let recipes = app.recipes().list(&parsed.filters, parsed.limit).await?;
            if recipes.is_empty() {
                println!("no recipes match");
                return Ok(());
            }
            for recipe in &recipes {
                println!(
                    "{}  {}  [{} / {}]  {} min, {} porsi{}",
                    recipe.id(),
                    recipe.title(),
                    recipe.region().label(),
                    recipe.difficulty().label(),
                    recipe.cooking_time_minutes(),
                    recipe.servings(),
                    if recipe.is_premium() { "  (premium)" } else { "" },
                );
            }
            Ok(())
        }
        Command::Show => {
            let recipe_id = parsed.recipe_id.ok_or(ArgsError::MissingRecipeId)?;
            let recipe = app.recipes().get(recipe_id).await?;

            println!("{}", recipe.title());
            println!(
                "{} / {} | {} min | {} porsi",
                recipe.region().label(),
                recipe.difficulty().label(),
                recipe.cooking_time_minutes(),
                recipe.servings(),
            );
            println!();
            println!("{}", recipe.description());
            if let Some(story) = recipe.cultural_story() {
                println!();
                println!("{story}");
            }
            println!();
            println!("Bahan:");
            for ingredient in recipe.ingredients() {
                println!("  - {ingredient}");
            }
            println!();
            println!("Langkah:");
            for (index, step) in recipe.steps().iter().enumerate() {
                println!("  {}. {step}", index + 1);
            }
            Ok(())
        }
        Command::Seed => unreachable!("handled above"),
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
