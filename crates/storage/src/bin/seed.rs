use std::fmt;

use nusantara_core::model::{Difficulty, Recipe, RecipeId, Region};
use nusantara_core::time::Clock;
use storage::repository::{RecipeRepository, Storage};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("NUSANTARA_DB_URL").unwrap_or_else(|_| "sqlite:dev.sqlite3".into());

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--help" | "-h" => {
                    eprintln!("Usage: seed [--db <sqlite_url>]");
                    eprintln!("Environment: NUSANTARA_DB_URL");
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url })
    }
}

struct SampleRecipe {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    region: Region,
    difficulty: Difficulty,
    minutes: u32,
    servings: u32,
    ingredients: &'static [&'static str],
    steps: &'static [&'static str],
    story: Option<&'static str>,
    premium: bool,
}

fn sample_recipes() -> Vec<SampleRecipe> {
    vec![
        SampleRecipe {
            id: "5b9f6c1e-8d42-4f0a-9a3b-1c2e7d4f8a01",
            title: "Rendang Daging",
            description: "Daging sapi dimasak lambat dalam santan dan rempah.",
            region: Region::Sumatra,
            difficulty: Difficulty::Hard,
            minutes: 240,
            servings: 6,
            ingredients: &[
                "1 kg daging sapi",
                "1 liter santan kental",
                "bumbu rendang halus",
                "daun kunyit dan serai",
            ],
            steps: &[
                "Tumis bumbu halus hingga harum.",
                "Masukkan daging dan aduk rata.",
                "Tuang santan, masak dengan api kecil.",
                "Aduk hingga santan menyusut dan berminyak.",
                "Masak terus hingga rendang kering dan berwarna gelap.",
            ],
            story: Some(
                "Rendang lahir dari tradisi merantau Minangkabau: dimasak hingga \
                 kering agar tahan dibawa perjalanan jauh.",
            ),
            premium: false,
        },
        SampleRecipe {
            id: "2e71a9d4-3c58-4b6f-8e0d-9f1b5a6c7d02",
            title: "Gudeg Jogja",
            description: "Nangka muda dimasak manis dengan santan dan gula aren.",
            region: Region::Jawa,
            difficulty: Difficulty::Medium,
            minutes: 180,
            servings: 4,
            ingredients: &[
                "500 g nangka muda",
                "500 ml santan",
                "100 g gula aren",
                "daun salam dan lengkuas",
            ],
            steps: &[
                "Rebus nangka muda hingga empuk.",
                "Masak nangka bersama santan, gula aren, dan bumbu.",
                "Biarkan surut perlahan hingga berwarna cokelat.",
            ],
            story: None,
            premium: false,
        },
        SampleRecipe {
            id: "c04d8b2a-6e17-4c9d-b5f3-8a2e1d9c4b03",
            title: "Coto Makassar",
            description: "Sup daging khas Sulawesi dengan kuah kacang yang pekat.",
            region: Region::Sulawesi,
            difficulty: Difficulty::Medium,
            minutes: 150,
            servings: 5,
            ingredients: &[
                "500 g daging sapi",
                "200 g kacang tanah goreng",
                "bumbu coto halus",
            ],
            steps: &[
                "Rebus daging hingga empuk lalu potong dadu.",
                "Haluskan kacang goreng, campur ke kaldu.",
                "Tumis bumbu, masukkan ke kuah, didihkan.",
                "Sajikan dengan ketupat.",
            ],
            story: Some("Coto konon dahulu hidangan para bangsawan kerajaan Gowa."),
            premium: true,
        },
        SampleRecipe {
            id: "7f3e5a8c-2b91-4d6e-a0c4-6d8f2b5e9a04",
            title: "Soto Banjar",
            description: "Soto ayam bening wangi rempah dari Kalimantan Selatan.",
            region: Region::Kalimantan,
            difficulty: Difficulty::Easy,
            minutes: 90,
            servings: 4,
            ingredients: &[
                "1 ekor ayam kampung",
                "kayu manis, cengkih, kapulaga",
                "soun dan perkedel kentang",
            ],
            steps: &[
                "Rebus ayam dengan rempah utuh.",
                "Suwir ayam, saring kaldu.",
                "Tata soun dan perkedel, siram kuah panas.",
            ],
            story: None,
            premium: false,
        },
    ]
}

// Sample ids are fixed so rerunning the tool updates the same rows instead
// of growing the catalog.
async fn seed_catalog(storage: &Storage, clock: &Clock) -> Result<usize, Box<dyn std::error::Error>> {
    let samples = sample_recipes();
    let count = samples.len();
    for sample in samples {
        let recipe = Recipe::new(
            sample.id.parse::<RecipeId>()?,
            sample.title,
            sample.description,
            sample.region,
            sample.difficulty,
            sample.minutes,
            sample.servings,
            None,
            sample.ingredients.iter().map(ToString::to_string).collect(),
            sample.steps.iter().map(ToString::to_string).collect(),
            sample.story.map(ToString::to_string),
            sample.premium,
            clock.now(),
        )?;
        storage.recipes.upsert_recipe(&recipe).await?;
        println!("seeded: {} ({})", recipe.title(), recipe.id());
    }
    Ok(count)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let count = seed_catalog(&storage, &Clock::default_clock()).await?;

    println!("done: {count} recipes in {}", args.db_url);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
