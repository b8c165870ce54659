//! Country Atlas CLI
//!
//! Usage:
//!   country-atlas list --region Europe
//!   country-atlas search bra
//!   country-atlas show Japan
//!   country-atlas featured

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use country_atlas::models::CountryProfile;
use country_atlas::{Atlas, AtlasConfig, AtlasError, CountrySummary, NOT_AVAILABLE, logging};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "country-atlas", version)]
#[command(about = "Country facts, current weather and imagery for any country name")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all countries, or the countries of one region
    List {
        #[arg(short, long)]
        region: Option<String>,
    },
    /// Search countries by common or localized name
    Search {
        term: String,
        /// Restrict the results to one region
        #[arg(short, long)]
        region: Option<String>,
    },
    /// Show one country with weather and image
    Show { name: String },
    /// Show the featured countries (configured list when no names are given)
    Featured { names: Vec<String> },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<AtlasError>() {
            Some(atlas_error) => {
                tracing::debug!("{:#}", e);
                eprintln!("{}", atlas_error.user_message());
            }
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AtlasConfig::load_from_path(cli.config.clone())
        .with_context(|| "Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose);

    let atlas = Atlas::new(&config)?;

    match cli.command {
        Command::List { region } => {
            let countries = match region {
                Some(region) => atlas.load_by_region(&region).await?,
                None => atlas.load_all().await?,
            };
            print_summaries(&countries, cli.json)?;
        }
        Command::Search { term, region } => {
            let mut found = atlas.search(&term).await?;
            if let Some(region) = region {
                found.retain(|c| c.in_region(&region));
            }
            print_summaries(&found, cli.json)?;
        }
        Command::Show { name } => {
            let profile = atlas
                .country_profile(&name)
                .await?
                .ok_or_else(|| AtlasError::not_found(name.trim()))?;
            if cli.json {
                print_json(&profile)?;
            } else {
                print_profile(&profile);
            }
        }
        Command::Featured { names } => {
            let profiles = atlas.featured(&names).await?;
            if cli.json {
                print_json(&profiles)?;
            } else {
                for profile in &profiles {
                    print_profile(profile);
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_summaries(countries: &[CountrySummary], json: bool) -> Result<()> {
    if json {
        return print_json(countries);
    }

    if countries.is_empty() {
        println!("No countries found.");
        return Ok(());
    }

    for country in countries {
        println!(
            "{:<32} {:<20} {:>15}  {} / {}",
            country.display_name(),
            country.capital,
            country.format_population(),
            country.language,
            country.currency
        );
    }
    println!("\n{} countries", countries.len());
    Ok(())
}

fn print_profile(profile: &CountryProfile) {
    let detail = &profile.detail;
    let summary = &detail.summary;

    println!("{} ({})", summary.display_name(), detail.official_name);
    println!("   Capital:     {}", summary.capital);
    println!(
        "   Region:      {} / {} / {}",
        summary.region, detail.subregion, summary.continent
    );
    println!("   Population:  {}", summary.format_population());
    println!("   Area:        {}", detail.format_area());
    println!("   Language:    {}", summary.language);
    println!("   Currency:    {}", summary.currency);
    println!("   Timezone:    {}", detail.timezone);
    println!("   Borders:     {}", detail.format_borders());
    println!("   Independent: {}", detail.independence);
    println!("   Dialing:     {}", detail.dialing_code);
    println!("   Domain:      {}", detail.tld);
    if !detail.native_names.is_empty() {
        println!("   Native:      {}", detail.native_names.join(", "));
    }
    println!("   Weather:     {}", profile.weather_summary());
    if let Some(weather) = &profile.enrichment.weather {
        println!(
            "                feels like {:.0}°C, {:.0}-{:.0}°C, humidity {}%",
            weather.feels_like, weather.temp_min, weather.temp_max, weather.humidity
        );
    }
    println!(
        "   Flag:        {}",
        if summary.flag_url.is_empty() { NOT_AVAILABLE } else { &summary.flag_url }
    );
    println!("   Image:       {}", profile.enrichment.image_url);
    println!();
}
