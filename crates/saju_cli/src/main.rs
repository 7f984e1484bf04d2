use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use saju_base::BranchTenGodTable;
use saju_engine::{
    BoundaryTable, CalculatorOptions, Gender, OptionsPatch, SajuCalculator, TracingObserver,
    render_chart,
};
use saju_time::{
    CityTimezoneDirectory, KOREA_STANDARD_MERIDIAN, Location, civil_datetime, parse_birth_date,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "saju", about = "Four Pillars (四柱) chart calculator")]
struct Cli {
    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a full chart
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
        /// Gender for luck cycles: male/female (or M/F, 남/여)
        #[arg(long)]
        gender: Option<String>,
        /// JSON file of 立春 boundary rows replacing the embedded table
        #[arg(long)]
        boundary_table: Option<PathBuf>,
        /// JSON file of branch Ten-God special cases replacing the embedded table
        #[arg(long)]
        branch_table: Option<PathBuf>,
        /// Print the chart as JSON
        #[arg(long)]
        json: bool,
    },
    /// Four raw pillars after boundary overrides
    Pillar {
        #[command(flatten)]
        birth: BirthArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalize a birth time and show the correction breakdown
    Normalize {
        #[command(flatten)]
        birth: BirthArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List or search the built-in place directory
    Places {
        /// Name, alias or country code to search for (all places if omitted)
        query: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Birth date, hour, place and calculator options shared by chart commands.
#[derive(Args)]
struct BirthArgs {
    /// Birth date (YYYY-MM-DD, YYYY/MM/DD or YYYYMMDD)
    date: String,
    /// Birth hour as a fractional hour, e.g. 14.5 for 14:30
    hour: f64,
    /// Place name from the directory (see `saju places`)
    #[arg(long)]
    place: Option<String>,
    /// Latitude in degrees (with --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Longitude in degrees east (with --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,
    /// IANA timezone for --lat/--lon
    #[arg(long, requires = "lat")]
    tz: Option<String>,
    /// Skip the local-mean-time correction
    #[arg(long)]
    no_local_time: bool,
    /// Ignore daylight saving time from the tz database
    #[arg(long)]
    no_dst: bool,
    /// Ignore the historical Korean DST table
    #[arg(long)]
    no_historical_dst: bool,
    /// Skip the standard-zone correction
    #[arg(long)]
    no_standard_time_zone: bool,
    /// Whole-minute corrections; the adjusted time keeps its seconds
    #[arg(long)]
    no_seconds_precision: bool,
    /// Measure against the birth zone's own meridian
    #[arg(long)]
    international: bool,
    /// Reference standard meridian, degrees east
    #[arg(long, default_value_t = KOREA_STANDARD_MERIDIAN)]
    meridian: f64,
    /// Options patch as JSON, applied after the flags (camelCase keys)
    #[arg(long)]
    options: Option<String>,
}

impl BirthArgs {
    fn calculator_options(&self) -> CalculatorOptions {
        let mut options = CalculatorOptions {
            use_local_time: !self.no_local_time,
            use_dst: !self.no_dst,
            use_historical_dst: !self.no_historical_dst,
            use_standard_time_zone: !self.no_standard_time_zone,
            use_international_mode: self.international,
            use_seconds_precision: !self.no_seconds_precision,
            reference_standard_meridian: self.meridian,
        };
        if let Some(json) = &self.options {
            let patch = OptionsPatch::from_json(json).unwrap_or_else(|e| {
                eprintln!("Invalid --options: {e}");
                std::process::exit(1);
            });
            options.apply(&patch);
        }
        options
    }

    fn location(&self) -> Option<Location> {
        match (self.lat, self.lon, &self.tz) {
            (Some(latitude), Some(longitude), Some(timezone)) => Some(Location::Detailed {
                latitude,
                longitude,
                timezone: timezone.clone(),
                name: self.place.clone(),
            }),
            (Some(latitude), Some(longitude), None) => {
                Some(Location::coordinates(latitude, longitude))
            }
            _ => self.place.as_deref().map(Location::named),
        }
    }

    fn calculator(&self) -> SajuCalculator {
        SajuCalculator::new(self.calculator_options()).with_observer(Arc::new(TracingObserver))
    }

    /// Strict date and hour; the chart command alone accepts anything.
    fn civil(&self) -> NaiveDateTime {
        parse_birth_date(&self.date)
            .and_then(|date| civil_datetime(date, self.hour))
            .unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            })
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_file(path: &PathBuf) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {e}", path.display());
        std::process::exit(1);
    })
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Failed to serialize: {e}");
            std::process::exit(1);
        }
    }
}

fn parse_gender(s: &str) -> Gender {
    Gender::parse(s).unwrap_or_else(|| {
        eprintln!("Invalid gender: {s}");
        eprintln!("Valid: male, female, M, F, 남, 여");
        std::process::exit(1);
    })
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Chart {
            birth,
            gender,
            boundary_table,
            branch_table,
            json,
        } => {
            let mut calc = birth.calculator();
            if let Some(path) = &boundary_table {
                let table = BoundaryTable::from_json(&read_file(path)).unwrap_or_else(|e| {
                    eprintln!("Invalid boundary table: {e}");
                    std::process::exit(1);
                });
                calc = calc.with_boundary_table(table);
            }
            if let Some(path) = &branch_table {
                let table = BranchTenGodTable::from_json(&read_file(path)).unwrap_or_else(|e| {
                    eprintln!("Invalid branch table: {e}");
                    std::process::exit(1);
                });
                calc = calc.with_branch_table(table);
            }
            let gender = gender.as_deref().map(parse_gender);
            let location = birth.location();
            tracing::debug!(
                bridge = calc.lunar_bridge_name(),
                mode = ?calc.normalizer_mode(),
                "calculating chart"
            );
            let chart = calc.calculate(&birth.date, birth.hour, gender, location.as_ref());
            if json {
                print_json(&chart);
            } else {
                print!("{}", render_chart(&chart));
            }
            if chart.fallback {
                std::process::exit(2);
            }
        }

        Commands::Pillar { birth, json } => {
            let calc = birth.calculator();
            let location = birth.location();
            let reading = calc
                .read_pillars(birth.civil(), location.as_ref())
                .unwrap_or_else(|e| {
                    eprintln!("{e}");
                    std::process::exit(1);
                });
            if json {
                print_json(&reading);
            } else {
                let p = &reading.pillars;
                println!("Adjusted: {}", reading.normalized.adjusted);
                println!(
                    "Year {}  Month {}  Day {}  Hour {}",
                    p.year, p.month, p.day, p.hour
                );
                println!("Month number {} of solar year {}", p.month_number, p.solar_year);
                if let Some(term) = &reading.solar_term {
                    println!(
                        "Sectional term {} from {} ({:?})",
                        term.sectional, term.sectional_start, term.precision
                    );
                }
            }
        }

        Commands::Normalize { birth, json } => {
            let calc = birth.calculator();
            let location = birth.location();
            let normalized = calc
                .normalize(birth.civil(), location.as_ref())
                .unwrap_or_else(|e| {
                    eprintln!("{e}");
                    std::process::exit(1);
                });
            if json {
                print_json(&normalized);
            } else {
                let adj = &normalized.adjustment;
                println!("Original: {}", normalized.original);
                println!("Adjusted: {}", normalized.adjusted);
                println!(
                    "Timezone: {} ({:?}{})",
                    adj.timezone,
                    adj.timezone_source,
                    adj.place
                        .as_deref()
                        .map(|p| format!(", {p}"))
                        .unwrap_or_default()
                );
                println!(
                    "Offset:   UTC{:+03}:{:02}{}",
                    adj.offset_minutes / 60,
                    (adj.offset_minutes % 60).abs(),
                    if adj.is_dst { " (DST)" } else { "" }
                );
                for item in &adj.breakdown {
                    println!("  {:<18} {:>+7} s", format!("{:?}", item.source), item.seconds);
                }
                println!("  {:<18} {:>+7} s", "total", adj.total_seconds);
            }
        }

        Commands::Places { query, json } => {
            let dir = CityTimezoneDirectory::builtin();
            let places = match &query {
                Some(q) => dir.search(q),
                None => dir.places().iter().collect(),
            };
            if json {
                print_json(&places);
            } else if places.is_empty() {
                eprintln!("No place matches {:?}", query.unwrap_or_default());
                std::process::exit(1);
            } else {
                for p in places {
                    println!(
                        "{:<16} {:2} {:>8.4} {:>9.4}  {:<20} {:+4} min",
                        p.name, p.country, p.latitude, p.longitude, p.timezone, p.correction_minutes
                    );
                }
            }
        }
    }
}
