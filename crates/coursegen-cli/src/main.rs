use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use coursegen::generator::Generator;
use coursegen::pipeline::{OutputConfig, Pipeline, RunSummary};
use coursegen::types::{Course, Layout, Level};
use coursegen::utils::{CatalogStats, CourseFilter};
use coursegen::{Catalog, SeededDice};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "coursegen")]
#[command(
    about = "Generate synthetic university course catalogs as JSON, CSV and a text summary",
    long_about = None
)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
struct GenerationArgs {
    #[arg(long, help = "Seed for reproducible output (random when omitted)")]
    seed: Option<u64>,

    #[arg(
        long,
        value_parser = parse_layout,
        default_value = "randomized",
        help = "Course layout: randomized or sectioned"
    )]
    layout: Layout,

    #[arg(
        short = 'c',
        long,
        default_value = "houston",
        help = "Built-in catalog (houston, dallas) or path to a JSON catalog file"
    )]
    catalog: String,
}

impl Default for GenerationArgs {
    fn default() -> Self {
        Self {
            seed: None,
            layout: Layout::default(),
            catalog: "houston".to_string(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the catalog and write department, master and summary files (the default)
    Generate {
        #[command(flatten)]
        generation: GenerationArgs,

        #[arg(long, default_value = ".", help = "Directory for master files and the report")]
        out_dir: PathBuf,

        #[arg(
            long,
            default_value = "data",
            help = "Directory for per-department files, relative to --out-dir"
        )]
        data_dir: PathBuf,
    },
    /// Print generated courses without writing any files
    Preview {
        #[command(flatten)]
        generation: GenerationArgs,

        #[arg(long, help = "Only show courses from this department")]
        department: Option<String>,

        #[arg(long, value_parser = parse_level, help = "Only show courses at this level")]
        level: Option<Level>,

        #[arg(
            long,
            help = "Maximum number of courses to show",
            value_parser = clap::value_parser!(u16).range(1..)
        )]
        limit: Option<u16>,

        #[arg(
            long,
            help = "Number of courses to skip from the beginning",
            value_parser = clap::value_parser!(u16).range(1..)
        )]
        offset: Option<u16>,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Print a catalog's lookup tables as JSON, ready to edit and pass back via --catalog
    Catalog {
        #[arg(
            short = 'c',
            long,
            default_value = "houston",
            help = "Built-in catalog (houston, dallas) or path to a JSON catalog file"
        )]
        catalog: String,
    },
    /// Print the JSON Schema of a course record
    Schema,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Generate {
            generation: GenerationArgs::default(),
            out_dir: PathBuf::from("."),
            data_dir: PathBuf::from("data"),
        }
    }
}

fn parse_layout(s: &str) -> Result<Layout, String> {
    Layout::from_str(s).map_err(|e| e.to_string())
}

fn parse_level(s: &str) -> Result<Level, String> {
    Level::from_str(s).map_err(|e| e.to_string())
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

fn load_catalog(name_or_path: &str) -> Catalog {
    Catalog::resolve(name_or_path).unwrap_or_else(|e| {
        log::error!("Error loading catalog: {}", e);
        process::exit(1);
    })
}

fn dice_for(seed: Option<u64>) -> SeededDice {
    match seed {
        Some(seed) => log::info!("Using seed {seed}"),
        None => log::debug!("No seed given, drawing one from OS entropy"),
    }
    SeededDice::new(seed)
}

/// Runs the full pipeline. Failures are logged with their stage and path and
/// yield `None`; they never change the exit status.
fn generate(generation: &GenerationArgs, output: OutputConfig) -> Option<RunSummary> {
    let catalog = match Catalog::resolve(&generation.catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Error loading catalog: {}", e);
            return None;
        }
    };
    let mut dice = dice_for(generation.seed);
    let pipeline = Pipeline::new(catalog, generation.layout, output);

    let started = Local::now();
    match pipeline.run(&mut dice) {
        Ok(summary) => {
            log::info!(
                "Wrote {} files in {} ms",
                summary.files_written(),
                (Local::now() - started).num_milliseconds()
            );
            Some(summary)
        }
        Err(e) => {
            log::error!("Error: {}", e);
            if let Some(path) = e.path() {
                log::error!("Failed path: {}", path.display());
            }
            None
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    match cli.command.unwrap_or_default() {
        Commands::Generate {
            generation,
            out_dir,
            data_dir,
        } => {
            if let Some(summary) = generate(&generation, OutputConfig { out_dir, data_dir }) {
                print!("{}", summary);
            }
        }

        Commands::Preview {
            generation,
            department,
            level,
            limit,
            offset,
            format,
        } => {
            let filter = CourseFilter {
                department,
                level,
                limit: limit.map(usize::from),
                offset: offset.map(usize::from),
            };
            let filter = filter.validate().unwrap_or_else(|e| {
                log::error!("Invalid args: {e}");
                process::exit(1);
            });

            let catalog = load_catalog(&generation.catalog);
            let mut dice = dice_for(generation.seed);
            let courses: Vec<Course> =
                filter.apply(Generator::new(&catalog, generation.layout).generate(&mut dice));

            match format {
                OutputFormat::Json => serialize_json(&courses),
                OutputFormat::Text => {
                    if courses.is_empty() {
                        println!("No courses to display.");
                    } else {
                        for (i, course) in courses.iter().enumerate() {
                            println!("{:>3}. {}", i + 1, course);
                        }
                        print!("{}", CatalogStats::from_courses(&courses));
                    }
                }
            }
        }

        Commands::Catalog { catalog } => serialize_json(&load_catalog(&catalog)),

        Commands::Schema => serialize_json(&schemars::schema_for!(Course)),
    }
}
