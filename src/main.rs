//! Store Layout CLI
//!
//! Usage:
//!   store-layout [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>      Layout configuration (TOML format)
//!   -p, --palette <FILE>     Color palette (TOML format)
//!       --placement <MODE>   Section placement: declared | avoid-anchors
//!   -f, --format <FORMAT>    Output format: svg | json
//!       --inline             Single-line SVG fragment without XML declaration
//!       --no-title           Leave out the store title
//!   -l, --lint               Report layout warnings on stderr
//!   -d, --debug              Verbose logging and the placed tree on stderr
//!   -h, --help               Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use store_layout::layout::lint;
use store_layout::{
    compute, parse_layout, render_empty_svg, render_svg, LayoutConfig, LayoutOutcome, Palette,
    SectionPlacement, SvgConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

#[derive(Parser)]
#[command(name = "store-layout")]
#[command(about = "Place and render store floor-plan layouts")]
struct Cli {
    /// Input JSON layout (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Layout configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Palette file for status and chrome colors (TOML format)
    #[arg(short, long)]
    palette: Option<PathBuf>,

    /// Section placement policy, overriding the configuration file
    #[arg(long)]
    placement: Option<SectionPlacement>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Write the SVG as a single-line fragment for inlining into HTML
    #[arg(long)]
    inline: bool,

    /// Leave out the `Store Layout - <name>` title
    #[arg(long)]
    no_title: bool,

    /// Report overlaps, canvas overflow and identity fallbacks on stderr
    #[arg(short, long)]
    lint: bool,

    /// Debug mode: verbose logging and the placed element tree
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let mut config = match &cli.config {
        Some(path) => match LayoutConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => LayoutConfig::default(),
    };
    if let Some(placement) = cli.placement {
        config = config.with_section_placement(placement);
    }

    let palette = match &cli.palette {
        Some(path) => match Palette::from_file(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error loading palette '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Palette::default(),
    };

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let layout = match parse_layout(&source) {
        Ok(layout) => layout,
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    let outcome = compute(layout.as_ref(), &config);
    let svg_config = if cli.inline {
        SvgConfig::inline()
    } else {
        SvgConfig::new()
    }
    .with_title(!cli.no_title);

    if let LayoutOutcome::Placed(result) = &outcome {
        if cli.debug {
            eprintln!("=== Layout Debug ===");
            eprint!("{}", result.describe());
            eprintln!("====================");
        }
        if cli.lint {
            for warning in lint::check(result) {
                eprintln!("warning: {}", warning);
            }
        }
    }

    let output = match (cli.format, &outcome) {
        (OutputFormat::Svg, LayoutOutcome::Placed(result)) => {
            render_svg(result, &svg_config, &palette)
        }
        (OutputFormat::Svg, LayoutOutcome::Empty(reason)) => render_empty_svg(
            *reason,
            config.canvas_width_px,
            config.canvas_height_px,
            &svg_config,
            &palette,
        ),
        (OutputFormat::Json, LayoutOutcome::Placed(result)) => to_json(result),
        (OutputFormat::Json, LayoutOutcome::Empty(reason)) => {
            to_json(&serde_json::json!({ "empty": reason }))
        }
    };

    println!("{}", output);
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "store_layout=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error serializing layout: {}", e);
            std::process::exit(1);
        }
    }
}
