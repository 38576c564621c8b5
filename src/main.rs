//! Meme Mint CLI
//!
//! Usage:
//!   meme-mint [OPTIONS] [TEMPLATE] [LINES]...
//!
//! Options:
//!   --catalog <FILE>     Template catalog JSON (bundled catalog if omitted)
//!   -c, --config <FILE>  Generator configuration (TOML format)
//!   -f, --format <EXT>   Image format override
//!   -l, --list           Print the template listing used in agent prompts
//!   --json               Print the generated meme as JSON
//!   -v, --verbose        Debug logging
//!   -h, --help           Print help

use std::path::PathBuf;

use clap::Parser;

use meme_mint::{GeneratorConfig, MemeGenerator, TemplateCatalog};

#[derive(Parser)]
#[command(name = "meme-mint")]
#[command(about = "Build memegen image URLs from a template choice and caption lines")]
struct Cli {
    /// Template id (unknown ids use the configured fallback)
    template: Option<String>,

    /// Caption lines, one per template slot
    lines: Vec<String>,

    /// Template catalog JSON in memegen templates.json format
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Generator configuration (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image format override (png, jpg, gif, webp)
    #[arg(short, long)]
    format: Option<String>,

    /// Print the template listing used in agent prompts
    #[arg(short, long)]
    list: bool,

    /// Print the generated meme as JSON instead of the bare URL
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    // Load catalog
    let catalog = match &cli.catalog {
        Some(path) => TemplateCatalog::from_file(path),
        None => TemplateCatalog::bundled(),
    };
    let catalog = match catalog {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading template catalog: {}", e);
            std::process::exit(1);
        }
    };

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => match GeneratorConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => GeneratorConfig::default(),
    };
    if let Some(format) = cli.format {
        config = config.with_format(format);
    }

    let generator = match MemeGenerator::new(catalog, config) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.list {
        for line in generator.describe_templates() {
            println!("{}", line);
        }
        return;
    }

    let Some(template) = cli.template else {
        eprintln!("Error: a template id is required (run --list to see available templates)");
        std::process::exit(2);
    };

    match generator.generate(&template, cli.lines) {
        Ok(meme) => {
            if meme.fallback_used {
                eprintln!(
                    "Template '{}' not found; used '{}' instead",
                    template, meme.template_id
                );
            }
            if cli.json {
                match serde_json::to_string_pretty(&meme) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                println!("{}", meme.meme_url);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
