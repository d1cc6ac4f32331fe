use clap::{Parser, Subcommand};
use site_indices::{config, generate, output, scan};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "site-indices")]
#[command(about = "Build the client-side navigation indices of a documentation site")]
#[command(long_about = "\
Build the client-side navigation indices of a documentation site

Every page describes itself in YAML front matter. The scan stage reads that
front matter into a manifest; the generate stage turns the manifest into one
JavaScript file that binds three lookup tables to browser globals:

  pageIndex    directory → kind → HTML table   (directory listings)
  tabIndex     HTML links for pages with a `tab`  (tab strip)
  titleIndex   url → title

Docs structure:

  docs/
  ├── config.toml                  # Index config (optional)
  ├── index.md                     # layout: page, tab: 1 Home
  └── point.hpp/
      ├── index.md                 # layout: library, library-type: sourcefile
      └── point/
          ├── index.md             # layout: class
          └── m_size.md            # layout: method

Front matter fields may sit at the top level or under a `hyde:` table.

Run 'site-indices gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Docs directory
    #[arg(long, default_value = "docs", global = true)]
    source: PathBuf,

    /// Output directory (the built site)
    #[arg(long, default_value = "_site", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".site-indices-temp", global = true)]
    temp_dir: PathBuf,

    /// Log progress at info level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the docs directory into a manifest
    Scan,
    /// Write the index artifact from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate the docs directory without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let manifest_path = cli.temp_dir.join("manifest.json");

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest);
        }
        Command::Generate => {
            let report = generate::generate(&manifest_path, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest);

            println!("==> Stage 2: Generating indices → {}", cli.output.display());
            let report = generate::generate(&manifest_path, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", report.artifact.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest);
            println!("{}", output::format_check_summary(&manifest));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the global tracing subscriber. Logs go to stderr so stdout stays
/// the command's own output.
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)?;
    Ok(())
}
