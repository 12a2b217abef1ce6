use autoindex::{IndexOptions, clean, config, output, render, scan};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `autoindex=debug`.
const LOG_ENV: &str = "AUTOINDEX_LOG";

/// Flags shared by commands that read the tree.
#[derive(clap::Args, Clone)]
struct ScanArgs {
    /// Keep filesystem order instead of sorting entries by name
    #[arg(long)]
    no_sort: bool,

    /// Log and skip unreadable entries instead of aborting
    #[arg(long)]
    skip_unreadable: bool,

    /// Extra entry name to leave out (repeatable)
    #[arg(long = "skip", value_name = "NAME")]
    skip: Vec<String>,
}

#[derive(clap::Args, Clone)]
struct BuildArgs {
    #[command(flatten)]
    scan: ScanArgs,

    /// Prefix for every generated link
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Stylesheet to inline instead of the built-in one
    #[arg(long, value_name = "FILE")]
    style: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "autoindex")]
#[command(about = "Generate a static index.html for every directory in a tree")]
#[command(long_about = "\
Generate a static index.html for every directory in a tree

Each page lists the directory's subdirectories and files with their size
and modification time (UTC), plus a link to the parent directory.

  root/
  ├── .autoindex.toml          # Optional config (see gen-config)
  ├── index.html               # Generated
  ├── notes.txt
  ├── docs/
  │   ├── index.html           # Generated
  │   └── report.pdf
  └── .git/                    # Hidden: never listed or entered

Settings come from .autoindex.toml in the root; flags override them.")]
#[command(version)]
struct Cli {
    /// Root of the tree to index
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the tree and write index.html into every directory
    Build(BuildArgs),
    /// Scan the tree and print what would be listed
    Scan {
        #[command(flatten)]
        scan: ScanArgs,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove generated index.html files
    Clean(ScanArgs),
    /// Print a stock .autoindex.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build(args) => {
            let mut options = IndexOptions::from_config(&cli.root)?;
            apply_scan_args(&mut options, &args.scan);
            if let Some(base_url) = args.base_url {
                options.base_url = base_url;
            }
            if let Some(style) = &args.style {
                options.custom_style = Some(std::fs::read_to_string(style)?);
            }

            println!("==> Stage 1: Scanning {}", options.root.display());
            let tree = scan::scan(&options.root, &options.scan)?;
            output::print_scan_output(&tree);

            println!("==> Stage 2: Writing index pages");
            let written = render::render_tree(&tree, &options.render_options())?;
            output::print_build_output(&written, &options.root);
        }
        Command::Scan { scan: args, json } => {
            let mut options = IndexOptions::from_config(&cli.root)?;
            apply_scan_args(&mut options, &args);
            let tree = scan::scan(&options.root, &options.scan)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tree)?);
            } else {
                output::print_scan_output(&tree);
            }
        }
        Command::Clean(args) => {
            let mut options = IndexOptions::from_config(&cli.root)?;
            apply_scan_args(&mut options, &args);
            let removed = clean::clean(&options.root, &options.scan)?;
            output::print_clean_output(&removed, &options.root);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Command-line flags win over `.autoindex.toml`.
fn apply_scan_args(options: &mut IndexOptions, args: &ScanArgs) {
    if args.no_sort {
        options.scan.sort = false;
    }
    if args.skip_unreadable {
        options.scan.skip_unreadable = true;
    }
    options.scan.skip.extend(args.skip.iter().cloned());
}

/// Install a stderr subscriber. `AUTOINDEX_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
