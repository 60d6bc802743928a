use anyhow::{Context, Result};
use changefold::{
    ChangefoldConfig, ChangelogGenerator, FsChangelogStore, FsFragmentSource, GitCli,
    ReleaseRequest,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "changefold")]
#[command(version, about = "fold unreleased changelog fragments into the changelog", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// project root holding the fragments and the changelog (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// configuration file (defaults to changefold.toml in the project root)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// output format (json or human)
    #[arg(short, long, default_value = "human", global = true)]
    format: OutputFormat,

    /// log every step to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Json,
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!(
                "invalid output format: {}, use 'json' or 'human'",
                s
            )),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// update the changelog with the unreleased entries
    Generate {
        /// version of the release
        version: String,

        /// date of the release (defaults to today, YYYY-MM-DD)
        date: Option<String>,

        /// print the result without writing or touching git
        #[arg(long)]
        dry_run: bool,

        /// commit and tag the release even if the configuration does not ask for it
        #[arg(long)]
        finalize: bool,
    },

    /// list the fragments the next release would consume
    Pending,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "changefold=debug"
    } else {
        "changefold=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(root: &Path, config_path: Option<&Path>) -> Result<ChangefoldConfig> {
    let config = match config_path {
        Some(path) => ChangefoldConfig::load_from_file(path),
        None => ChangefoldConfig::load(root),
    };
    config.context("failed to load configuration")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli.path, cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            version,
            date,
            dry_run,
            finalize,
        } => {
            let request = match date {
                Some(date) => ReleaseRequest::new(version, date),
                None => ReleaseRequest::today(version),
            };
            handle_generate(&cli.path, &cli.format, &config, &request, dry_run, finalize)?;
        }
        Commands::Pending => {
            handle_pending(&cli.path, &cli.format, &config)?;
        }
    }

    Ok(())
}

fn handle_generate(
    root: &Path,
    format: &OutputFormat,
    config: &ChangefoldConfig,
    request: &ReleaseRequest,
    dry_run: bool,
    finalize: bool,
) -> Result<()> {
    let changelog_file = config
        .changelog_file()
        .context("no changelog file configured")?;
    let fragments = FsFragmentSource::new(root, &config.files_path);
    let changelog = FsChangelogStore::new(root, changelog_file);

    if dry_run {
        let generator = ChangelogGenerator::new(fragments, changelog, GitCli::new(root));
        let preview = generator
            .preview(request)
            .context("failed to preview changelog")?;

        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "version": request.version,
                    "date": request.date,
                    "changelog": changelog_file,
                    "preview": preview,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Human => match preview {
                Some(preview) => {
                    println!("would add to {}:", changelog_file.display());
                    print!("{}", preview.header);
                }
                None => {
                    println!(
                        "no fragments found in {}, nothing to do",
                        config.files_path.display()
                    );
                }
            },
        }
        return Ok(());
    }

    let vcs = GitCli::discover(root).context("failed to open git repository")?;
    let generator = ChangelogGenerator::new(fragments, changelog, vcs)
        .with_config(config)
        .finalize(config.finalize || finalize);

    let report = generator
        .generate(request)
        .context("failed to update changelog")?;

    // cleanup warnings are part of the report and do not fail the run
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Human => {
            report.display_summary(&config.files_path);
        }
    }

    Ok(())
}

fn handle_pending(root: &Path, format: &OutputFormat, config: &ChangefoldConfig) -> Result<()> {
    let changelog_file = config
        .changelog_file()
        .context("no changelog file configured")?;
    let generator = ChangelogGenerator::new(
        FsFragmentSource::new(root, &config.files_path),
        FsChangelogStore::new(root, changelog_file),
        GitCli::new(root),
    );
    let fragments = generator
        .pending()
        .context("failed to read fragments")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&fragments)?);
        }
        OutputFormat::Human => {
            if fragments.is_empty() {
                println!("no fragments in {}", config.files_path.display());
            } else {
                println!("pending fragments:");
                for fragment in fragments {
                    println!("  {} ({})", fragment.name, fragment.path.display());
                }
            }
        }
    }

    Ok(())
}
