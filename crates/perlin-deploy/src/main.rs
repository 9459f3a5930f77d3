//! Perlin Deploy - CLI for planning the PerlinRoboAdvisorV1 deployment

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use perlin_core::{HdAccountDeriver, PathTemplate};
use perlin_deploy::{AccountRecord, DeployConfig, DeploymentPlan, MnemonicSource};

/// Perlin Deploy - account derivation and deployment planning
#[derive(Parser)]
#[command(name = "perlin-deploy")]
#[command(about = "Derive deployer accounts and plan the PerlinRoboAdvisorV1 deployment")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive deployer accounts from the mnemonic
    Derive {
        /// First account index
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        index: i64,

        /// Number of consecutive accounts to derive
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,

        /// Derivation path template with one {index} slot
        #[arg(long, default_value = PathTemplate::ETHEREUM)]
        path_template: String,

        /// Environment variable holding the mnemonic
        #[arg(long, conflicts_with = "mnemonic_file")]
        mnemonic_env: Option<String>,

        /// File holding the mnemonic
        #[arg(long)]
        mnemonic_file: Option<PathBuf>,

        /// Include private keys in the output (DANGEROUS)
        #[arg(long)]
        show_private_key: bool,
    },

    /// Resolve a deployment config into constructor arguments
    Plan {
        /// Path to deployment config (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Write the plan JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the default Kovan deployment config
    InitConfig {
        /// Output path for the config file
        #[arg(short, long, default_value = "deploy.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (stderr, so stdout stays machine readable)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "perlin_deploy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Derive {
            index,
            count,
            path_template,
            mnemonic_env,
            mnemonic_file,
            show_private_key,
        } => {
            let source = match (mnemonic_env, mnemonic_file) {
                (_, Some(file)) => MnemonicSource::File(file),
                (Some(var), None) => MnemonicSource::Env(var),
                (None, None) => MnemonicSource::default(),
            };

            let template = PathTemplate::parse(&path_template)?;
            info!(source = %source.describe(), template = %template, "Deriving accounts");
            let mnemonic = source.load()?;

            if show_private_key {
                warn!("Private keys will be printed to stdout. Treat the output as a secret.");
            }

            let accounts = HdAccountDeriver::new(template).derive_range(&mnemonic, index, count)?;
            let records: Vec<AccountRecord> = accounts
                .iter()
                .map(|account| AccountRecord::new(account, show_private_key))
                .collect();

            println!("{}", serde_json::to_string_pretty(&records)?);
        }

        Commands::Plan { config, output } => {
            let config = DeployConfig::load(&config)?;
            let plan = DeploymentPlan::resolve(&config)?;
            let json = plan.to_json()?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &json)?;
                    info!(path = %path.display(), "Deployment plan written");
                }
                None => println!("{}", json),
            }
        }

        Commands::InitConfig { output, force } => {
            if output.exists() && !force {
                anyhow::bail!(
                    "{} already exists. Refusing to overwrite (use --force).",
                    output.display()
                );
            }

            DeployConfig::kovan().save(&output)?;
            info!(path = %output.display(), "Wrote default Kovan deployment config");
        }
    }

    Ok(())
}
