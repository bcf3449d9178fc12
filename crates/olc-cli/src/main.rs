mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use commands::Globals;

#[derive(Parser)]
#[command(name = "olc")]
#[command(about = "Operator lifecycle snapshot reconciliation and reports", long_about = None)]
struct Cli {
    /// Layered config paths in merge order (base -> overrides)
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    /// Snapshot directory holding the pay_*.json exports (wins over config and OLC_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Fail instead of warn when the config carries keys nothing reads
    #[arg(long, global = true, default_value_t = false)]
    strict_config: bool,

    /// Reference time for day arithmetic and manifests (default: now)
    #[arg(long, global = true)]
    as_of: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Client -> PizzaStatus -> StatusType relationships with discrepancy sections
    Clients {
        /// Write the report (and its manifest) to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write the report into the configured output dir
        #[arg(long, default_value_t = false)]
        save: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Operator distribution, certification and status-history summary
    Operators {
        /// Write the report (and its manifest) into the configured output dir
        #[arg(long, default_value_t = false)]
        save: bool,

        /// Also export Division,Status,Count to operator_summary.csv
        #[arg(long, default_value_t = false)]
        csv: bool,
    },

    /// Which operators have certifications linked to them
    OperatorCerts,

    /// Cert types required by PizzaStatuses in a division
    CertTypes {
        #[arg(long)]
        division: String,

        /// PizzaStatusID (repeatable)
        #[arg(long = "pizza-status", required = true)]
        pizza_status_ids: Vec<String>,

        /// Skip soft-deleted cert types
        #[arg(long, default_value_t = false)]
        active_only: bool,
    },

    /// Status types in a division whose Status contains a substring
    StatusTypes {
        #[arg(long)]
        division: String,

        /// Case-insensitive substring; empty matches all
        #[arg(long, default_value = "")]
        contains: String,
    },

    /// Days each operator has been in the current status
    DaysInStatus {
        /// Explain the result for a single operator ID
        #[arg(long)]
        operator: Option<String>,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    // dev-time convenience; silent when absent
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = Cli::parse();
    let globals = Globals {
        config_paths: cli.config_paths,
        data_dir: cli.data_dir,
        strict_config: cli.strict_config,
        as_of: cli.as_of,
    };

    match cli.cmd {
        Commands::Clients { out, save, format } => {
            let ctx = commands::prepare(&globals)?;
            commands::clients::run(&ctx, out, save, format)
        }
        Commands::Operators { save, csv } => {
            let ctx = commands::prepare(&globals)?;
            commands::operators::run_summary(&ctx, save, csv)
        }
        Commands::OperatorCerts => {
            let ctx = commands::prepare(&globals)?;
            commands::operators::run_cert_check(&ctx)
        }
        Commands::CertTypes {
            division,
            pizza_status_ids,
            active_only,
        } => {
            let ctx = commands::prepare(&globals)?;
            commands::lookups::run_cert_types(&ctx, &division, &pizza_status_ids, active_only)
        }
        Commands::StatusTypes { division, contains } => {
            let ctx = commands::prepare(&globals)?;
            commands::lookups::run_status_types(&ctx, &division, &contains)
        }
        Commands::DaysInStatus { operator } => {
            let ctx = commands::prepare(&globals)?;
            commands::operators::run_days_in_status(&ctx, operator.as_deref())
        }
        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = olc_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout carries only report text.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
