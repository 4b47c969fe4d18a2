//! CrossDAO operator CLI for voter keys and record inspection.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use crossdao_utils::LogFormat;

#[derive(Parser)]
#[command(name = "crossdao", about = "CrossDAO governance operator tool")]
struct Cli {
    /// Log output format: "human" or "json".
    #[arg(long, default_value = "human", env = "CROSSDAO_LOG_FORMAT")]
    log_format: LogFormat,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "warn", env = "CROSSDAO_LOG_LEVEL")]
    log_level: String,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a voter key pair.
    Keygen {
        /// 32-byte hex seed for a deterministic key.
        #[arg(long)]
        seed: Option<String>,
    },

    /// Derive the account of a public key.
    Account {
        /// 32-byte hex Ed25519 public key.
        public_key: String,
    },

    /// Print the digest a voter signs.
    VoteDigest {
        #[arg(long)]
        governor: String,
        #[arg(long)]
        proposal: String,
        /// "for", "against", "abstain", or the numeric code.
        #[arg(long, default_value = "for")]
        support: String,
    },

    /// Sign a vote for submission via cast-vote-by-signature.
    SignVote {
        #[arg(long)]
        governor: String,
        #[arg(long)]
        proposal: String,
        #[arg(long, default_value = "for")]
        support: String,
        /// 32-byte hex private key.
        #[arg(long, env = "CROSSDAO_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
    },

    /// Compute a proposal's content id and payload hash.
    ProposalId {
        #[arg(long)]
        from_chain: u64,
        /// Destination chain id, or "broadcast".
        #[arg(long)]
        to_chain: String,
        /// Instruction type name or code.
        #[arg(long)]
        instruction: String,
        #[arg(long)]
        term: u64,
        #[arg(long)]
        nonce: u64,
        /// Hex payload.
        #[arg(long, default_value = "")]
        payload: String,
    },

    /// Decode a relayed record and check its decision data.
    InspectRecord {
        /// Record bytes as hex.
        #[arg(long)]
        hex: Option<String>,
        /// File holding raw record bytes.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Validate a governor or executor TOML configuration.
    CheckConfig {
        #[command(subcommand)]
        kind: ConfigKind,
    },
}

#[derive(clap::Subcommand)]
enum ConfigKind {
    Governor { path: PathBuf },
    Executor { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    crossdao_utils::init_logging(cli.log_format, &cli.log_level)?;

    let output = match cli.command {
        Command::Keygen { seed } => commands::keygen(seed.as_deref())?,
        Command::Account { public_key } => commands::account(&public_key)?,
        Command::VoteDigest {
            governor,
            proposal,
            support,
        } => commands::digest(&governor, &proposal, &support)?,
        Command::SignVote {
            governor,
            proposal,
            support,
            private_key,
        } => commands::sign(&governor, &proposal, &support, &private_key)?,
        Command::ProposalId {
            from_chain,
            to_chain,
            instruction,
            term,
            nonce,
            payload,
        } => commands::proposal_id(
            crossdao_types::ChainId(from_chain),
            commands::parse_chain(&to_chain)?,
            commands::parse_instruction(&instruction)?,
            term,
            nonce,
            &payload,
        )?,
        Command::InspectRecord { hex, file } => {
            let bytes = commands::read_record_input(hex.as_deref(), file.as_deref())?;
            commands::inspect_record(&bytes)?
        }
        Command::CheckConfig { kind } => match kind {
            ConfigKind::Governor { path } => commands::check_governor_config(&path)?,
            ConfigKind::Executor { path } => commands::check_executor_config(&path)?,
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
