use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fairseed_core::{
    generate_client_seed, generate_server_seed, IntRange, ProvablyFair, WeightedOption,
};
use fairseed_shared::{ApiError, OutcomeKind, OutcomeRecord, OutcomeRequest, OutcomeValue};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fairseed", about = "Derive and verify provably fair outcomes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Print full JSON records instead of bare values
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Args)]
struct RoundArgs {
    #[arg(long, env = "FAIRSEED_CLIENT_SEED")]
    client_seed: String,
    #[arg(long, env = "FAIRSEED_SERVER_SEED")]
    server_seed: String,
    #[arg(long, env = "FAIRSEED_NONCE")]
    nonce: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum Role {
    Server,
    Client,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new 512 hex character seed
    Seed {
        #[arg(long, value_enum, default_value_t = Role::Server)]
        role: Role,
    },
    /// Print the SHA-512 digest of client_seed ++ server_seed ++ nonce
    Digest {
        #[command(flatten)]
        round: RoundArgs,
    },
    /// Derive an integer in [min, max]
    Int {
        #[command(flatten)]
        round: RoundArgs,
        #[arg(long, allow_negative_numbers = true)]
        min: i64,
        #[arg(long, allow_negative_numbers = true)]
        max: i64,
    },
    /// Derive a boolean
    Bool {
        #[command(flatten)]
        round: RoundArgs,
    },
    /// Pick one option by weight, options given as id:weight in order
    Pick {
        #[command(flatten)]
        round: RoundArgs,
        #[arg(long = "option", value_parser = parse_option)]
        options: Vec<WeightedOption>,
        /// JSON array of {"id": ..., "weight": ...}
        #[arg(long, conflicts_with = "options")]
        options_file: Option<PathBuf>,
    },
    /// Recompute a JSON outcome record and check it
    Verify { path: PathBuf },
    /// Export integer outcomes for nonces [from, to) to CSV
    ExportCsv {
        #[arg(long, env = "FAIRSEED_CLIENT_SEED")]
        client_seed: String,
        #[arg(long, env = "FAIRSEED_SERVER_SEED")]
        server_seed: String,
        #[arg(long, default_value_t = 0)]
        from: u64,
        #[arg(long)]
        to: u64,
        #[arg(long, allow_negative_numbers = true)]
        min: i64,
        #[arg(long, allow_negative_numbers = true)]
        max: i64,
        path: PathBuf,
    },
}

fn parse_option(s: &str) -> Result<WeightedOption, ApiError> {
    let (id, weight) = s
        .rsplit_once(':')
        .ok_or_else(|| ApiError::Invalid(format!("expected id:weight, got {s:?}")))?;
    let weight = weight
        .parse::<u64>()
        .map_err(|e| ApiError::Invalid(format!("bad weight in {s:?}: {e}")))?;
    Ok(WeightedOption::new(id, weight))
}

fn load_options(path: &Path) -> anyhow::Result<Vec<WeightedOption>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading options from {}", path.display()))?;
    let options = serde_json::from_str(&raw)
        .with_context(|| format!("parsing options in {}", path.display()))?;
    Ok(options)
}

fn request(round: RoundArgs, kind: OutcomeKind) -> OutcomeRequest {
    OutcomeRequest {
        client_seed: round.client_seed,
        server_seed: round.server_seed,
        nonce: round.nonce,
        kind,
    }
}

fn emit(req: OutcomeRequest, json: bool) -> anyhow::Result<()> {
    let record = req.record(Utc::now())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }
    match record.value {
        OutcomeValue::Integer(v) => println!("{v}"),
        OutcomeValue::Boolean(b) => println!("{b}"),
        OutcomeValue::Selection(Some(id)) => println!("{id}"),
        OutcomeValue::Selection(None) => println!("(none)"),
    }
    Ok(())
}

fn export_csv(
    round: (&str, &str),
    nonces: std::ops::Range<u64>,
    range: IntRange,
    path: &Path,
) -> anyhow::Result<u64> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(["nonce", "roll", "value"])?;
    let mut rows = 0u64;
    for nonce in nonces {
        let pf = ProvablyFair::new(round.0, round.1, nonce);
        wtr.write_record(&[
            nonce.to_string(),
            format!("{:08x}", pf.roll()),
            pf.integer_in(range).to_string(),
        ])?;
        rows += 1;
    }
    wtr.flush()?;
    Ok(rows)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Seed { role } => {
            let seed = match role {
                Role::Server => generate_server_seed()?,
                Role::Client => generate_client_seed()?,
            };
            println!("{seed}");
        }
        Commands::Digest { round } => {
            let pf = ProvablyFair::new(round.client_seed, round.server_seed, round.nonce);
            println!("{}", pf.digest_hex());
        }
        Commands::Int { round, min, max } => {
            emit(request(round, OutcomeKind::Integer { min, max }), cli.json)?;
        }
        Commands::Bool { round } => {
            emit(request(round, OutcomeKind::Boolean), cli.json)?;
        }
        Commands::Pick {
            round,
            options,
            options_file,
        } => {
            let options = match options_file {
                Some(path) => load_options(&path)?,
                None => options,
            };
            emit(request(round, OutcomeKind::Weighted { options }), cli.json)?;
        }
        Commands::Verify { path } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading record {}", path.display()))?;
            let record: OutcomeRecord = serde_json::from_str(&raw)
                .with_context(|| format!("parsing record {}", path.display()))?;
            let report = record.verify()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            if !report.ok() {
                warn!(nonce = record.request.nonce, "record failed verification");
                bail!(
                    "record does not verify: expected {:?} with digest {}",
                    report.expected_value,
                    report.expected_digest
                );
            }
            if !cli.json {
                println!("ok");
            }
        }
        Commands::ExportCsv {
            client_seed,
            server_seed,
            from,
            to,
            min,
            max,
            path,
        } => {
            let range = IntRange::new(min, max)?;
            let rows = export_csv((&client_seed, &server_seed), from..to, range, &path)?;
            info!(rows, path = %path.display(), "exported outcomes");
        }
    }

    Ok(())
}
