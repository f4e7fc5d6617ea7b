//! `graft` — command-line client for the organ-donor registry contract.
//!
//! # Usage
//!
//! ```
//! graft --wallet-url http://127.0.0.1:8545 connect
//! graft donor --name "Ada Lovelace" --age 36 --blood-type O+ --organ-type kidney \
//!   --contact ada@example.org --consent
//! graft list
//! graft match --donor 0 --receiver 2 --check
//! ```

mod output;
mod settings;

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use graft_core::{
  chain::{Address, Network},
  dashboard::Dashboard,
  form::{DonorForm, ReceiverForm},
  notice::{Notice, Notices},
  session::{self, Session},
  submit::submit,
};
use graft_eth::RpcWallet;
use output::Terminal;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "graft", version, about = "Organ-donor registry client")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "graft.toml")]
  config: PathBuf,

  /// JSON-RPC endpoint of the wallet provider.
  #[arg(long, value_name = "URL")]
  wallet_url: Option<String>,

  /// Address of the registry contract.
  #[arg(long, value_name = "ADDRESS")]
  contract: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Connect to the wallet, switching it to the configured network.
  Connect,
  /// Show the account the wallet already exposes, without prompting.
  Status,
  /// Register as an organ donor.
  Donor(DonorArgs),
  /// Register as an organ receiver.
  Receiver(ReceiverArgs),
  /// List available donors, waiting receivers and existing matches.
  List {
    /// Print every loaded record as JSON instead.
    #[arg(long)]
    json: bool,
  },
  /// Match a donor with a receiver.
  Match {
    #[arg(long)]
    donor:    u64,
    #[arg(long)]
    receiver: u64,
    /// Only report whether the pair is compatible.
    #[arg(long)]
    check:    bool,
  },
}

#[derive(Args, Debug)]
struct DonorArgs {
  #[arg(long)]
  name:       String,
  #[arg(long)]
  age:        String,
  /// A+, A-, B+, B-, AB+, AB-, O+ or O-.
  #[arg(long)]
  blood_type: String,
  /// kidney, liver, heart, lung, pancreas or cornea.
  #[arg(long)]
  organ_type: String,
  #[arg(long)]
  contact:    String,
  /// Consent to organ donation.
  #[arg(long)]
  consent:    bool,
}

#[derive(Args, Debug)]
struct ReceiverArgs {
  #[arg(long)]
  name:         String,
  #[arg(long)]
  age:          String,
  #[arg(long)]
  blood_type:   String,
  #[arg(long)]
  organ_needed: String,
  /// 1 (low) to 10 (critical).
  #[arg(long, default_value = "5")]
  urgency:      String,
  #[arg(long)]
  history:      String,
  #[arg(long)]
  contact:      String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let mut terminal = Terminal::default();

  match run(cli, &mut terminal).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      // Transaction and refresh failures were already reported as they happened.
      if !terminal.reported_error() {
        terminal.notify(Notice::error("Error", format!("{e:#}")));
      }
      ExitCode::FAILURE
    }
  }
}

async fn run(cli: Cli, terminal: &mut Terminal) -> anyhow::Result<()> {
  let mut settings = Settings::load(&cli.config)
    .with_context(|| format!("failed to read config {}", cli.config.display()))?;
  if let Some(url) = cli.wallet_url {
    settings.wallet_url = Some(url);
  }
  if let Some(contract) = cli.contract {
    settings.contract_address = contract;
  }

  let contract: Address = settings
    .contract_address
    .parse()
    .context("invalid contract address")?;
  let wallet_missing = settings.wallet_url.is_none();
  let wallet = settings
    .wallet_url
    .as_deref()
    .map(|url| {
      RpcWallet::connect(url).map(|w| w.with_poll_interval(settings.poll_interval()))
    })
    .transpose()
    .context("failed to set up the wallet client")?;
  let network = Network::from(settings.network);

  match cli.command {
    Command::Connect => {
      let session = open(wallet, &network, contract).await?;
      println!(
        "Connected as {} on {} (contract {})",
        session.account().short(),
        network.chain_name,
        session.contract().short()
      );
    }

    Command::Status => match session::resume(wallet, contract).await? {
      Some(session) => {
        let on_network = if session.chain_id() == network.chain_id {
          network.chain_name.clone()
        } else {
          format!("chain {} (expected {})", session.chain_id(), network.chain_name)
        };
        println!("Connected as {} on {on_network}", session.account().short());
      }
      None if wallet_missing => {
        println!("Not connected (no wallet endpoint configured)")
      }
      None => println!("Not connected"),
    },

    Command::Donor(args) => {
      let session = open(wallet, &network, contract).await?;
      let mut form = DonorForm {
        name:         args.name,
        age:          args.age,
        blood_type:   args.blood_type,
        organ_type:   args.organ_type,
        contact_info: args.contact,
        consent:      args.consent,
      };
      submit(&mut form, &session.registry(), terminal).await?;
    }

    Command::Receiver(args) => {
      let session = open(wallet, &network, contract).await?;
      let mut form = ReceiverForm {
        name:            args.name,
        age:             args.age,
        blood_type:      args.blood_type,
        organ_needed:    args.organ_needed,
        urgency_level:   args.urgency,
        medical_history: args.history,
        contact_info:    args.contact,
      };
      submit(&mut form, &session.registry(), terminal).await?;
    }

    Command::List { json } => {
      let session = open(wallet, &network, contract).await?;
      let dashboard = load(&session, terminal).await?;
      if json {
        println!("{}", output::json(&dashboard)?);
      } else {
        print!("{}", output::listing(&dashboard));
      }
    }

    Command::Match {
      donor,
      receiver,
      check,
    } => {
      let session = open(wallet, &network, contract).await?;
      let mut dashboard = load(&session, terminal).await?;
      dashboard.select_donor(donor)?;
      dashboard.select_receiver(receiver)?;

      if check {
        match dashboard.selection_compatible() {
          Some(true) => println!("Donor #{donor} and receiver #{receiver} are compatible"),
          _ => println!("Donor #{donor} and receiver #{receiver} are not compatible"),
        }
      } else {
        dashboard.create_match(&session.registry(), terminal).await?;
      }
    }
  }

  Ok(())
}

/// Connect, pointing at the configuration when no wallet endpoint is set.
async fn open(
  wallet: Option<RpcWallet>,
  network: &Network,
  contract: Address,
) -> anyhow::Result<Session<RpcWallet>> {
  session::connect(wallet, network, contract)
    .await
    .map_err(explain)
}

fn explain(e: graft_core::Error) -> anyhow::Error {
  match e {
    graft_core::Error::NoWallet => anyhow::anyhow!(
      "no wallet endpoint configured; pass --wallet-url or set GRAFT_WALLET_URL"
    ),
    other => other.into(),
  }
}

async fn load(session: &Session<RpcWallet>, terminal: &mut Terminal) -> anyhow::Result<Dashboard> {
  let mut dashboard = Dashboard::new();
  dashboard.refresh(&session.registry(), terminal).await?;
  Ok(dashboard)
}
