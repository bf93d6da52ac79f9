mod display;
mod fields;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};
use cardiorisk_ai::{Dataset, LogisticModel, TrainConfig};
use cardiorisk_client::{Dashboard, FormHandler, PredictClient};
use cardiorisk_server::ServerConfig;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cardiorisk", version, about = "Heart-disease risk prediction service and client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the prediction API.
    Serve(ServeArgs),
    /// Train the placeholder model and write it to disk.
    Train(TrainArgs),
    /// Submit form fields to a running service and show the result.
    Predict(PredictArgs),
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long, env = "CARDIORISK_BIND", default_value = "0.0.0.0:5000")]
    bind: SocketAddr,
    #[arg(long, env = "CARDIORISK_MODEL", default_value = "model.json")]
    model: PathBuf,
}

#[derive(Args)]
struct TrainArgs {
    #[arg(long, env = "CARDIORISK_MODEL", default_value = "model.json")]
    model: PathBuf,
    #[arg(long, default_value_t = cardiorisk_ai::DEFAULT_SAMPLES)]
    samples: usize,
    #[arg(long, default_value_t = cardiorisk_ai::DEFAULT_SEED)]
    seed: u64,
    /// Overwrite an existing model file.
    #[arg(long)]
    force: bool,
}

#[derive(Args)]
struct PredictArgs {
    #[arg(long, env = "CARDIORISK_URL", default_value = "http://127.0.0.1:5000")]
    url: String,
    /// File of FIELD=VALUE lines, read before the positional fields.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Form fields as FIELD=VALUE.
    fields: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Train(args) => train(args),
        Command::Predict(args) => predict(args).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    tracing::info!("cardiorisk v{}", env!("CARGO_PKG_VERSION"));
    cardiorisk_server::serve(ServerConfig {
        bind: args.bind,
        model_path: args.model,
        train: TrainConfig::default(),
    })
    .await
}

fn train(args: TrainArgs) -> anyhow::Result<()> {
    if args.model.exists() && !args.force {
        bail!(
            "{} already exists (pass --force to overwrite)",
            args.model.display()
        );
    }

    let cfg = TrainConfig {
        samples: args.samples,
        seed: args.seed,
        ..TrainConfig::default()
    };
    let dataset = Dataset::synthetic(cfg.samples, cfg.seed);
    let model = LogisticModel::fit(&dataset, &cfg).context("training model")?;
    model
        .save(&args.model)
        .with_context(|| format!("writing {}", args.model.display()))?;

    display::print_model_summary(&model, &dataset.summary());
    eprintln!("  Saved model to {}", args.model.display());
    Ok(())
}

async fn predict(args: PredictArgs) -> anyhow::Result<()> {
    let entries = fields::collect(args.file.as_deref(), &args.fields)?;
    if entries.is_empty() {
        bail!("no form fields given (use FIELD=VALUE or --file)");
    }

    let handler = FormHandler::new(PredictClient::new(args.url));
    let mut dashboard = Dashboard::new();
    let outcome = handler.submit(entries, &mut dashboard).await;

    display::print_dashboard(&dashboard);
    if !outcome.is_predicted() {
        bail!("submission did not produce a prediction");
    }
    Ok(())
}
