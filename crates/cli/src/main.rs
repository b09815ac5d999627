//! Command-line front end: log in, submit jobs, watch them finish.

mod capture;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use capture::FileCapture;
use stylepanel_client::api::StyleApi;
use stylepanel_client::config::ClientConfig;
use stylepanel_client::session::{CachedToken, TokenCache};
use stylepanel_core::host::ViewportCapture;
use stylepanel_core::params::PanelInputs;
use stylepanel_core::types::JobStatus;
use stylepanel_core::worktype::{self, Category};
use stylepanel_orchestrator::{JobEvent, Orchestrator, SubmitRequest};

#[derive(Parser)]
#[command(name = "stylepanel", about = "Submit and monitor generation jobs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and cache the bearer token.
    Login {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
    /// Submit a job and watch it to completion.
    Submit(SubmitArgs),
    /// Query a job's status once.
    Status {
        job_id: String,
        #[arg(long)]
        flow_id: Option<String>,
    },
    /// Ask the server to cancel a job.
    Cancel { job_id: String },
    /// List the available work types.
    WorkTypes,
}

#[derive(clap::Args)]
struct SubmitArgs {
    /// Image to transform.
    #[arg(long)]
    image: PathBuf,
    /// Optional style-reference image.
    #[arg(long)]
    reference: Option<PathBuf>,
    #[arg(long, value_enum)]
    category: CategoryArg,
    /// Option name within the category, e.g. "line-art".
    #[arg(long)]
    option: String,
    /// Prompt text; empty uses the work type's default.
    #[arg(long, default_value = "")]
    prompt: String,
    /// Control strength (0-1).
    #[arg(long)]
    strength: Option<f32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Interior,
    Architecture,
    Landscape,
    ImageEdit,
}

impl From<CategoryArg> for Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Interior => Category::Interior,
            CategoryArg::Architecture => Category::Architecture,
            CategoryArg::Landscape => Category::Landscape,
            CategoryArg::ImageEdit => Category::ImageEdit,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stylepanel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    let api = StyleApi::new(&config)?;
    let cache = config.token_cache.clone().map(TokenCache::new);

    match cli.command {
        Command::Login { phone, password } => {
            let token = api.login(&phone, &password).await?;
            match &cache {
                Some(cache) => {
                    cache.save(&CachedToken {
                        token,
                        phone: Some(phone),
                    })?;
                    println!("Logged in; token cached at {}", cache.path().display());
                }
                None => {
                    println!("Logged in; set STYLEPANEL_TOKEN_CACHE to persist the token");
                }
            }
        }
        Command::Submit(args) => {
            restore_token(&api, cache.as_ref())?;
            submit_and_watch(api, args).await?;
        }
        Command::Status { job_id, flow_id } => {
            restore_token(&api, cache.as_ref())?;
            let status = api.query_status(&job_id, flow_id.as_deref()).await?;
            println!(
                "{} {}%",
                JobStatus::from_code(status.status),
                status.progress_pct()
            );
        }
        Command::Cancel { job_id } => {
            restore_token(&api, cache.as_ref())?;
            api.cancel_job(&job_id).await?;
            println!("Cancel requested for {job_id}");
        }
        Command::WorkTypes => {
            for work_type in worktype::WORK_TYPES {
                println!(
                    "{:>4}  {:?} / {}",
                    work_type.code, work_type.category, work_type.option
                );
            }
        }
    }
    Ok(())
}

fn restore_token(api: &StyleApi, cache: Option<&TokenCache>) -> anyhow::Result<()> {
    match cache.and_then(TokenCache::load) {
        Some(cached) => {
            api.set_token(cached.token);
            Ok(())
        }
        None => bail!("no cached token; run `stylepanel login` first"),
    }
}

async fn submit_and_watch(api: StyleApi, args: SubmitArgs) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(Arc::new(api));
    let mut events = orchestrator.subscribe();

    // Stage the image the way the host plugin stages a viewport grab.
    let staged = std::env::temp_dir().join(format!("stylepanel-capture-{}.png", std::process::id()));
    let original_image = FileCapture::new(&args.image)
        .capture_to(&staged)
        .with_context(|| format!("failed to stage {}", args.image.display()))?;

    let request = SubmitRequest {
        original_image,
        reference_image: args.reference,
        category: args.category.into(),
        option: args.option,
        inputs: PanelInputs {
            prompt: args.prompt,
            strength: args.strength,
            ..Default::default()
        },
    };
    let job = orchestrator.submit(&request).await?;
    println!("Submitted job {}", job.job_id);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("Interrupted; cancelling job");
                orchestrator.cancel().await;
            }
            event = events.recv() => {
                let Ok(event) = event else { break };
                match &event {
                    JobEvent::Progress { status, progress, detail: None, .. } => {
                        println!("  {status} {progress}%");
                    }
                    JobEvent::Progress { status, progress, detail: Some(detail), .. } => {
                        println!("  {status} {progress}% ({detail})");
                    }
                    JobEvent::Completed { result_url: Some(url), .. } => {
                        println!("Completed: {url}");
                    }
                    JobEvent::Completed { result_url: None, .. } => {
                        println!("Completed, but the server returned no result URL");
                    }
                    JobEvent::Cancelled { .. } => println!("Cancelled"),
                    JobEvent::Failed { message, .. } => bail!("{message}"),
                    JobEvent::PollingFailed { failures, .. } => bail!(
                        "gave up after {failures} failed status queries; the job may still be running"
                    ),
                    JobEvent::TimedOut { attempts, .. } => {
                        bail!("no terminal status after {attempts} polls")
                    }
                }
                if event.is_terminal() {
                    break;
                }
            }
        }
    }
    Ok(())
}
