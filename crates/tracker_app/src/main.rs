//! CLI host for the job capture engine: fetches a posting page, runs the
//! content-script pipeline against it, then drives the popup state machine
//! to save the result through the backend.

mod persistence;
mod runner;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use tracker_engine::{
    BackendClient, BackendSettings, Clock, FetchSettings, HostEvent, HostSettings, PageFetcher,
    ReqwestPageFetcher, SiteKind, TrackerHost,
};
use tracker_logging::{tracker_error, tracker_info, LogDestination};

use runner::{EffectRunner, FlowOutcome, FormInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogTarget {
    Terminal,
    File,
    Both,
}

#[derive(Debug, Parser)]
#[command(
    name = "tracker_app",
    about = "Capture a job posting page and append it to the tracking sheet"
)]
struct Args {
    /// Job posting URL (LinkedIn, Seek or Indeed).
    page_url: String,

    /// Backend base URL.
    #[arg(long, default_value = "http://localhost:3000")]
    backend: String,

    /// Google Sheet URL to connect before saving.
    #[arg(long)]
    sheet: Option<String>,

    /// Application stage column value.
    #[arg(long, default_value = "Applied")]
    stage: String,

    /// Priority column value.
    #[arg(long, default_value = "Medium")]
    priority: String,

    /// Notes column value.
    #[arg(long, default_value = "")]
    notes: String,

    /// Directory holding persisted state (defaults to ./.job_tracker).
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Where logs go.
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    log: LogTarget,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let destination = match args.log {
        LogTarget::Terminal => LogDestination::Terminal,
        LogTarget::File => LogDestination::File,
        LogTarget::Both => LogDestination::Both,
    };
    tracker_logging::initialize(destination, LevelFilter::Info, Path::new("./tracker.log"));

    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let clock: Clock = Arc::new(|| Utc::now().to_rfc3339());

    let fetcher = match ReqwestPageFetcher::new(FetchSettings::default()) {
        Ok(fetcher) => fetcher,
        Err(err) => {
            tracker_error!("Failed to build page fetcher: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let page = match runtime.block_on(fetcher.fetch(&args.page_url)) {
        Ok(page) => page,
        Err(err) => {
            tracker_error!("Failed to fetch {}: {}", args.page_url, err);
            return ExitCode::FAILURE;
        }
    };

    let host = TrackerHost::new(HostSettings::default(), clock);
    let kind = host.load_page(page.final_url.clone(), page.html);
    if kind == SiteKind::Unsupported {
        tracker_info!("{} is not a supported job board page.", page.final_url);
        return ExitCode::SUCCESS;
    }
    tracker_info!("detected site: {:?}", kind);

    // The injected control exists by now; click it and wait for the
    // coordinator to request the popup surface.
    host.click_save();
    if !wait_for_popup_request(&host, Duration::from_secs(2)) {
        tracker_error!("Engine never requested the popup surface.");
        return ExitCode::FAILURE;
    }

    let backend = match BackendClient::new(BackendSettings {
        base_url: args.backend.clone(),
        ..BackendSettings::default()
    }) {
        Ok(backend) => backend,
        Err(err) => {
            tracker_error!("Failed to build backend client: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let state_dir = args.state_dir.unwrap_or_else(|| {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".job_tracker")
    });

    let effect_runner = EffectRunner::new(&runtime, backend, host, state_dir);
    let outcome = effect_runner.run_popup_flow(FormInput {
        sheet_url: args.sheet,
        stage: args.stage,
        priority: args.priority,
        notes: args.notes,
    });

    match outcome {
        FlowOutcome::Saved => ExitCode::SUCCESS,
        FlowOutcome::NoJobData | FlowOutcome::NeedsSignIn | FlowOutcome::NeedsSheet => {
            ExitCode::SUCCESS
        }
        FlowOutcome::SaveFailed => ExitCode::FAILURE,
    }
}

fn wait_for_popup_request(host: &TrackerHost, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Some(HostEvent::PopupRequested) = host.try_recv_event() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    false
}
