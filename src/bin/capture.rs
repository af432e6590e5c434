//! Development tool: load a URL in a headless Chrome and record console
//! output, network exchanges, and uncaught exceptions for a fixed window.
//! Output lands in `logs/` as a timestamped JSON file.

use std::{
    env,
    fs,
    path::Path,
    process,
    time::Duration,
};

use bunpo100::{
    core::BunpoError,
    tools::cdp::{
        self,
        capture::{
            CaptureLog,
            PendingRequests,
        },
        Browser,
    },
};

const OUTPUT_DIR: &str = "logs";
const DEFAULT_SECONDS: u64 = 10;

#[tokio::main]
async fn main() {
    let mut args = env::args().skip(1);

    let Some(url) = args.next() else {
        eprintln!("Usage: bunpo-capture <url> [seconds]");
        process::exit(1);
    };

    let seconds = match args.next() {
        Some(raw) => match raw.parse::<u64>() {
            Ok(seconds) if seconds > 0 => seconds,
            _ => {
                eprintln!("Usage: bunpo-capture <url> [seconds]");
                process::exit(1);
            }
        },
        None => DEFAULT_SECONDS,
    };

    if let Err(e) = run(&url, Duration::from_secs(seconds)).await {
        eprintln!("{}", e);
        process::exit(1);
    }
}

async fn run(url: &str, duration: Duration) -> Result<(), BunpoError> {
    fs::create_dir_all(OUTPUT_DIR)?;

    let browser = Browser::launch()?;
    let mut page = browser.connect().await?;

    for method in ["Page.enable", "Runtime.enable", "Network.enable", "Log.enable"] {
        page.command(method, serde_json::json!({})).await?;
    }
    page.command("Page.navigate", serde_json::json!({ "url": url })).await?;

    let mut log = CaptureLog::new(url);
    let mut pending = PendingRequests::default();
    let deadline = tokio::time::Instant::now() + duration;

    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        if remaining.is_zero() {
            break;
        }
        if let Some(event) = page.next_event(remaining).await {
            log.apply_event(&mut pending, &event);
        }
    }

    let path =
        Path::new(OUTPUT_DIR).join(format!("console-network-{}.json", cdp::file_timestamp()));
    fs::write(&path, serde_json::to_string_pretty(&log)?)?;
    println!(
        "Capture saved: {} ({} console, {} network, {} errors)",
        path.display(),
        log.console.len(),
        log.network.len(),
        log.errors.len()
    );

    Ok(())
}
