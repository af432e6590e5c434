//! Development tool: capture a full-page PNG screenshot of a URL with a
//! headless Chrome. Output lands in `screenshots/` with a timestamped name.

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
        Browser,
    },
};

const OUTPUT_DIR: &str = "screenshots";

#[tokio::main]
async fn main() {
    let mut args = env::args().skip(1);

    let Some(url) = args.next() else {
        eprintln!("Usage: bunpo-screenshot <url> [name]");
        process::exit(1);
    };
    let name = args.next().unwrap_or_else(|| "screenshot".to_string());

    if let Err(e) = run(&url, &name).await {
        eprintln!("{}", e);
        process::exit(1);
    }
}

async fn run(url: &str, name: &str) -> Result<(), BunpoError> {
    fs::create_dir_all(OUTPUT_DIR)?;

    let browser = Browser::launch()?;
    let mut page = browser.connect().await?;

    page.navigate(url).await?;
    // Give client-side rendering a moment to settle.
    tokio::time::sleep(Duration::from_secs(2)).await;

    let png = page.screenshot().await?;

    let path = Path::new(OUTPUT_DIR).join(format!("{}-{}.png", name, cdp::file_timestamp()));
    fs::write(&path, png)?;
    println!("Screenshot saved: {}", path.display());

    Ok(())
}
