//! Chrome DevTools Protocol plumbing for the development capture tools.
//! Launches a headless Chrome, attaches to its first page target over a
//! websocket, and speaks the id/method/params command protocol.

pub mod capture;

use std::{
    collections::VecDeque,
    process::{
        Child,
        Command,
        Stdio,
    },
    time::Duration,
};

use base64::Engine;
use futures_util::{
    SinkExt,
    StreamExt,
};
use serde::Deserialize;
use serde_json::{
    json,
    Value,
};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async,
    tungstenite::Message,
    MaybeTlsStream,
    WebSocketStream,
};

use crate::core::BunpoError;

const CHROME_CANDIDATES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",
];

fn find_chrome() -> Option<String> {
    if let Ok(path) = std::env::var("CHROME_PATH") {
        if !path.is_empty() {
            return Some(path);
        }
    }

    CHROME_CANDIDATES
        .iter()
        .find(|candidate| {
            Command::new(candidate)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .is_ok()
        })
        .map(|candidate| candidate.to_string())
}

fn free_port() -> Result<u16, BunpoError> {
    let listener = std::net::TcpListener::bind(("127.0.0.1", 0))?;
    Ok(listener.local_addr()?.port())
}

#[derive(Deserialize)]
struct Target {
    #[serde(rename = "type")]
    target_type: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    web_socket_debugger_url: Option<String>,
}

/// A headless Chrome child process with remote debugging enabled. The
/// process is killed when the handle drops.
pub struct Browser {
    child: Child,
    port: u16,
}

impl Browser {
    pub fn launch() -> Result<Self, BunpoError> {
        let binary = find_chrome().ok_or_else(|| {
            BunpoError::Custom(
                "No Chrome or Chromium binary found. Install one (google-chrome, chromium) \
                 or set CHROME_PATH."
                    .to_string(),
            )
        })?;

        let port = free_port()?;
        let child = Command::new(&binary)
            .args([
                "--headless",
                "--disable-gpu",
                &format!("--remote-debugging-port={}", port),
                "--window-size=1920,1080",
                "about:blank",
            ])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        Ok(Self { child, port })
    }

    /// Attaches to the first page target. The debugging endpoint takes a
    /// moment to come up after launch, so this polls before giving up.
    pub async fn connect(&self) -> Result<Page, BunpoError> {
        let endpoint = format!("http://127.0.0.1:{}/json/list", self.port);

        let mut targets: Vec<Target> = Vec::new();
        for _ in 0..50 {
            if let Ok(response) = reqwest::get(&endpoint).await {
                if let Ok(list) = response.json::<Vec<Target>>().await {
                    if !list.is_empty() {
                        targets = list;
                        break;
                    }
                }
            }
            tokio::time::sleep(Duration::from_millis(200)).await;
        }

        let ws_url = targets
            .into_iter()
            .find(|target| target.target_type == "page")
            .and_then(|target| target.web_socket_debugger_url)
            .ok_or_else(|| BunpoError::Custom("Chrome exposed no debuggable page".to_string()))?;

        let (stream, _) = connect_async(ws_url.as_str()).await?;
        Ok(Page { stream, next_id: 0, pending_events: VecDeque::new() })
    }
}

impl Drop for Browser {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// One attached page target. Commands and events share the websocket;
/// events that arrive while waiting for a command response are buffered.
pub struct Page {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    next_id: u64,
    pending_events: VecDeque<Value>,
}

impl Page {
    pub async fn command(&mut self, method: &str, params: Value) -> Result<Value, BunpoError> {
        self.next_id += 1;
        let id = self.next_id;

        let payload = json!({ "id": id, "method": method, "params": params });
        self.stream.send(Message::Text(payload.to_string().into())).await?;

        loop {
            let message = match self.stream.next().await {
                Some(message) => message?,
                None => return Err(BunpoError::Custom("DevTools connection closed".to_string())),
            };

            let Message::Text(text) = message else {
                continue;
            };
            let value: Value = serde_json::from_str(text.as_str())?;

            if value.get("id").and_then(Value::as_u64) == Some(id) {
                if let Some(error) = value.get("error") {
                    return Err(BunpoError::Custom(format!("{} failed: {}", method, error)));
                }
                return Ok(value.get("result").cloned().unwrap_or(Value::Null));
            }

            if value.get("method").is_some() {
                self.pending_events.push_back(value);
            }
        }
    }

    /// Next protocol event, or `None` once `timeout` passes.
    pub async fn next_event(&mut self, timeout: Duration) -> Option<Value> {
        if let Some(event) = self.pending_events.pop_front() {
            return Some(event);
        }

        match tokio::time::timeout(timeout, self.stream.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => serde_json::from_str(text.as_str()).ok(),
            _ => None,
        }
    }

    pub async fn wait_for_event(&mut self, method: &str, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return false;
            }

            match self.next_event(remaining).await {
                Some(event)
                    if event.get("method").and_then(Value::as_str) == Some(method) =>
                {
                    return true;
                }
                Some(_) => continue,
                None => return false,
            }
        }
    }

    pub async fn navigate(&mut self, url: &str) -> Result<(), BunpoError> {
        self.command("Page.enable", json!({})).await?;
        self.command("Page.navigate", json!({ "url": url })).await?;

        if !self.wait_for_event("Page.loadEventFired", Duration::from_secs(15)).await {
            eprintln!("Timed out waiting for the page load event; continuing anyway.");
        }
        Ok(())
    }

    pub async fn screenshot(&mut self) -> Result<Vec<u8>, BunpoError> {
        let result = self
            .command(
                "Page.captureScreenshot",
                json!({ "format": "png", "captureBeyondViewport": true }),
            )
            .await?;

        let data = result
            .get("data")
            .and_then(Value::as_str)
            .ok_or_else(|| BunpoError::Custom("Screenshot response had no data".to_string()))?;

        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| BunpoError::Custom(format!("Invalid screenshot payload: {}", e)))
    }
}

/// Filesystem-safe UTC timestamp for output filenames.
pub fn file_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ").to_string()
}
