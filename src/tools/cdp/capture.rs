use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

/// Everything captured from one page session: console output, finished
/// network exchanges, and uncaught exceptions.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureLog {
    pub url: String,
    pub captured_at: String,
    pub console: Vec<ConsoleEntry>,
    pub network: Vec<NetworkEntry>,
    pub errors: Vec<ErrorEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleEntry {
    pub level: String,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEntry {
    pub url: String,
    pub method: String,
    pub status: i64,
    pub status_text: String,
    pub mime_type: String,
    /// Seconds between request send and response headers.
    pub timing: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub timestamp: String,
}

/// Requests seen but not yet answered, keyed by DevTools request id.
#[derive(Debug, Default)]
pub struct PendingRequests {
    requests: HashMap<String, PendingRequest>,
}

#[derive(Debug)]
struct PendingRequest {
    url: String,
    method: String,
    start_time: f64,
}

impl CaptureLog {
    pub fn new(url: &str) -> Self {
        Self { url: url.to_string(), captured_at: Utc::now().to_rfc3339(), ..Self::default() }
    }

    /// Folds one DevTools event into the log. Events the capture doesn't
    /// track are ignored; responses without a matching request are dropped.
    pub fn apply_event(&mut self, pending: &mut PendingRequests, event: &Value) {
        let Some(method) = event.get("method").and_then(Value::as_str) else {
            return;
        };
        let params = event.get("params").cloned().unwrap_or(Value::Null);

        match method {
            "Runtime.consoleAPICalled" => {
                let level =
                    params.get("type").and_then(Value::as_str).unwrap_or("log").to_string();
                let message = params
                    .get("args")
                    .and_then(Value::as_array)
                    .map(|args| {
                        args.iter().map(describe_remote_object).collect::<Vec<_>>().join(" ")
                    })
                    .unwrap_or_default();

                self.console.push(ConsoleEntry {
                    level,
                    message,
                    timestamp: Utc::now().to_rfc3339(),
                });
            }
            "Runtime.exceptionThrown" => {
                let details = params.get("exceptionDetails");
                let message = details
                    .and_then(|details| details.get("text"))
                    .and_then(Value::as_str)
                    .filter(|text| !text.is_empty())
                    .map(String::from)
                    .or_else(|| {
                        details
                            .and_then(|details| details.get("exception"))
                            .and_then(|exception| exception.get("description"))
                            .and_then(Value::as_str)
                            .map(String::from)
                    })
                    .unwrap_or_else(|| "Unknown exception".to_string());

                self.errors.push(ErrorEntry {
                    kind: "exception".to_string(),
                    message,
                    timestamp: Utc::now().to_rfc3339(),
                });
            }
            "Network.requestWillBeSent" => {
                let Some(request_id) = params.get("requestId").and_then(Value::as_str) else {
                    return;
                };
                let Some(request) = params.get("request") else {
                    return;
                };

                pending.requests.insert(
                    request_id.to_string(),
                    PendingRequest {
                        url: request
                            .get("url")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        method: request
                            .get("method")
                            .and_then(Value::as_str)
                            .unwrap_or("GET")
                            .to_string(),
                        start_time: params
                            .get("timestamp")
                            .and_then(Value::as_f64)
                            .unwrap_or(0.0),
                    },
                );
            }
            "Network.responseReceived" => {
                let Some(request_id) = params.get("requestId").and_then(Value::as_str) else {
                    return;
                };
                let Some(request) = pending.requests.remove(request_id) else {
                    return;
                };

                let response = params.get("response");
                let timestamp =
                    params.get("timestamp").and_then(Value::as_f64).unwrap_or(request.start_time);

                self.network.push(NetworkEntry {
                    url: request.url,
                    method: request.method,
                    status: response
                        .and_then(|response| response.get("status"))
                        .and_then(Value::as_i64)
                        .unwrap_or(0),
                    status_text: response
                        .and_then(|response| response.get("statusText"))
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    mime_type: response
                        .and_then(|response| response.get("mimeType"))
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    timing: timestamp - request.start_time,
                });
            }
            _ => {}
        }
    }
}

fn describe_remote_object(object: &Value) -> String {
    if let Some(value) = object.get("value") {
        return match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
    }
    object.get("description").and_then(Value::as_str).unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fresh() -> (CaptureLog, PendingRequests) {
        (CaptureLog::new("http://localhost:3000"), PendingRequests::default())
    }

    #[test]
    fn console_events_join_their_arguments() {
        let (mut log, mut pending) = fresh();

        log.apply_event(
            &mut pending,
            &json!({
                "method": "Runtime.consoleAPICalled",
                "params": {
                    "type": "warning",
                    "args": [
                        { "type": "string", "value": "count:" },
                        { "type": "number", "value": 3 },
                        { "type": "object", "description": "Window" }
                    ]
                }
            }),
        );

        assert_eq!(log.console.len(), 1);
        assert_eq!(log.console[0].level, "warning");
        assert_eq!(log.console[0].message, "count: 3 Window");
    }

    #[test]
    fn exceptions_prefer_text_then_description() {
        let (mut log, mut pending) = fresh();

        log.apply_event(
            &mut pending,
            &json!({
                "method": "Runtime.exceptionThrown",
                "params": { "exceptionDetails": { "text": "Uncaught" } }
            }),
        );
        log.apply_event(
            &mut pending,
            &json!({
                "method": "Runtime.exceptionThrown",
                "params": {
                    "exceptionDetails": {
                        "text": "",
                        "exception": { "description": "TypeError: x is undefined" }
                    }
                }
            }),
        );

        assert_eq!(log.errors.len(), 2);
        assert_eq!(log.errors[0].message, "Uncaught");
        assert_eq!(log.errors[1].message, "TypeError: x is undefined");
        assert_eq!(log.errors[0].kind, "exception");
    }

    #[test]
    fn responses_pair_with_their_request() {
        let (mut log, mut pending) = fresh();

        log.apply_event(
            &mut pending,
            &json!({
                "method": "Network.requestWillBeSent",
                "params": {
                    "requestId": "1",
                    "timestamp": 10.0,
                    "request": { "url": "http://localhost:3000/api", "method": "POST" }
                }
            }),
        );
        log.apply_event(
            &mut pending,
            &json!({
                "method": "Network.responseReceived",
                "params": {
                    "requestId": "1",
                    "timestamp": 10.25,
                    "response": {
                        "status": 200,
                        "statusText": "OK",
                        "mimeType": "application/json"
                    }
                }
            }),
        );

        assert_eq!(log.network.len(), 1);
        let entry = &log.network[0];
        assert_eq!(entry.url, "http://localhost:3000/api");
        assert_eq!(entry.method, "POST");
        assert_eq!(entry.status, 200);
        assert!((entry.timing - 0.25).abs() < 1e-9);
    }

    #[test]
    fn unmatched_responses_and_unknown_events_are_ignored() {
        let (mut log, mut pending) = fresh();

        log.apply_event(
            &mut pending,
            &json!({
                "method": "Network.responseReceived",
                "params": { "requestId": "nope", "response": { "status": 200 } }
            }),
        );
        log.apply_event(&mut pending, &json!({ "method": "Page.loadEventFired", "params": {} }));
        log.apply_event(&mut pending, &json!({ "id": 7, "result": {} }));

        assert!(log.network.is_empty());
        assert!(log.console.is_empty());
        assert!(log.errors.is_empty());
    }

    #[test]
    fn log_serializes_with_camel_case_keys() {
        let (mut log, _) = fresh();
        log.network.push(NetworkEntry {
            url: "http://localhost:3000".to_string(),
            method: "GET".to_string(),
            status: 304,
            status_text: "Not Modified".to_string(),
            mime_type: "text/html".to_string(),
            timing: 0.1,
        });

        log.errors.push(ErrorEntry {
            kind: "exception".to_string(),
            message: "boom".to_string(),
            timestamp: "2026-08-07T00:00:00Z".to_string(),
        });

        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("\"capturedAt\""));
        assert!(json.contains("\"statusText\""));
        assert!(json.contains("\"mimeType\""));
        assert!(json.contains("\"type\":\"exception\""));
        assert!(!json.contains("\"kind\""));
    }
}
