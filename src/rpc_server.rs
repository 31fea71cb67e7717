//! App Shelf RPC bridge. JSON-RPC over stdin/stdout for the new-tab page host.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmark.add", "params":{"name":"...","url":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use appshelf::app::App;
use appshelf::rpc_handler::handle_method;
use appshelf::services::config_loader::{init_logging, ConfigLoader};

use serde_json::{json, Value};
use tracing::{error, info};

fn respond(out: &mut impl Write, response: &Value) -> io::Result<()> {
    writeln!(out, "{}", response)?;
    out.flush()
}

fn main() -> ExitCode {
    let mut loader = ConfigLoader::new(None);
    let config = match loader.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("appshelf-rpc: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);

    let mut app = match App::from_config(config) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "failed to open database");
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if respond(&mut out, &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")})).is_err() {
        return ExitCode::FAILURE;
    }
    info!("rpc bridge ready");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(req) => {
                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(json!({}));

                match handle_method(&mut app, method, &params) {
                    Ok(val) => json!({"id": id, "result": val}),
                    Err(err) => json!({"id": id, "error": err}),
                }
            }
            Err(e) => json!({"id": null, "error": format!("parse error: {}", e)}),
        };

        if respond(&mut out, &response).is_err() {
            break;
        }
    }

    ExitCode::SUCCESS
}
