//! Line-delimited JSON analysis server.
//!
//! The editor integration keeps a local connection open and writes one JSON
//! request per line: `{"language": "python", "source": "...", "file": "..."}`.
//! Each request is answered with one line: the `AnalysisResult` (plus a
//! `status` field) on success, or `{"status": "error", "message": ...}` when
//! the request itself is malformed.
//!
//! Debouncing edits and discarding superseded responses is the client's job;
//! the server stays stateless and answers every request it reads.

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::detect::{self, AnalysisResult};

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    language: String,
    source: String,
    #[serde(default)]
    file: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    status: &'static str,
    #[serde(flatten)]
    result: AnalysisResult,
}

pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Bind to localhost on the given port. Port 0 picks a free port.
    pub fn bind(port: u16) -> Result<Self> {
        let address = format!("127.0.0.1:{}", port);
        let listener =
            TcpListener::bind(&address).with_context(|| format!("failed to bind to {}", address))?;
        Ok(Self { listener })
    }

    /// The address actually bound.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever, one thread per client.
    pub fn run(&self) -> Result<()> {
        eprintln!("[loopcheck] listening on {}", self.local_addr()?);

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    thread::spawn(move || {
                        if let Err(e) = handle_connection(stream) {
                            eprintln!("[loopcheck] connection error: {}", e);
                        }
                    });
                }
                Err(e) => eprintln!("[loopcheck] accept error: {}", e),
            }
        }

        Ok(())
    }
}

fn handle_connection(mut stream: TcpStream) -> Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break; // Connection closed
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = respond(trimmed);
        stream.write_all(serde_json::to_string(&response)?.as_bytes())?;
        stream.write_all(b"\n")?;
    }

    Ok(())
}

/// Build the response value for one request line.
fn respond(request: &str) -> serde_json::Value {
    let req: AnalyzeRequest = match serde_json::from_str(request) {
        Ok(r) => r,
        Err(e) => {
            return json!({
                "status": "error",
                "message": format!("invalid request: {}", e),
            })
        }
    };

    let file = req.file.as_deref().unwrap_or("untitled");
    match detect::analyze(&req.source, &req.language) {
        Ok(result) => {
            let status = if !result.has_verdict {
                "waiting"
            } else if result.is_safe() {
                "safe"
            } else {
                "danger"
            };
            eprintln!(
                "[loopcheck] {}: {} ({} loops, {:.1}ms)",
                file, status, result.loops_examined, result.total_duration_ms
            );
            serde_json::to_value(AnalyzeResponse { status, result })
                .unwrap_or_else(|e| json!({ "status": "error", "message": e.to_string() }))
        }
        Err(e) => json!({
            "status": "error",
            "message": e.to_string(),
        }),
    }
}
