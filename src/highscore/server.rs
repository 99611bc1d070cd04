//! HTTP endpoint over the shared highscore store.
//!
//! Routes:
//!   GET  /api/ping       -> {"ok":true}
//!   GET  /api/highscore  -> current best entry
//!   POST /api/highscore  -> submit a candidate, returns the current best
//!
//! Invalid POST payloads (malformed JSON, missing fields, blank name) get a
//! 400 with a JSON error body. Unknown paths get a 404.

use std::io::Read;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::json;
use tiny_http::{Header, Method, Response, Server};

use super::store::{Highscore, SharedHighscoreStore};

#[derive(Debug, Deserialize)]
struct Candidate {
    name: String,
    score: u32,
}

/// Serve the highscore API on `addr`, blocking the calling thread
pub fn serve(store: SharedHighscoreStore, addr: &str) -> Result<()> {
    let server =
        Server::http(addr).map_err(|e| anyhow::anyhow!("failed to bind {}: {}", addr, e))?;
    println!("highscore endpoint listening on http://{}", addr);

    for mut request in server.incoming_requests() {
        let mut body = String::new();
        let _ = request.as_reader().read_to_string(&mut body);

        let (status, payload) = handle(&store, request.method(), request.url(), &body);
        println!("{} {} -> {}", request.method(), request.url(), status);

        let mut response = Response::from_string(payload.to_string()).with_status_code(status);
        if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
            response.add_header(header);
        }
        let _ = request.respond(response);
    }
    Ok(())
}

/// Route one request to a status code and JSON body
fn handle(
    store: &SharedHighscoreStore,
    method: &Method,
    url: &str,
    body: &str,
) -> (u16, serde_json::Value) {
    let path = url.split('?').next().unwrap_or(url);
    match (method, path) {
        (Method::Get, "/api/ping") => (200, json!({"ok": true})),
        (Method::Get, "/api/highscore") => match store.lock() {
            Ok(store) => (200, json!(store.best())),
            Err(_) => (500, json!({"error": "store unavailable"})),
        },
        (Method::Post, "/api/highscore") => match parse_candidate(body) {
            Ok(candidate) => match store.lock() {
                Ok(mut store) => (200, json!(store.submit(candidate))),
                Err(_) => (500, json!({"error": "store unavailable"})),
            },
            Err(e) => (400, json!({"error": e.to_string()})),
        },
        (_, "/api/ping") | (_, "/api/highscore") => (405, json!({"error": "method not allowed"})),
        _ => (404, json!({"error": "not found"})),
    }
}

fn parse_candidate(body: &str) -> Result<Highscore> {
    let candidate: Candidate = serde_json::from_str(body).context("invalid payload")?;
    if candidate.name.trim().is_empty() {
        bail!("name must not be empty");
    }
    Ok(Highscore {
        name: candidate.name,
        score: candidate.score,
    })
}
