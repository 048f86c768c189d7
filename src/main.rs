//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg`
//! and serves `static/` on a local port.
//!
//! The port defaults to 8000 and can be overridden with `PORT`.

use std::process::{Command, ExitCode, Stdio};
use std::env;

const DEFAULT_PORT: &str = "8000";

fn main() -> ExitCode {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return ExitCode::SUCCESS;
    }

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack build failed, see its output above");
            return ExitCode::FAILURE;
        }
        Err(_) => {
            eprintln!("could not run wasm-pack, serving whatever is already in static/pkg");
        }
    }

    let port = env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_owned());
    println!("Serving portfolio at http://127.0.0.1:{port} …");
    let server = Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status();

    match server {
        Ok(st) if st.success() => ExitCode::SUCCESS,
        Ok(st) => {
            eprintln!("http server exited with {st}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("failed to start http server: {err}");
            ExitCode::FAILURE
        }
    }
}
