//! Host-side helper: `cargo run [port]` builds the WASM bundle into
//! `static/pkg` and serves `static/` locally for previewing the page.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::process::{Command, Stdio};

    use anyhow::{bail, Context};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port: u16 = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid port {arg:?}"))?,
        None => 8000,
    };

    log::info!("building WASM pkg");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(status) if status.success() => {}
        Ok(status) => bail!("wasm-pack exited with {status}"),
        Err(err) => log::warn!(
            "wasm-pack not runnable ({err}); serving whatever is already in static/pkg"
        ),
    }

    log::info!("serving static/ at http://127.0.0.1:{port}");
    let status = Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
        .stdout(Stdio::null())
        .status()
        .context("failed to start python3 http.server")?;
    if !status.success() {
        bail!("http server exited with {status}");
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
