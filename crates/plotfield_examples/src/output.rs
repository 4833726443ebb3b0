//! Shared output helpers for the example binaries.
use std::fs;
use std::path::Path;

/// Installs a plain fmt subscriber for the examples.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

/// Writes SVG text next to the current working directory.
pub fn write_svg(path: impl AsRef<Path>, svg: &str) -> anyhow::Result<()> {
    fs::write(path.as_ref(), svg)?;
    println!("wrote {}", path.as_ref().display());
    Ok(())
}

/// Writes binary export output (PNG, GIF).
pub fn write_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> anyhow::Result<()> {
    fs::write(path.as_ref(), bytes)?;
    println!("wrote {}", path.as_ref().display());
    Ok(())
}
