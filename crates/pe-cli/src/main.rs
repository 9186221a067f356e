use std::io::Write;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let matches = pe_cli::command().get_matches();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    pe_cli::run(&matches, &mut out).await?;
    out.flush()?;
    Ok(())
}
