use clap::Parser;

#[derive(Parser)]
#[command(name = "backroom", about = "backroom — terminal product-catalog admin")]
struct Cli {
    /// Write debug logs to /tmp/backroom-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Override the catalog API base URL from config.toml.
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/backroom-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("backroom debug log started — tail -f /tmp/backroom-debug.log");
    }

    // The UI loop owns the main thread; network tasks run on this runtime.
    let runtime = tokio::runtime::Runtime::new()?;
    backroom_tui::run(runtime.handle().clone(), cli.base_url)
}
