use mandiplus::cli;
use mandiplus::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("🥥 MandiPlus v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: {}", config.api_base_url);
    eprintln!("   Web: {}", config.web_base_url);
    eprintln!(
        "   Auth: {}",
        if config.auth_token.is_some() {
            "token set"
        } else {
            "anonymous"
        }
    );
    eprintln!("   Answer each question and press Enter.\n");

    cli::run(config).await?;

    Ok(())
}
