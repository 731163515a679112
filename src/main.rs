use outreach_enricher::config::AppConfig;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real deployments set the environment directly.
    let dotenv = dotenvy::dotenv();

    outreach_enricher::init_tracing();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = outreach_enricher::run(config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
