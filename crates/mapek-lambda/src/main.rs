use tracing_subscriber::EnvFilter;

use mapek_engine::AdaptationEngine;
use mapek_lambda::config::{self, RulesFile, ServiceConfig, StoreKind};
use mapek_lambda::router;
use mapek_lambda::state::AppState;
use mapek_storage::{client, AdaptationStore, MemoryStore, S3Store};

fn build_state<S: AdaptationStore>(store: S, rules_file: RulesFile) -> AppState<S> {
    let engine = AdaptationEngine::new(store)
        .with_rules(rules_file.rules)
        .with_specialty_defaults(rules_file.specialties);
    AppState::new(engine)
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServiceConfig::from_env()?;
    let rules_file = match &config.rules_path {
        Some(path) => config::load_rules(path)?,
        None => RulesFile::default(),
    };

    let app = match config.store {
        StoreKind::S3 => {
            let s3 = client::s3_client(config.region.as_deref()).await;
            tracing::info!(bucket = %config.bucket, "using S3 store");
            router(build_state(S3Store::new(s3, config.bucket), rules_file))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; events and plans are lost on restart");
            router(build_state(MemoryStore::new(), rules_file))
        }
    };

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
