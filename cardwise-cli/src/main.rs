//! cardwise CLI: run the recommendation API server or seed the card index.
//! Config comes from env (.env is loaded first) with optional CLI overrides.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use cardwise_core::render::card_to_text;
use cardwise_core::types::Card;
use cardwise_core::{
    ChatOrchestrator, PreferenceExtractor, ReasonGenerator, Recommender, RewardSimulator,
    SessionStore,
};
use cardwise_server::AppState;
use clap::{Parser, Subcommand};
use embedding::{EmbeddingService, EnvEmbeddingConfig};
use llm_client::{EnvLlmConfig, LlmClient};
use vector_index::{IndexRecord, PineconeConfig, PineconeIndex, VectorIndex};

mod config;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "cardwise")]
#[command(about = "Credit card recommendation backend: serve, seed", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (config from env; addr can override CARDWISE_ADDR).
    Serve {
        #[arg(short, long)]
        addr: Option<String>,
    },
    /// Embed cards from a JSON file and upsert them into the vector index.
    Seed {
        #[arg(short, long, default_value = "data/cards.json")]
        file: PathBuf,
        #[arg(short, long, default_value = "32")]
        batch_size: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    cardwise_core::logger::init_tracing(&config.log_file)?;

    match cli.command {
        Commands::Serve { addr } => handle_serve(config, addr).await,
        Commands::Seed { file, batch_size } => handle_seed(file, batch_size).await,
    }
}

async fn handle_serve(config: AppConfig, addr_override: Option<String>) -> Result<()> {
    let llm_config = EnvLlmConfig::from_env()?;
    let embedding_config = EnvEmbeddingConfig::from_env()?;
    embedding_config.validate()?;

    let llm: Arc<dyn LlmClient> = Arc::new(llm_config.build_client());
    let embeddings: Arc<dyn EmbeddingService> = Arc::new(embedding_config.build_service());
    let index: Arc<dyn VectorIndex> = Arc::new(PineconeIndex::new(PineconeConfig::from_env()?));
    let store = Arc::new(SessionStore::with_file(&config.sessions_file));

    let extractor = PreferenceExtractor::new(llm.clone());
    let recommender = Recommender::new(
        extractor.clone(),
        embeddings,
        index,
        RewardSimulator::new(llm.clone()),
        ReasonGenerator::new(llm.clone()),
    );
    let state = Arc::new(AppState {
        store: store.clone(),
        chat: ChatOrchestrator::new(llm, store),
        extractor,
        recommender,
    });

    let addr = addr_override.unwrap_or(config.addr);
    let addr = addr
        .parse()
        .with_context(|| format!("invalid listen address: {addr}"))?;
    cardwise_server::serve(addr, state).await
}

async fn handle_seed(file: PathBuf, batch_size: usize) -> Result<()> {
    let embedding_config = EnvEmbeddingConfig::from_env()?;
    embedding_config.validate()?;
    let embeddings = embedding_config.build_service();
    let index = PineconeIndex::new(PineconeConfig::from_env()?);

    let contents = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let cards: Vec<Card> =
        serde_json::from_str(&contents).context("cards file is not a JSON array of cards")?;

    tracing::info!(count = cards.len(), file = %file.display(), "seeding cards");

    let mut seeded = 0usize;
    for chunk in cards.chunks(batch_size.max(1)) {
        let texts: Vec<String> = chunk.iter().map(card_to_text).collect();
        let vectors = embeddings.embed_batch(&texts).await?;

        let records = chunk
            .iter()
            .zip(vectors)
            .map(|(card, values)| {
                Ok(IndexRecord {
                    id: card.name.to_lowercase().replace(' ', "_"),
                    values,
                    metadata: serde_json::to_value(card)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        index.upsert(records).await?;
        seeded += chunk.len();
        tracing::info!(seeded, "upserted batch");
    }

    tracing::info!(seeded, "seeding complete");
    Ok(())
}
