//! Compliance chatbot server binary
//!
//! Run with: cargo run -p compliance-rag --bin compliance-rag-server

use std::sync::Arc;

use compliance_rag::{
    config::{LlmBackend, RagConfig},
    conversation::ConversationState,
    ingestion::PdfLoader,
    providers::{self, OllamaClient},
    retrieval::VectorIndex,
    server::RagServer,
    ChatService,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "compliance_rag=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RagConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - PDF folder: {}", config.corpus.pdf_folder.display());
    tracing::info!("  - Backend: {:?} at {}", config.llm.backend, config.llm.base_url);
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - LLM model: {}", config.llm.generate_model);
    tracing::info!("  - Retrieval top_k: {}", config.retrieval.top_k);

    if config.llm.backend == LlmBackend::Ollama {
        let ollama = OllamaClient::new(&config.llm)?;
        if ollama.health_check().await {
            tracing::info!("Ollama is running");
        } else {
            tracing::warn!("Ollama not available at {}", config.llm.base_url);
            tracing::warn!(
                "  Pull models: ollama pull {} && ollama pull {}",
                config.llm.embed_model,
                config.llm.generate_model
            );
        }
    }

    // PDF parsing is blocking work
    let loader = PdfLoader::from_config(&config.corpus);
    let documents = tokio::task::spawn_blocking(move || loader.load()).await??;

    let (embedder, llm) = providers::from_config(&config.llm)?;

    let index = VectorIndex::from_documents(
        documents,
        embedder.as_ref(),
        config.embeddings.batch_size,
        config.embeddings.parallel_batches,
    )
    .await?;

    let engine = Arc::new(index).as_query_engine(embedder, llm, config.retrieval.top_k);
    let chat = ChatService::new(Arc::new(engine), Arc::new(ConversationState::new()));

    let server = RagServer::new(config, chat);

    println!("\nServer starting...");
    println!("  Chat UI: http://{}/", server.address());
    println!("  Ask:     POST http://{}/ask", server.address());
    println!("  Health:  http://{}/health", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
