use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use docanalyzer::application::services::{AnalysisPipeline, PipelineController};
use docanalyzer::infrastructure::attachments::AttachmentRecorderFactory;
use docanalyzer::infrastructure::llm::AzureOpenAiClient;
use docanalyzer::infrastructure::observability::init_tracing;
use docanalyzer::infrastructure::text_processing::AzureDocIntelAdapter;
use docanalyzer::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&settings.tracing_config(environment), settings.server.port);

    let retry = settings.retry.policy();
    let attachments = AttachmentRecorderFactory::create(&settings.attachments, retry)
        .context("Failed to configure attachment store")?;
    let extraction = Arc::new(AzureDocIntelAdapter::new(retry));
    let llm = Arc::new(AzureOpenAiClient::new(retry));

    let pipeline = Arc::new(AnalysisPipeline::new(attachments, extraction, llm));
    let controller = PipelineController::new(pipeline);

    let analyzer_config = settings.analyzer_config();
    if !analyzer_config.has_language_model() {
        tracing::warn!("Language model endpoint or key missing, analysis runs will fail");
    }
    if !analyzer_config.has_extraction_service() {
        tracing::warn!("Extraction service not configured, images go to vision mode");
    }

    let state = AppState::new(controller, analyzer_config);
    let router = create_router(state, settings.upload.body_limit_bytes());

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
