use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use chapterize_api::application::ports::{Chapterizer, StagingStore, TaskStore};
use chapterize_api::application::services::{ChapterizeWorker, TaskService};
use chapterize_api::infrastructure::chapterizer::ChapterizerFactory;
use chapterize_api::infrastructure::observability::{TracingConfig, init_tracing};
use chapterize_api::infrastructure::persistence::InMemoryTaskStore;
use chapterize_api::infrastructure::storage::LocalStagingStore;
use chapterize_api::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (environment, settings) = Settings::load().context("Failed to load settings")?;
    let addr = settings.bind_address();

    let tracing_config = TracingConfig::new(
        environment.as_str(),
        settings.logging.enable_json,
        settings.logging.level.clone(),
    );
    init_tracing(&tracing_config, &addr);

    let chapterizer: Arc<dyn Chapterizer> = ChapterizerFactory::create(&settings.chapterizer)
        .context("Failed to create chapterizer")?;
    let task_store: Arc<dyn TaskStore> = Arc::new(InMemoryTaskStore::new());
    let staging_store: Arc<dyn StagingStore> = Arc::new(
        LocalStagingStore::new(settings.storage.work_dir.clone())
            .context("Failed to prepare working directory root")?,
    );

    let (sender, receiver) = mpsc::channel(settings.worker.queue_capacity.max(1));
    let worker = ChapterizeWorker::new(receiver, Arc::clone(&chapterizer), Arc::clone(&task_store));
    tokio::spawn(worker.run());

    let task_service = Arc::new(TaskService::new(
        task_store,
        staging_store,
        chapterizer,
        sender,
    ));

    let state = AppState {
        task_service,
        settings,
    };
    let router = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
