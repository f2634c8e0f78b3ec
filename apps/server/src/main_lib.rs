use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Config, domain_events::TracingDomainEventSink};
use lifeos_core::{
    events::DomainEventSink,
    goals::{GoalService, GoalServiceTrait},
    library::{LibraryItemService, LibraryItemServiceTrait},
    tasks::{TaskService, TaskServiceTrait},
    utils::{Clock, SystemClock},
};
use lifeos_storage_sqlite::{db, DbPool, GoalRepository, LibraryItemRepository, TaskRepository};

pub struct AppState {
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub task_service: Arc<dyn TaskServiceTrait>,
    pub library_service: Arc<dyn LibraryItemServiceTrait>,
    pub db_pool: Arc<DbPool>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("LIFEOS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // try_init: tests may build several apps in one process.
    let result = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let (pool, writer) = db::open(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let event_sink: Arc<dyn DomainEventSink> = Arc::new(TracingDomainEventSink);

    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let task_repository = Arc::new(TaskRepository::new(pool.clone(), writer.clone()));
    let library_repository = Arc::new(LibraryItemRepository::new(pool.clone(), writer));

    let goal_service = Arc::new(
        GoalService::new(goal_repository, clock.clone()).with_event_sink(event_sink.clone()),
    );
    let task_service = Arc::new(
        TaskService::new(task_repository, clock.clone()).with_event_sink(event_sink.clone()),
    );
    let library_service = Arc::new(
        LibraryItemService::new(library_repository, clock).with_event_sink(event_sink),
    );

    Ok(Arc::new(AppState {
        goal_service,
        task_service,
        library_service,
        db_pool: pool,
        db_path: config.db_path.clone(),
    }))
}
