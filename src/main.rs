use std::io::Error;
use std::sync::Arc;

use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;
use tokio::main;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    application::{
        handlers::dispatch_cycle::DispatchCycleHandler,
        services::{
            generator::MessageGenerator,
            queue::{MessageQueue, QueuePolicy},
            rotation::TargetRotation,
            scheduler::DispatchScheduler,
            settings::SettingsStore,
        },
        usecases::{
            add_recipient::AddRecipientUseCase, get_dashboard::GetDashboardUseCase,
            get_settings::GetSettingsUseCase, list_dispatches::ListDispatchesUseCase,
            list_recipients::ListRecipientsUseCase, remove_recipient::RemoveRecipientUseCase,
            update_run_config::UpdateRunConfigUseCase,
        },
    },
    config::Config,
    infrastructure::{
        generation::{gemini::GeminiGenerator, placeholder::PlaceholderGenerator},
        messaging::dry_run::DryRunSubmitter,
        repositories::{
            in_memory::InMemoryDispatchLogRepository, json_file::JsonFileSettingsRepository,
        },
    },
    presentation::http::endpoints::{
        dispatches::DispatchesEndpoints,
        health::HealthEndpoints,
        recipients::RecipientsEndpoints,
        root::ApiState,
        run::RunEndpoints,
        settings::SettingsEndpoints,
    },
};

mod application;
mod config;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;

#[main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::try_parse().map_err(Error::other)?;

    let settings = Arc::new(
        SettingsStore::load(Arc::new(JsonFileSettingsRepository::new(&config.state_path)))
            .await
            .map_err(Error::other)?,
    );

    let generator: Arc<dyn MessageGenerator> = match GeminiGenerator::new(
        config.gemini.api_key,
        config.gemini.model,
        config.gemini.base_url,
    ) {
        Ok(gemini) => Arc::new(gemini),
        Err(err) => {
            warn!(error = %err, "generation disabled, queue will carry a placeholder");
            Arc::new(PlaceholderGenerator)
        }
    };

    let queue = Arc::new(MessageQueue::new(
        generator,
        settings.clone(),
        QueuePolicy {
            low_water: config.queue.low_water,
            refill_batch: config.queue.refill_batch,
            seed_batch: config.queue.seed_batch,
        },
    ));
    let rotation = Arc::new(TargetRotation::new());
    let log = Arc::new(InMemoryDispatchLogRepository::new(
        config.dispatch_log_capacity,
    ));
    let cycle = Arc::new(DispatchCycleHandler::new(
        settings.clone(),
        rotation.clone(),
        queue.clone(),
        log.clone(),
        Arc::new(DryRunSubmitter),
    ));
    let scheduler = Arc::new(DispatchScheduler::new(
        settings.clone(),
        queue.clone(),
        rotation,
        log.clone(),
        cycle,
    ));
    scheduler.resume().await.map_err(Error::other)?;

    let state = Arc::new(ApiState {
        add_recipient_usecase: Arc::new(AddRecipientUseCase::new(settings.clone())),
        remove_recipient_usecase: Arc::new(RemoveRecipientUseCase::new(
            settings.clone(),
            scheduler.clone(),
        )),
        list_recipients_usecase: Arc::new(ListRecipientsUseCase::new(settings.clone())),
        get_settings_usecase: Arc::new(GetSettingsUseCase::new(settings.clone())),
        update_run_config_usecase: Arc::new(UpdateRunConfigUseCase::new(settings.clone())),
        get_dashboard_usecase: Arc::new(GetDashboardUseCase::new(
            settings.clone(),
            scheduler.clone(),
            queue,
        )),
        list_dispatches_usecase: Arc::new(ListDispatchesUseCase::new(log)),
        scheduler,
    });

    let server_url = format!("{}://{}:{}", config.scheme, config.host, config.port);

    info!(%server_url, "starting server");

    let api_service = OpenApiService::new(
        (
            HealthEndpoints::new(state.clone()),
            RecipientsEndpoints::new(state.clone()),
            SettingsEndpoints::new(state.clone()),
            RunEndpoints::new(state.clone()),
            DispatchesEndpoints::new(state),
        ),
        "Wave API",
        "0.1.0",
    )
    .server(format!("{}/api", server_url));
    let ui = api_service.swagger_ui();
    let app = Route::new().nest("/api", api_service).nest("/", ui);

    Server::new(TcpListener::bind(format!("{}:{}", config.host, config.port)))
        .run(app)
        .await
}
