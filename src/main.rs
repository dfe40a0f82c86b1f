use passdesk::config::database::{Database, DatabaseTrait};
use passdesk::config::settings::{Settings, StorageBackend};
use passdesk::config::{logging, parameter};
use passdesk::handler::health_handler;
use passdesk::repository::Repositories;
use passdesk::repository::memory::MemoryDatabase;
use passdesk::routes;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_file = parameter::init();
    logging::init_tracing();
    match env_file {
        Some(path) => info!("Loaded environment from {}", path.display()),
        None => info!("No .env file found, using process environment"),
    }

    logging::init();
    health_handler::init_start_time();

    let settings = match Settings::from_parameters() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    let (repositories, database) = match settings.storage_backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; all data is lost on shutdown");
            (Repositories::in_memory(&MemoryDatabase::new()), None)
        }
        StorageBackend::Postgres => {
            let database = match Database::init().await {
                Ok(database) => Arc::new(database),
                Err(e) => {
                    error!("Failed to initialize database: {}", e);
                    return Err(e.into());
                }
            };
            info!("Database connection established successfully");
            (Repositories::postgres(&database), Some(database))
        }
    };

    let app = match routes::root::routes(&settings, repositories, database) {
        Ok(router) => router,
        Err(e) => {
            error!("Failed to initialize routes: {}", e);
            return Err(e.into());
        }
    };

    let host = settings.bind_address();
    let listener = match tokio::net::TcpListener::bind(&host).await {
        Ok(listener) => {
            info!("Server successfully bound to {}", host);
            listener
        }
        Err(e) => {
            error!("Failed to bind to {}: {}", host, e);
            return Err(e.into());
        }
    };

    match axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
        Ok(()) => {
            info!("Server shutdown gracefully");
            Ok(())
        }
        Err(e) => {
            error!("Server error: {}", e);
            Err(e.into())
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal, initiating graceful shutdown..."),
        Err(e) => error!("Unable to listen for shutdown signal: {}", e),
    }
}
