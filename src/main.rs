#[cfg(test)]
#[macro_use]
mod test_support;

mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod scoring;
mod services;
mod store;
mod utils;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use env_logger::Env;
use log::{info, warn};
use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::{ActivityStore, MemoryStore, PgStore};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    // Initialize the activity store
    let store: Arc<dyn ActivityStore> = match &config.database_url {
        Some(url) => Arc::new(
            PgStore::connect(url)
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string()))?,
        ),
        None => {
            warn!("DATABASE_URL not set, using in-memory store; data will not persist");
            Arc::new(MemoryStore::new())
        }
    };
    let store = web::Data::from(store);

    // Set up Prometheus metrics
    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "empowerhub".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let bind_address = config.bind_address.clone();
    let workers = config.workers;
    let config = web::Data::new(config);
    info!("Starting server at {} with {} workers", bind_address, workers);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(prometheus.clone())
            .app_data(store.clone())
            .app_data(config.clone())
            .configure(routes::configure)
    })
    .workers(workers)
    .bind(&bind_address)?
    .run()
    .await
}
