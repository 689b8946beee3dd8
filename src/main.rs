use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use movies_info_service::{
    http, logging, FileStore, InMemoryStore, MovieInfoService, RecordStore, ServiceConfig,
    StoreKind,
};

#[tokio::main]
async fn main() {
    let config = ServiceConfig::parse();
    logging::init(config.log_filter.as_deref());

    if let Err(e) = run(config).await {
        error!(error = %e, "movies-info-service exited with an error");
        std::process::exit(1);
    }
}

async fn run(config: ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    info!(addr = %config.addr, store = ?config.store, "starting movies-info-service");

    match config.store {
        StoreKind::Memory => serve(InMemoryStore::new(), &config.addr).await,
        StoreKind::File => {
            let store = FileStore::open(&config.data_file).await?;
            serve(store, &config.addr).await
        }
    }
}

async fn serve<S: RecordStore>(store: S, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let service = Arc::new(MovieInfoService::new(store));
    http::serve(service, addr).await?;
    info!("movies-info-service stopped");
    Ok(())
}
