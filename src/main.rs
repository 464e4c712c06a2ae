use anyhow::Context;
use clap::Parser;
use product_api::config::cli::Backend;
use product_api::utils::{logger, validation::Validate};
use product_api::{CliConfig, Dispatcher, InMemoryStore, ProductStore, Record, ServiceConfig};
use std::path::Path;
use std::sync::Arc;

async fn load_seed(store: &InMemoryStore, path: &Path) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading seed file {}", path.display()))?;
    let records: Vec<Record> = serde_json::from_str(&content)
        .with_context(|| format!("parsing seed file {}", path.display()))?;

    tracing::info!("Seeding {} products from {}", records.len(), path.display());
    store.seed(records).await;
    Ok(())
}

async fn build_store(
    cli: &CliConfig,
    config: &ServiceConfig,
) -> anyhow::Result<Arc<dyn ProductStore>> {
    match cli.backend {
        Backend::Memory => {
            let store = match config.scan_page_size {
                Some(page_size) => InMemoryStore::with_page_size(page_size),
                None => InMemoryStore::new(),
            };
            if let Some(seed) = &cli.seed {
                load_seed(&store, seed).await?;
            }
            Ok(Arc::new(store))
        }
        #[cfg(feature = "dynamodb")]
        Backend::Dynamodb => {
            let store = product_api::DynamoDbStore::from_config(config).await;
            tracing::info!("Using DynamoDB table {} in {}", store.table_name(), config.region);
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "dynamodb"))]
        Backend::Dynamodb => {
            anyhow::bail!("the dynamodb backend requires building with --features dynamodb")
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.service_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let request = match cli.request() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let store = match build_store(&cli, &config).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    let dispatcher = Dispatcher::new(store);
    let response = dispatcher.dispatch(&request).await;

    println!("{}", serde_json::to_string_pretty(&response)?);

    let exit_code = match response.status_code() {
        status if status >= 500 => 3,
        status if status >= 400 => 2,
        _ => 0,
    };
    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
