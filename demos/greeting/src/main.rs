use apiforge::runtime_config::RuntimeConfig;
use apiforge::server::HttpServer;
use clap::Parser;
use greeting::build_service;
use greeting::store::GreetingStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "greeting", about = "Self-documenting greeting service")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: String,

    /// Directory with the documentation viewer assets, served at /docs
    #[arg(long)]
    docs_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = RuntimeConfig::from_env();
    may::config().set_stack_size(config.stack_size);

    let store = Arc::new(GreetingStore::new());
    store.insert(Some("hello".to_string()));
    store.insert(Some("bonjour".to_string()));

    let service = build_service(store, args.docs_dir)?;
    let handle = HttpServer(service).start(&args.addr)?;
    info!(addr = %args.addr, "greeting service listening");

    handle
        .join()
        .map_err(|_| anyhow::anyhow!("server coroutine panicked"))?;
    Ok(())
}
