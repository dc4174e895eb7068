use std::sync::Arc;

use anyhow::Context;

use support_triage::config::{ServerConfig, TriageConfig};
use support_triage::server;
use support_triage::triage::TriageEngine;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let triage_config = TriageConfig::from_env().context("invalid triage configuration")?;
    let server_config = ServerConfig::from_env().context("invalid server configuration")?;

    // The HTTP sentiment client is blocking, so it is built before the runtime starts.
    let provider = triage_config
        .build_provider()
        .context("failed to initialize sentiment provider")?;

    eprintln!("📬 Support Triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Sentiment: {:?}", triage_config.sentiment_strategy);
    eprintln!("   Lexicon: {:?}", triage_config.lexicon_profile);
    eprintln!("   Replies: {:?}", triage_config.reply_template);
    eprintln!("   Listening: http://{}\n", server_config.bind_addr());

    let engine = Arc::new(TriageEngine::from_config(&triage_config, provider));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(server::serve(&server_config, Arc::clone(&engine)))?;

    // Shut the runtime down before the last engine handle (and its blocking client) drops.
    drop(runtime);
    drop(engine);
    Ok(())
}
