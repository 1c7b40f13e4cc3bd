use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

mod runner;

#[derive(Debug, Parser)]
#[command(about = "WiFi scan portal: development server and page probe")]
struct Cli {
    /// TOML 配置文件；不指定时使用编译进来的默认配置
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the portal page and a simulated `/scan` endpoint.
    Serve {
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Load the network dropdown from a `/scan` endpoint and print the page.
    Probe {
        /// Device base URL, e.g. http://192.168.4.1
        #[arg(long)]
        url: Option<String>,
        /// Select this network after loading and wait for the focus handoff.
        #[arg(long)]
        select: Option<String>,
        /// Do not ask again when the first answer is empty.
        #[arg(long)]
        no_retry: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 初始化日志（这是入口点的职责）
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // 2. 调用库的核心逻辑
    if let Err(e) = run(cli).await {
        // 3. 处理顶层错误
        tracing::error!("❌ Portal failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match cli.config.as_deref() {
        Some(path) => portal_core::config::load_config(path)?,
        None => portal_core::config::default_config()?,
    };

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind_addr = bind;
            }
            runner::serve(&config.server).await
        }
        Command::Probe {
            url,
            select,
            no_retry,
        } => {
            if let Some(url) = url {
                config.portal.base_url = url;
            }
            if no_retry {
                config.portal.retry_on_empty = false;
            }
            runner::probe(&config.portal, select.as_deref()).await
        }
    }
}
