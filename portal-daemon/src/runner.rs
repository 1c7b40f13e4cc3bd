use anyhow::{Context, anyhow};
use portal_core::{
    config::{PortalConfig, ServerConfig},
    controller::{ControllerOptions, PageController, ScanOutcome},
    factory,
    page::HeadlessPage,
    scan_client::HttpScanSource,
    web_server,
};
use std::sync::Arc;

/// 启动开发服务器（模拟设备的 /scan 和配网页面）
pub async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    tracing::info!("📡 Runner: Starting development server...");
    let backend = factory::create_backend(config);
    let frontend = factory::create_frontend(config);
    web_server::run_server(config.bind_addr, backend, frontend).await?;
    Ok(())
}

/// 在无头页面上跑一遍页面控制器，并打印结果
pub async fn probe(config: &PortalConfig, select: Option<&str>) -> anyhow::Result<()> {
    let source = HttpScanSource::from_config(config).context("Failed to build scan client")?;
    tracing::info!("📡 Runner: Probing {}", source.url());

    let page = Arc::new(HeadlessPage::new());
    let controller = Arc::new(PageController::new(
        Arc::new(source),
        page.clone(),
        page.clone(),
        ControllerOptions::from(config),
    ));
    let changes = page
        .take_selection_changes()
        .context("Selection events already taken")?;
    let handoff = controller.spawn_focus_handoff(changes);

    let outcome = controller.load().await;
    let (rendered, result) = settle(&page, outcome, select, config).await;
    handoff.abort();

    // 无论结果如何都先把页面打印出来，方便看到扫描到了哪些网络
    print!("{}", rendered);
    result
}

/// 完成可选的网络选择，返回渲染后的页面和最终结果
async fn settle(
    page: &HeadlessPage,
    outcome: ScanOutcome,
    select: Option<&str>,
    config: &PortalConfig,
) -> (String, anyhow::Result<()>) {
    let result = match (outcome, select) {
        (ScanOutcome::Failed, _) => Err(anyhow!(
            "could not fetch the scan list from {}",
            config.base_url
        )),
        (ScanOutcome::NoNetworks, Some(_)) => {
            Err(anyhow!("no networks discovered, nothing to select"))
        }
        (ScanOutcome::Listed(_), Some(ssid)) => match page.select_network(ssid) {
            Ok(()) => {
                // 等待焦点切换到密码框
                tokio::time::sleep(config.focus_delay * 2).await;
                Ok(())
            }
            Err(e) => Err(anyhow::Error::new(e).context(format!("cannot select '{}'", ssid))),
        },
        _ => Ok(()),
    };
    (page.render(), result)
}
