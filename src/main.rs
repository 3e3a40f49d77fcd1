use headphone_store::build_router;
use headphone_store::config::load_config;
use headphone_store::infrastructure::logger::Logger;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    // guard 在整个进程期间保持存活
    let _log_guard = Logger::init(&config.logging)?;

    let addr = config.http.socket_addr()?;
    let app = build_router(&config);

    let listener = TcpListener::bind(addr).await?;
    info!("🎧 耳机商店运行在 http://{}", addr);
    info!("📖 可用端点:");
    info!("   GET  /             - 商品页面");
    info!("   POST /cart         - 加入购物车");
    info!("   POST /buy          - 购买");
    info!("   GET  /api/product  - 商品摘要 (JSON)");
    info!("   GET  /health       - 健康检查");

    axum::serve(listener, app).await?;
    Ok(())
}
