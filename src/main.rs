use tecapp::server;
use tecapp::shared::config::AppConfig;
use tecapp::shared::utils::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let config = AppConfig::from_env()?;
    server::run(config).await
}
