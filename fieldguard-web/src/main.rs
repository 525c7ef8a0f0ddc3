use anyhow::Context;
use fieldguard_core::prelude::*;
use fieldguard_core::DEFAULT_CONFIG_FILE;
use fieldguard_web::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = Environment::load(DEFAULT_CONFIG_FILE)?;
    LoggingConfig::from_environment(&env)?.init()?;

    let properties = ServerProperties::from_environment(&env)?;

    // schema 错误在启动时暴露，而不是在处理请求时
    let registry = default_registry().context("Failed to register record schemas")?;
    tracing::info!(kinds = ?registry.kinds(), "Record schemas registered");

    WebServer::new(properties, AppState::new(registry))
        .run()
        .await?;

    Ok(())
}
