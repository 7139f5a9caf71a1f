use anyhow::Result;
use report_page::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    if config.verbose_logging {
        logger::init_with_level("debug");
    } else {
        logger::init();
    }

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
