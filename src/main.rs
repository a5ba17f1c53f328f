//! Companion - 独立启动入口
//!
//! 加载配置（优先级：显式覆盖 > 配置文件 > 环境变量），打印启动信息

use companion::application::build_startup_message;
use companion::config::{load_options, no_overrides, print_config};
use companion::infrastructure::ServerUrlBuilder;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,companion=info")),
        )
        .init();

    let options = load_options(&no_overrides())
        .map_err(|e| anyhow::anyhow!("Failed to load companion options: {}", e))?;

    print_config(&options);

    let urls = ServerUrlBuilder::from_options(&options.server);
    println!("{}", build_startup_message(&options, &urls));

    Ok(())
}
