//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 与宿主进程交互的端口定义（环境变量、URL 构建、告警输出、对象 key 策略）
//! - startup: 启动欢迎信息

pub mod ports;
pub mod startup;

pub use startup::{build_startup_message, oauth_redirect_urls};
