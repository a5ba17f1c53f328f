//! Companion - 上传代理启动配置与密钥引导
//!
//! 应用层 (application/):
//! - Ports: 端口定义（EnvSource、UrlBuilder、StartupLogger、ObjectKey）
//! - Startup: 启动欢迎信息
//!
//! 配置 (config/):
//! - 环境变量 / 配置文件 / 显式覆盖三层合并
//! - 密钥解析与自动生成
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: 进程环境、URL 构建、tracing 告警、对象 key 策略

pub mod application;
pub mod config;
pub mod infrastructure;

pub use config::{get_companion_options, load_options, CompanionOptions, ConfigError};
