//! Configuration Loader
//!
//! 组装 Companion 启动配置
//!
//! 优先级（从低到高）：
//! 1. 环境变量
//! 2. 配置文件（`-c` / `--config`）
//! 3. 调用方显式传入的覆盖项

use serde_json::{Map, Value};
use std::ffi::{OsStr, OsString};
use thiserror::Error;

use super::env::config_from_env;
use super::file::{config_from_file, config_path_from_args};
use super::merge::merge_configs;
use super::secret::generate_secret;
use super::types::CompanionOptions;
use crate::application::ports::{EnvSource, StartupLoggerPort};
use crate::infrastructure::adapters::{ProcessEnv, TracingLogger};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

impl ConfigError {
    pub fn parse(origin: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }
}

/// 服务端签名密钥在配置树中的键
const SERVER_SECRETS: &[&str] = &["secret", "preAuthSecret"];

/// 从当前进程环境与命令行加载配置
pub fn load_options(overrides: &Value) -> Result<CompanionOptions, ConfigError> {
    let args: Vec<OsString> = std::env::args_os().collect();
    get_companion_options(&ProcessEnv, &args, overrides, &TracingLogger)
}

/// 加载配置
///
/// 依次读取环境变量与配置文件，与 `overrides` 合并后补全密钥并校验
///
/// # 返回
/// - `Ok(CompanionOptions)` - 最终配置
/// - `Err(ConfigError)` - 文件读取失败、解析失败或校验失败，启动应当中止
pub fn get_companion_options<S: AsRef<OsStr>>(
    env: &dyn EnvSource,
    args: &[S],
    overrides: &Value,
    logger: &dyn StartupLoggerPort,
) -> Result<CompanionOptions, ConfigError> {
    let tree = get_companion_tree(env, args, overrides, logger)?;

    let options: CompanionOptions = serde_json::from_value(tree)
        .map_err(|e| ConfigError::parse("merged configuration", e))?;

    validate_options(&options)?;

    Ok(options)
}

/// 加载合并后的原始配置树（密钥已补全）
pub fn get_companion_tree<S: AsRef<OsStr>>(
    env: &dyn EnvSource,
    args: &[S],
    overrides: &Value,
    logger: &dyn StartupLoggerPort,
) -> Result<Value, ConfigError> {
    if !overrides.is_object() {
        return Err(ConfigError::parse(
            "overrides",
            "top-level value must be an object",
        ));
    }

    let env_config = config_from_env(env)?;
    let path = config_path_from_args(args);
    let file_config = config_from_file(path.as_deref())?;

    let merged = merge_configs(&env_config, &file_config, overrides);
    Ok(ensure_secrets(merged, logger))
}

/// 缺失（未设置、null、空字符串）的服务端密钥用随机值补全
fn ensure_secrets(mut tree: Value, logger: &dyn StartupLoggerPort) -> Value {
    if let Value::Object(map) = &mut tree {
        for key in SERVER_SECRETS {
            let missing = match map.get(*key) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            };
            if missing {
                map.insert((*key).to_string(), Value::String(generate_secret(logger)));
            }
        }
    }
    tree
}

/// 校验配置有效性
pub fn validate_options(options: &CompanionOptions) -> Result<(), ConfigError> {
    if options.secret.is_empty() {
        return Err(ConfigError::Validation("secret cannot be empty".to_string()));
    }

    if options.pre_auth_secret.is_empty() {
        return Err(ConfigError::Validation(
            "preAuthSecret cannot be empty".to_string(),
        ));
    }

    if let Some(url) = options
        .periodic_ping_urls
        .iter()
        .find(|url| !has_protocol(url))
    {
        return Err(ConfigError::Validation(format!(
            "periodic ping URL must start with http:// or https://: {}",
            url
        )));
    }

    if options.periodic_ping_interval == Some(0) {
        return Err(ConfigError::Validation(
            "periodicPingInterval cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// URL 是否带 http(s) 协议头
pub fn has_protocol(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// 打印配置信息（用于启动时日志），密钥不输出
pub fn print_config(options: &CompanionOptions) {
    let unset = || "<unset>".to_string();

    tracing::info!("=== Companion Configuration ===");
    tracing::info!(
        "Server: {}://{}{}",
        options.server.protocol.clone().unwrap_or_else(unset),
        options.server.host.clone().unwrap_or_else(unset),
        options.server.path.clone().unwrap_or_default()
    );
    tracing::info!("Valid Hosts: {:?}", options.server.valid_hosts);
    for (name, credentials) in options.provider_options.oauth.iter() {
        tracing::info!(
            "Provider {}: {}",
            name,
            if credentials.is_complete() { "configured" } else { "incomplete" }
        );
    }
    if let Some(s3) = &options.provider_options.s3 {
        tracing::info!(
            "S3: bucket={}, region={}, acl={}, key strategy={}",
            s3.bucket.clone().unwrap_or_else(unset),
            s3.region.clone().unwrap_or_else(unset),
            s3.acl.clone().unwrap_or_else(|| "<none>".to_string()),
            s3.get_key
        );
    }
    tracing::info!("Data Directory: {}", options.file_path.clone().unwrap_or_else(unset));
    tracing::info!("Redis: {}", if options.redis_url.is_some() { "enabled" } else { "disabled" });
    tracing::info!("Streaming Upload: {}", options.streaming_upload);
    tracing::info!("Allow Local URLs: {}", options.allow_local_urls);
    if !options.periodic_ping_urls.is_empty() {
        tracing::info!("Periodic Ping URLs: {:?}", options.periodic_ping_urls);
    }
    tracing::info!("===============================");
}

/// 空的覆盖层
pub fn no_overrides() -> Value {
    Value::Object(Map::new())
}
