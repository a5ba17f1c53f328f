//! Configuration Module
//!
//! Companion 启动配置与密钥引导，支持多层级配置来源：
//! - 环境变量（最低优先级）
//! - 配置文件（JSON，或 `.toml` 后缀的 TOML）
//! - 调用方显式覆盖（最高优先级）

mod env;
mod file;
mod loader;
mod merge;
mod secret;
mod types;

pub use env::config_from_env;
pub use file::{config_from_file, config_path_from_args};
pub use loader::{
    get_companion_options, get_companion_tree, has_protocol, load_options, no_overrides,
    print_config, validate_options, ConfigError,
};
pub use merge::{deep_merge, merge_configs, merge_layers};
pub use secret::{generate_secret, get_secret, GENERATED_SECRET_BYTES, GENERATED_SECRET_CATEGORY};
pub use types::{
    CompanionOptions, KeyStrategy, ProviderCredentials, ProviderOptions, S3Options, ServerOptions,
};
