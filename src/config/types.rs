//! Configuration Types
//!
//! 合并后的配置树反序列化得到的强类型视图，字段名沿用配置树的 camelCase

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Companion 主配置
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionOptions {
    /// 各存储 provider 的凭据
    #[serde(default)]
    pub provider_options: ProviderOptions,

    /// 服务器地址配置
    #[serde(default)]
    pub server: ServerOptions,

    /// 会话签名密钥
    pub secret: String,

    /// 预认证 token 签名密钥
    pub pre_auth_secret: String,

    /// 上传临时文件目录
    #[serde(default)]
    pub file_path: Option<String>,

    #[serde(default)]
    pub redis_url: Option<String>,

    /// 透传给 redis 客户端的选项
    #[serde(default)]
    pub redis_options: Map<String, Value>,

    #[serde(default)]
    pub send_self_endpoint: Option<String>,

    /// 允许的上传目标；None 表示未配置
    #[serde(default)]
    pub upload_urls: Option<Vec<String>>,

    #[serde(default)]
    pub allow_local_urls: bool,

    #[serde(default)]
    pub cookie_domain: Option<String>,

    #[serde(default)]
    pub streaming_upload: bool,

    #[serde(default)]
    pub max_file_size: Option<i64>,

    #[serde(default)]
    pub chunk_size: Option<i64>,

    #[serde(default)]
    pub client_socket_connect_timeout: Option<i64>,

    /// 心跳通知地址
    #[serde(default)]
    pub periodic_ping_urls: Vec<String>,

    #[serde(default)]
    pub periodic_ping_interval: Option<i64>,

    #[serde(default)]
    pub periodic_ping_count: Option<i64>,

    /// 心跳请求附带的静态 JSON
    #[serde(default)]
    pub periodic_ping_static_payload: Option<Value>,
}

/// Provider 配置集合
///
/// `s3` 与 `searchProviders` 结构不同，单独建模；其余键均视为 OAuth provider
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOptions {
    #[serde(default)]
    pub s3: Option<S3Options>,

    #[serde(default)]
    pub search_providers: BTreeMap<String, ProviderCredentials>,

    #[serde(flatten)]
    pub oauth: OAuthProviders,
}

impl ProviderOptions {
    /// 需要 OAuth 回调地址的 provider 名称，按配置中出现的顺序
    pub fn oauth_provider_names(&self) -> impl Iterator<Item = &str> {
        self.oauth.iter().map(|(name, _)| name)
    }
}

/// OAuth provider 集合，保留配置中的顺序
#[derive(Debug, Clone, Default)]
pub struct OAuthProviders(Vec<(String, ProviderCredentials)>);

impl OAuthProviders {
    pub fn get(&self, name: &str) -> Option<&ProviderCredentials> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, credentials)| credentials)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProviderCredentials)> {
        self.0
            .iter()
            .map(|(name, credentials)| (name.as_str(), credentials))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for OAuthProviders {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ProvidersVisitor;

        impl<'de> Visitor<'de> for ProvidersVisitor {
            type Value = OAuthProviders;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of provider credentials")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut providers = Vec::new();
                while let Some(entry) = map.next_entry::<String, ProviderCredentials>()? {
                    providers.push(entry);
                }
                Ok(OAuthProviders(providers))
            }
        }

        deserializer.deserialize_map(ProvidersVisitor)
    }
}

/// OAuth provider 凭据
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentials {
    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub secret: Option<String>,

    /// 动态下发应用凭据的地址
    #[serde(default, rename = "credentialsURL")]
    pub credentials_url: Option<String>,

    /// 仅 zoom 使用
    #[serde(default)]
    pub verification_token: Option<String>,
}

impl ProviderCredentials {
    /// key 与 secret 是否都已配置
    pub fn is_complete(&self) -> bool {
        self.key.as_deref().is_some_and(|k| !k.is_empty())
            && self.secret.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// S3 上传目标配置
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Options {
    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub secret: Option<String>,

    #[serde(default)]
    pub bucket: Option<String>,

    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub use_accelerate_endpoint: bool,

    /// 预签名 URL 有效期（秒）
    #[serde(default)]
    pub expires: Option<i64>,

    /// None 表示不发送 ACL 头
    #[serde(default = "default_acl")]
    pub acl: Option<String>,

    /// 对象 key 命名策略
    #[serde(default)]
    pub get_key: KeyStrategy,
}

pub(crate) const DEFAULT_ACL: &str = "public-read";

fn default_acl() -> Option<String> {
    Some(DEFAULT_ACL.to_string())
}

impl Default for S3Options {
    fn default() -> Self {
        Self {
            key: None,
            secret: None,
            bucket: None,
            endpoint: None,
            region: None,
            use_accelerate_endpoint: false,
            expires: None,
            acl: default_acl(),
            get_key: KeyStrategy::default(),
        }
    }
}

/// S3 对象 key 命名策略
///
/// 以可序列化的名称出现在配置树中，具体行为见 `ObjectKeyPort` 实现
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyStrategy {
    /// 直接使用原始文件名
    #[default]
    Filename,
    /// `<uuid>-<filename>`，同名文件不会互相覆盖
    UuidPrefixed,
}

impl KeyStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyStrategy::Filename => "filename",
            KeyStrategy::UuidPrefixed => "uuidPrefixed",
        }
    }
}

impl fmt::Display for KeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 服务器地址配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerOptions {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub protocol: Option<String>,

    #[serde(default)]
    pub path: Option<String>,

    /// 反向代理在外部加上的路径前缀
    #[serde(default)]
    pub implicit_path: Option<String>,

    #[serde(default)]
    pub oauth_domain: Option<String>,

    /// 允许的域名，按配置顺序
    #[serde(default)]
    pub valid_hosts: Vec<String>,
}
