//! Environment Config Loader
//!
//! 从环境变量构建配置树，未设置的字段直接省略，交给后续合并层或使用方决定默认值

use serde_json::{Map, Value};

use super::loader::ConfigError;
use super::secret::get_secret;
use super::types::{KeyStrategy, DEFAULT_ACL};
use crate::application::ports::EnvSource;

/// OAuth provider 环境变量表：(provider 名称, 变量前缀, 是否支持 `_KEYS_ENDPOINT`)
const OAUTH_PROVIDERS: &[(&str, &str, bool)] = &[
    ("drive", "GOOGLE", true),
    ("dropbox", "DROPBOX", true),
    ("box", "BOX", false),
    ("instagram", "INSTAGRAM", true),
    ("facebook", "FACEBOOK", true),
    ("onedrive", "ONEDRIVE", true),
    ("zoom", "ZOOM", true),
];

const DEFAULT_S3_EXPIRES: &str = "300";

/// 配置树中的一层对象
#[derive(Default)]
struct Section(Map<String, Value>);

impl Section {
    fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// 仅在有值时写入
    fn opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// 从环境变量加载配置树
pub fn config_from_env(env: &dyn EnvSource) -> Result<Value, ConfigError> {
    let periodic_ping_static_payload = env
        .non_empty("COMPANION_PERIODIC_PING_STATIC_JSON_PAYLOAD")
        .map(|raw| {
            serde_json::from_str::<Value>(&raw).map_err(|e| {
                ConfigError::parse("COMPANION_PERIODIC_PING_STATIC_JSON_PAYLOAD", e)
            })
        })
        .transpose()?;

    let upload_urls = env
        .non_empty("COMPANION_UPLOAD_URLS")
        .map(|raw| Value::from(split_list(&raw)))
        .unwrap_or(Value::Null);

    let config = Section::default()
        .set("providerOptions", provider_options(env)?)
        .set("server", server(env))
        .set(
            "periodicPingUrls",
            env.non_empty("COMPANION_PERIODIC_PING_URLS")
                .map(|raw| split_list(&raw))
                .unwrap_or_default(),
        )
        .opt("periodicPingInterval", parse_int(env, "COMPANION_PERIODIC_PING_INTERVAL"))
        .opt("periodicPingStaticPayload", periodic_ping_static_payload)
        .opt("periodicPingCount", parse_int(env, "COMPANION_PERIODIC_PING_COUNT"))
        .opt("filePath", env.var("COMPANION_DATADIR"))
        .opt("redisUrl", env.var("COMPANION_REDIS_URL"))
        .set("redisOptions", Map::new())
        .opt("sendSelfEndpoint", env.var("COMPANION_SELF_ENDPOINT"))
        .set("uploadUrls", upload_urls)
        .opt("secret", get_secret(env, "COMPANION_SECRET")?)
        .opt("preAuthSecret", get_secret(env, "COMPANION_PREAUTH_SECRET")?)
        .set("allowLocalUrls", env.flag("COMPANION_ALLOW_LOCAL_URLS"))
        .opt("cookieDomain", env.var("COMPANION_COOKIE_DOMAIN"))
        .set("streamingUpload", env.flag("COMPANION_STREAMING_UPLOAD"))
        .opt("maxFileSize", parse_int(env, "COMPANION_MAX_FILE_SIZE"))
        .opt("chunkSize", parse_int(env, "COMPANION_CHUNK_SIZE"))
        .opt(
            "clientSocketConnectTimeout",
            parse_int(env, "COMPANION_CLIENT_SOCKET_CONNECT_TIMEOUT"),
        );

    Ok(config.into_value())
}

fn provider_options(env: &dyn EnvSource) -> Result<Value, ConfigError> {
    let mut providers = Section::default();

    for (name, prefix, has_keys_endpoint) in OAUTH_PROVIDERS {
        let mut provider = Section::default()
            .opt("key", env.var(&format!("COMPANION_{}_KEY", prefix)))
            .opt("secret", get_secret(env, &format!("COMPANION_{}_SECRET", prefix))?);

        if *name == "zoom" {
            provider = provider.opt(
                "verificationToken",
                get_secret(env, "COMPANION_ZOOM_VERIFICATION_TOKEN")?,
            );
        }
        if *has_keys_endpoint {
            provider = provider.opt(
                "credentialsURL",
                env.var(&format!("COMPANION_{}_KEYS_ENDPOINT", prefix)),
            );
        }

        providers = providers.set(name, provider.into_value());
    }

    // unsplash 的 secret 不支持 _FILE
    let unsplash = Section::default()
        .opt("key", env.var("COMPANION_UNSPLASH_KEY"))
        .opt("secret", env.var("COMPANION_UNSPLASH_SECRET"));
    let search_providers = Section::default().set("unsplash", unsplash.into_value());

    Ok(providers
        .set("searchProviders", search_providers.into_value())
        .set("s3", s3(env)?)
        .into_value())
}

fn s3(env: &dyn EnvSource) -> Result<Value, ConfigError> {
    let expires = env
        .non_empty("COMPANION_AWS_EXPIRES")
        .unwrap_or_else(|| DEFAULT_S3_EXPIRES.to_string());

    let acl = if env.flag("COMPANION_AWS_DISABLE_ACL") {
        Value::Null
    } else {
        Value::from(
            env.non_empty("COMPANION_AWS_ACL")
                .unwrap_or_else(|| DEFAULT_ACL.to_string()),
        )
    };

    let get_key = env
        .flag("COMPANION_S3_GETKEY_SAFE_BEHAVIOR")
        .then_some(KeyStrategy::UuidPrefixed.as_str());

    Ok(Section::default()
        .opt("key", env.var("COMPANION_AWS_KEY"))
        .opt("secret", get_secret(env, "COMPANION_AWS_SECRET")?)
        .opt("bucket", env.var("COMPANION_AWS_BUCKET"))
        .opt("endpoint", env.var("COMPANION_AWS_ENDPOINT"))
        .opt("region", env.var("COMPANION_AWS_REGION"))
        .set(
            "useAccelerateEndpoint",
            env.flag("COMPANION_AWS_USE_ACCELERATE_ENDPOINT"),
        )
        .opt("expires", parse_base10(&expires))
        .set("acl", acl)
        .opt("getKey", get_key)
        .into_value())
}

fn server(env: &dyn EnvSource) -> Value {
    let valid_hosts = env
        .non_empty("COMPANION_DOMAINS")
        .or_else(|| env.non_empty("COMPANION_DOMAIN"))
        .map(|domains| split_list(&domains))
        .unwrap_or_default();

    Section::default()
        .opt("host", env.var("COMPANION_DOMAIN"))
        .opt("protocol", env.var("COMPANION_PROTOCOL"))
        .opt("path", env.var("COMPANION_PATH"))
        .opt("implicitPath", env.var("COMPANION_IMPLICIT_PATH"))
        .opt("oauthDomain", env.var("COMPANION_OAUTH_DOMAIN"))
        .set("validHosts", valid_hosts)
        .into_value()
}

/// 逗号分隔列表，元素保持原样
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

fn parse_int(env: &dyn EnvSource, name: &str) -> Option<i64> {
    env.non_empty(name).and_then(|raw| parse_base10(&raw))
}

/// 十进制整数前缀
///
/// 忽略前导空白，接受一个可选的正负号，取其后最长的数字串，其余字符忽略
/// （`"100mb"` -> 100，`"5.5"` -> 5）。没有数字或超出 i64 范围时返回 None
fn parse_base10(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}
