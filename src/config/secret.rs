//! Secret Resolver
//!
//! 密钥来源（优先级从高到低）：
//! 1. `<NAME>_FILE` 指向的文件内容
//! 2. `<NAME>` 环境变量
//!
//! 两个服务端签名密钥在所有来源都缺失时自动生成

use rand::RngCore;
use std::fs;
use std::path::PathBuf;

use super::loader::ConfigError;
use crate::application::ports::{EnvSource, StartupLoggerPort};

/// 自动生成密钥的随机字节数
pub const GENERATED_SECRET_BYTES: usize = 64;

/// 自动生成告警的分类标签
pub const GENERATED_SECRET_CATEGORY: &str = "startup.secret";

/// 解析密钥
///
/// 设置了 `<NAME>_FILE` 时必须能读取该文件，读取失败不会回退到环境变量。
/// 文件路径按原始字节使用，不要求 UTF-8；文件内容原样返回，不做 trim。
/// 直接设置的密钥不是合法 UTF-8 时报错，不会当作未设置。
pub fn get_secret(env: &dyn EnvSource, base_name: &str) -> Result<Option<String>, ConfigError> {
    let file_var = format!("{}_FILE", base_name);
    match env.var_os(&file_var).filter(|path| !path.is_empty()) {
        Some(path) => {
            let path = PathBuf::from(path);
            let secret = fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
                path: path.display().to_string(),
                source: e,
            })?;
            tracing::debug!(var = %file_var, "Secret loaded from file");
            Ok(Some(secret))
        }
        None => env
            .var_os(base_name)
            .map(|value| {
                value
                    .into_string()
                    .map_err(|_| ConfigError::parse(base_name, "value is not valid UTF-8"))
            })
            .transpose(),
    }
}

/// 生成服务端密钥（128 位十六进制字符）
pub fn generate_secret(logger: &dyn StartupLoggerPort) -> String {
    logger.warn(
        "auto-generating server secret because none was specified",
        GENERATED_SECRET_CATEGORY,
    );

    let mut raw = [0u8; GENERATED_SECRET_BYTES];
    rand::rng().fill_bytes(&mut raw);
    hex::encode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{MapEnv, MemoryLogger};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_indirection_wins() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "mysecret123").unwrap();

        let env = MapEnv::from_pairs([
            ("FOO_FILE", file.path().to_str().unwrap()),
            ("FOO", "other"),
        ]);
        assert_eq!(get_secret(&env, "FOO").unwrap().as_deref(), Some("mysecret123"));
    }

    #[test]
    fn test_file_content_is_not_trimmed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "withnewline").unwrap();

        let env = MapEnv::from_pairs([("FOO_FILE", file.path().to_str().unwrap())]);
        assert_eq!(get_secret(&env, "FOO").unwrap().as_deref(), Some("withnewline\n"));
    }

    #[test]
    fn test_direct_value() {
        let env = MapEnv::from_pairs([("FOO", "direct")]);
        assert_eq!(get_secret(&env, "FOO").unwrap().as_deref(), Some("direct"));
    }

    #[test]
    fn test_empty_file_var_falls_back() {
        let env = MapEnv::from_pairs([("FOO_FILE", ""), ("FOO", "direct")]);
        assert_eq!(get_secret(&env, "FOO").unwrap().as_deref(), Some("direct"));
    }

    #[test]
    fn test_missing_secret_is_none() {
        let env = MapEnv::default();
        assert!(get_secret(&env, "FOO").unwrap().is_none());
    }

    #[test]
    fn test_unreadable_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let env = MapEnv::from_pairs([("FOO_FILE", missing.to_str().unwrap()), ("FOO", "direct")]);

        let err = get_secret(&env, "FOO").unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_file_path_is_still_read() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let dir = tempfile::tempdir().unwrap();
        let mut path = dir.path().as_os_str().to_os_string();
        path.push("/");
        path.push(OsString::from_vec(b"secret\xff".to_vec()));
        std::fs::write(&path, "fromfile").unwrap();

        let mut env = MapEnv::from_pairs([("FOO", "direct")]);
        env.set_os("FOO_FILE", path);
        assert_eq!(get_secret(&env, "FOO").unwrap().as_deref(), Some("fromfile"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_missing_file_is_fatal() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let mut env = MapEnv::from_pairs([("FOO", "direct")]);
        env.set_os("FOO_FILE", OsString::from_vec(b"/nonexistent/\xff".to_vec()));

        let err = get_secret(&env, "FOO").unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_direct_value_is_rejected() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let mut env = MapEnv::new();
        env.set_os("FOO", OsString::from_vec(b"ab\xff".to_vec()));

        let err = get_secret(&env, "FOO").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_generate_secret() {
        let logger = MemoryLogger::new();
        let secret = generate_secret(&logger);

        assert_eq!(secret.len(), 128);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(logger.count(GENERATED_SECRET_CATEGORY), 1);
        assert_ne!(secret, generate_secret(&logger));
    }
}
