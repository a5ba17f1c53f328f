//! File Config Loader
//!
//! 命令行 `-c <path>` / `--config <path>` 指定的配置文件，作为覆盖环境变量的一层

use serde_json::{Map, Value};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use super::loader::ConfigError;

const CONFIG_FLAGS: &[&str] = &["-c", "--config"];

/// 从参数列表中取配置文件路径
///
/// 以最右侧出现的 flag 为准；该 flag 后面没有参数时返回 None，
/// 不会回退到更靠左的 flag。参数不要求是 UTF-8
pub fn config_path_from_args<S: AsRef<OsStr>>(args: &[S]) -> Option<PathBuf> {
    let index = args.iter().rposition(|arg| {
        let arg: &OsStr = arg.as_ref();
        CONFIG_FLAGS.iter().any(|flag| arg == OsStr::new(flag))
    })?;
    args.get(index + 1).map(|path| Path::new(path).to_path_buf())
}

/// 加载配置文件
///
/// 未指定路径时返回空对象。`.toml` 后缀按 TOML 解析，其余按 JSON 解析
pub fn config_from_file(path: Option<&Path>) -> Result<Value, ConfigError> {
    let Some(path) = path else {
        return Ok(Value::Object(Map::new()));
    };

    let raw = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;

    let origin = path.display().to_string();
    let config: Value = if path.extension().and_then(|ext| ext.to_str()) == Some("toml") {
        toml::from_str(&raw).map_err(|e| ConfigError::parse(origin.as_str(), e))?
    } else {
        serde_json::from_str(&raw).map_err(|e| ConfigError::parse(origin.as_str(), e))?
    };

    if !config.is_object() {
        return Err(ConfigError::parse(
            origin,
            "top-level value must be an object",
        ));
    }

    tracing::debug!(path = %path.display(), "Loaded configuration file");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_rightmost_flag_wins() {
        let args = ["prog", "-c", "/a.json", "-c", "/b.json"];
        assert_eq!(config_path_from_args(&args), Some(PathBuf::from("/b.json")));

        let args = ["prog", "--config", "/a.json", "-c", "/b.json"];
        assert_eq!(config_path_from_args(&args), Some(PathBuf::from("/b.json")));
    }

    #[test]
    fn test_no_flag() {
        let args = ["prog", "--port", "3020"];
        assert_eq!(config_path_from_args(&args), None);
        assert_eq!(config_path_from_args::<&str>(&[]), None);
    }

    #[test]
    fn test_trailing_flag_without_value() {
        assert_eq!(config_path_from_args(&["prog", "-c"]), None);
        assert_eq!(config_path_from_args(&["prog", "-c", "/a.json", "--config"]), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_args() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let args = [
            OsString::from("prog"),
            OsString::from_vec(b"--label=\xff".to_vec()),
            OsString::from("-c"),
            OsString::from("/a.json"),
        ];
        assert_eq!(config_path_from_args(&args), Some(PathBuf::from("/a.json")));

        let raw_path = OsString::from_vec(b"/conf\xff.json".to_vec());
        let args = [OsString::from("prog"), OsString::from("--config"), raw_path.clone()];
        assert_eq!(config_path_from_args(&args), Some(PathBuf::from(raw_path)));
    }

    #[test]
    fn test_no_path_is_empty_object() {
        assert_eq!(config_from_file(None).unwrap(), json!({}));
    }

    #[test]
    fn test_load_json() {
        let file = write_temp(".json", r#"{"server":{"host":"example.com"}}"#);
        let config = config_from_file(Some(file.path())).unwrap();
        assert_eq!(config, json!({ "server": { "host": "example.com" } }));
    }

    #[test]
    fn test_load_toml() {
        let file = write_temp(
            ".toml",
            "streamingUpload = true\n\n[server]\nhost = \"example.com\"\n",
        );
        let config = config_from_file(Some(file.path())).unwrap();
        assert_eq!(
            config,
            json!({ "streamingUpload": true, "server": { "host": "example.com" } })
        );
    }

    #[test]
    fn test_malformed_json() {
        let file = write_temp(".json", "{ not json");
        let err = config_from_file(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_non_object_json() {
        let file = write_temp(".json", "[1, 2, 3]");
        let err = config_from_file(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = config_from_file(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
