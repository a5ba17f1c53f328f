//! Env Source 实现
//!
//! - `ProcessEnv`: 读取当前进程环境
//! - `MapEnv`: 内存中的环境变量表，供嵌入方注入或测试使用

use std::collections::HashMap;
use std::ffi::OsString;

use crate::application::ports::EnvSource;

/// 当前进程环境
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var_os(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }
}

/// 内存环境变量表
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, OsString>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), OsString::from(v.into())))
                .collect(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set_os(name, OsString::from(value.into()));
    }

    /// 写入任意字节的值（可以不是 UTF-8）
    pub fn set_os(&mut self, name: impl Into<String>, value: impl Into<OsString>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl EnvSource for MapEnv {
    fn var_os(&self, name: &str) -> Option<OsString> {
        self.vars.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_env_helpers() {
        let mut env = MapEnv::from_pairs([("A", "true"), ("B", "")]);
        env.set("C", "True");

        assert_eq!(env.var("A").as_deref(), Some("true"));
        assert_eq!(env.var("B").as_deref(), Some(""));
        assert!(env.non_empty("B").is_none());
        assert!(env.flag("A"));
        assert!(!env.flag("C"));
        assert!(!env.flag("missing"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_value_is_still_set() {
        use std::os::unix::ffi::OsStringExt;

        let mut env = MapEnv::new();
        env.set_os("RAW", OsString::from_vec(b"ab\xffcd".to_vec()));

        assert_eq!(env.var("RAW").as_deref(), Some("ab\u{fffd}cd"));
        assert!(env.non_empty("RAW").is_some());
        assert!(!env.flag("RAW"));
    }

    #[test]
    fn test_process_env_missing_var() {
        assert!(ProcessEnv
            .var("COMPANION_TEST_VARIABLE_THAT_IS_NEVER_SET")
            .is_none());
    }
}
