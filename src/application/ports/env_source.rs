//! Env Source Port - 环境变量读取抽象
//!
//! 配置加载只通过该接口读取环境，具体实现在 infrastructure/adapters 层

use std::ffi::OsString;

/// Env Source Port
pub trait EnvSource {
    /// 读取原始值（不要求 UTF-8），未设置时返回 None
    fn var_os(&self, name: &str) -> Option<OsString>;

    /// 读取字符串值
    ///
    /// 非 UTF-8 的值按 lossy 方式转换，已设置的变量不会被当作未设置
    fn var(&self, name: &str) -> Option<String> {
        self.var_os(name)
            .map(|value| value.to_string_lossy().into_owned())
    }

    /// 读取非空值
    ///
    /// 空字符串视为未设置
    fn non_empty(&self, name: &str) -> Option<String> {
        self.var(name).filter(|value| !value.is_empty())
    }

    /// 值是否严格等于 `"true"`
    fn flag(&self, name: &str) -> bool {
        self.var_os(name).is_some_and(|value| value == "true")
    }
}
