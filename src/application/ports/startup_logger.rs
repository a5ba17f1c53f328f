//! Startup Logger Port - 启动期告警输出

/// Startup Logger Port
pub trait StartupLoggerPort {
    /// 输出带分类标签的告警
    fn warn(&self, message: &str, category: &str);
}
