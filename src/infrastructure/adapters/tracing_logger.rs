//! Startup Logger 实现
//!
//! - `TracingLogger`: 通过 tracing 输出
//! - `MemoryLogger`: 记录到内存，便于嵌入方收集启动告警

use std::sync::Mutex;

use crate::application::ports::StartupLoggerPort;

/// tracing 告警输出
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl StartupLoggerPort for TracingLogger {
    fn warn(&self, message: &str, category: &str) {
        tracing::warn!(category = %category, "{}", message);
    }
}

/// 内存告警记录
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(String, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录的 (category, message)
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// 指定分类的告警条数
    pub fn count(&self, category: &str) -> usize {
        self.entries()
            .iter()
            .filter(|(c, _)| c == category)
            .count()
    }
}

impl StartupLoggerPort for MemoryLogger {
    fn warn(&self, message: &str, category: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((category.to_string(), message.to_string()));
    }
}
