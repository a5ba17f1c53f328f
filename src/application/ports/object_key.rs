//! Object Key Port - S3 对象 key 命名策略

use serde_json::{Map, Value};

/// 上传请求上下文
#[derive(Debug, Clone, Copy)]
pub struct UploadContext<'a> {
    /// 来源 provider 名称
    pub provider: &'a str,
    /// 客户端提交的元数据
    pub metadata: &'a Map<String, Value>,
}

/// Object Key Port
pub trait ObjectKeyPort {
    /// 为一次上传生成目标对象 key
    fn object_key(&self, ctx: &UploadContext<'_>, filename: &str) -> String;
}
