//! URL Builder Port - 对外 URL 构建抽象

/// URL Builder Port
///
/// 根据 `server.protocol` / `server.host` / `server.path` 生成完整 URL
pub trait UrlBuilderPort {
    /// 构建 URL
    ///
    /// `is_external` 为 true 时表示该 URL 会被外部服务访问（如 OAuth 回调）
    fn build_url(&self, sub_path: &str, is_external: bool) -> String;
}
