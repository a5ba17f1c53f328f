//! Server URL Builder
//!
//! 根据 `server` 配置拼接对外 URL

use crate::application::ports::UrlBuilderPort;
use crate::config::ServerOptions;

const DEFAULT_PROTOCOL: &str = "http";
const DEFAULT_HOST: &str = "localhost:3020";

/// 基于服务器配置的 URL 构建器
#[derive(Debug, Clone)]
pub struct ServerUrlBuilder {
    protocol: String,
    host: String,
    path: String,
    implicit_path: String,
}

impl ServerUrlBuilder {
    pub fn from_options(server: &ServerOptions) -> Self {
        Self {
            protocol: server
                .protocol
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string()),
            host: server
                .host
                .clone()
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            path: server.path.clone().unwrap_or_default(),
            implicit_path: server.implicit_path.clone().unwrap_or_default(),
        }
    }

    /// 不含协议与 host 的路径部分
    pub fn build_path(&self, sub_path: &str, is_external: bool) -> String {
        let mut path = String::new();
        if is_external {
            path.push_str(&self.implicit_path);
        }
        path.push_str(&self.path);
        path.push_str(sub_path);
        path
    }
}

impl UrlBuilderPort for ServerUrlBuilder {
    fn build_url(&self, sub_path: &str, is_external: bool) -> String {
        format!(
            "{}://{}{}",
            self.protocol,
            self.host,
            self.build_path(sub_path, is_external)
        )
    }
}
