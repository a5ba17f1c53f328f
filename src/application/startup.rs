//! Startup Message - 启动欢迎信息
//!
//! 列出各 OAuth provider 的回调地址与 metrics 地址，只返回文本，不做输出

use super::ports::UrlBuilderPort;
use crate::config::CompanionOptions;

/// 构建 OAuth 回调地址（s3 与 searchProviders 不需要）
pub fn oauth_redirect_urls(options: &CompanionOptions, urls: &dyn UrlBuilderPort) -> Vec<String> {
    options
        .provider_options
        .oauth_provider_names()
        .map(|name| urls.build_url(&format!("/connect/{}/redirect", name), true))
        .collect()
}

/// 构建启动欢迎信息
pub fn build_startup_message(options: &CompanionOptions, urls: &dyn UrlBuilderPort) -> String {
    let title = format!("Welcome to Companion v{}", env!("CARGO_PKG_VERSION"));
    let redirect_urls = oauth_redirect_urls(options, urls);

    let mut lines = vec![
        title.clone(),
        "=".repeat(title.len()),
        String::new(),
        "Companion is up. A few things to check before uploads start flowing:".to_string(),
        String::new(),
    ];

    if redirect_urls.is_empty() {
        lines.push("- No OAuth providers are configured.".to_string());
    } else {
        lines.push(format!(
            "- Register {} as OAuth redirect URIs in the matching provider developer consoles.",
            redirect_urls.join(", ")
        ));
    }
    lines.push(format!(
        "- Runtime statistics are served at {}",
        urls.build_url("/metrics", true)
    ));
    lines.push("- Report bugs at https://github.com/transloadit/uppy/issues".to_string());

    lines.join("\n")
}
