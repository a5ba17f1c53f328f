//! Application Ports - 出站端口定义
//!
//! 定义配置子系统与宿主进程之间的抽象接口

mod env_source;
mod object_key;
mod startup_logger;
mod url_builder;

pub use env_source::EnvSource;
pub use object_key::{ObjectKeyPort, UploadContext};
pub use startup_logger::StartupLoggerPort;
pub use url_builder::UrlBuilderPort;
