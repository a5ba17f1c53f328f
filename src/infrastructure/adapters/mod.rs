//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

mod object_key;
mod process_env;
mod server_url;
mod tracing_logger;

pub use process_env::{MapEnv, ProcessEnv};
pub use server_url::ServerUrlBuilder;
pub use tracing_logger::{MemoryLogger, TracingLogger};
