//! Object Key 策略实现

use uuid::Uuid;

use crate::application::ports::{ObjectKeyPort, UploadContext};
use crate::config::KeyStrategy;

impl ObjectKeyPort for KeyStrategy {
    fn object_key(&self, _ctx: &UploadContext<'_>, filename: &str) -> String {
        match self {
            KeyStrategy::Filename => filename.to_string(),
            KeyStrategy::UuidPrefixed => format!("{}-{}", Uuid::new_v4(), filename),
        }
    }
}
