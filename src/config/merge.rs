//! Config Merger
//!
//! 对象递归合并，列表与标量整体替换。输入不会被修改；已有键保持原位置，新键追加在后

use serde_json::{Map, Value};

/// 合并三层配置：环境变量 < 配置文件 < 显式覆盖
pub fn merge_configs(env: &Value, file: &Value, overrides: &Value) -> Value {
    merge_layers([env, file, overrides])
}

/// 按优先级从低到高合并任意多层
pub fn merge_layers<'a>(layers: impl IntoIterator<Item = &'a Value>) -> Value {
    layers
        .into_iter()
        .fold(Value::Object(Map::new()), |merged, layer| {
            deep_merge(merged, layer)
        })
}

/// 将 `overlay` 合并到 `base` 上
///
/// 两边都是对象时逐键递归，否则 `overlay` 覆盖 `base`（null 也算有值）
pub fn deep_merge(base: Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(key) {
                    Some(existing) => {
                        let merged = deep_merge(std::mem::take(existing), value);
                        *existing = merged;
                    }
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
            Value::Object(base)
        }
        (_, overlay) => overlay.clone(),
    }
}
