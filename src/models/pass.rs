use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SendPassRequest {
    pub email: String,
}

/// `data` de `/give-pass`. El backend puede mandar el id corto como string o número.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SendPassData {
    #[serde(default)]
    pub order_id_short: Option<Value>,
}

impl SendPassData {
    pub fn order_reference(&self) -> Option<String> {
        match self.order_id_short.as_ref()? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }
}
