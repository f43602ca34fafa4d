use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Sobre común de las respuestas del backend: `{ status, message, data }`
#[derive(Clone, PartialEq, Deserialize, Debug, Default)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ApiEnvelope {
    /// Marca de éxito del backend (`status: "success"`)
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    /// Deserializar `data` al tipo esperado
    pub fn data_as<T: DeserializeOwned>(&self) -> Option<T> {
        self.data
            .clone()
            .and_then(|data| serde_json::from_value(data).ok())
    }

    /// Mensaje del servidor o el fallback dado
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Respuesta HTTP cruda: status + body JSON (None si vacío o no-JSON)
#[derive(Clone, PartialEq, Debug)]
pub struct ApiReply {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiReply {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn envelope(&self) -> ApiEnvelope {
        self.body
            .clone()
            .and_then(|body| serde_json::from_value(body).ok())
            .unwrap_or_default()
    }
}
