use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::constants::MSG_INVALID_QR_FORMAT;

/// Datos decodificados del QR. Solo se exige que sea un objeto JSON.
pub type ScanPayload = Map<String, Value>;

/// Clave del sobre opcional que envuelve los datos del pase
const QR_ENVELOPE_KEY: &str = "qrCodeData";

/// Resultado de un intento de escaneo (inmutable, se reemplaza entero)
#[derive(Debug, Clone, PartialEq)]
pub enum ScanResult {
    Valid(ScanPayload),
    Error(String),
}

impl ScanResult {
    /// Interpretar el texto entregado por el decoder
    pub fn from_decoded(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(payload)) => ScanResult::Valid(payload),
            _ => ScanResult::Error(MSG_INVALID_QR_FORMAT.to_string()),
        }
    }

    pub fn payload(&self) -> Option<&ScanPayload> {
        match self {
            ScanResult::Valid(payload) => Some(payload),
            ScanResult::Error(_) => None,
        }
    }

    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        matches!(self, ScanResult::Valid(_))
    }
}

/// Identidad mínima de un pase
#[derive(Debug, Clone, PartialEq)]
pub struct PassIdentity {
    pub order_id: String,
    pub attendee_name: String,
}

/// Extraer orderId + attendeeName, desenvolviendo `qrCodeData` si existe.
/// El sobre puede venir como objeto o como string con JSON dentro.
pub fn extract_identity(payload: &ScanPayload) -> Option<PassIdentity> {
    let source: Cow<'_, ScanPayload> = match payload.get(QR_ENVELOPE_KEY) {
        Some(Value::Object(inner)) => Cow::Borrowed(inner),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(inner)) => Cow::Owned(inner),
            _ => Cow::Borrowed(payload),
        },
        _ => Cow::Borrowed(payload),
    };

    Some(PassIdentity {
        order_id: required_text(&source, "orderId")?,
        attendee_name: required_text(&source, "attendeeName")?,
    })
}

fn required_text(source: &ScanPayload, key: &str) -> Option<String> {
    match source.get(key)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Campos del payload listos para mostrar (objetos anidados como JSON compacto)
pub fn display_fields(payload: &ScanPayload) -> Vec<(String, String)> {
    payload
        .iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(text) => text.clone(),
                Value::Null => "null".to_string(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect()
}

/// Estado del pase según el servidor. `is_used == None` = error/desconocido.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QrStatus {
    pub loading: bool,
    pub is_used: Option<bool>,
    pub message: Option<String>,
}

impl QrStatus {
    pub fn checking() -> Self {
        Self {
            loading: true,
            is_used: None,
            message: None,
        }
    }

    pub fn known(is_used: bool, message: &str) -> Self {
        Self {
            loading: false,
            is_used: Some(is_used),
            message: Some(message.to_string()),
        }
    }

    pub fn unknown(message: &str) -> Self {
        Self {
            loading: false,
            is_used: None,
            message: Some(message.to_string()),
        }
    }
}

/// Body de `/qr/get` y `/qr/verify`: el payload completo serializado
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QrRequest {
    pub qr_data: String,
}

impl QrRequest {
    pub fn from_payload(payload: &ScanPayload) -> Result<Self, serde_json::Error> {
        Ok(Self {
            qr_data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QrStatusData {
    #[serde(default)]
    pub is_used: Option<bool>,
}
