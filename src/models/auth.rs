use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub admin_key: String,
}

/// `data` de una respuesta de login exitosa
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct LoginData {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Credencial del admin guardada en sessionStorage
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AdminCredential {
    pub token: String,
    pub name: String,
}
