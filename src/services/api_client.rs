// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO interpreta status ni mensajes: devuelve status + body JSON y los
// ViewModels deciden qué hacer con cada código.
// ============================================================================

use gloo_net::http::Request;
use serde::Serialize;
use serde_json::Value;
use web_sys::RequestCredentials;

use crate::config::CONFIG;
use crate::error::ApiError;
use crate::models::{ApiReply, LoginRequest, QrRequest, SendPassRequest};
use crate::utils::constants::{ENDPOINT_ADMIN_LOGIN, ENDPOINT_GIVE_PASS, ENDPOINT_QR_GET, ENDPOINT_QR_VERIFY};

/// Capacidad HTTP usada por los ViewModels
#[allow(async_fn_in_trait)]
pub trait AdminApi {
    async fn login(&self, request: &LoginRequest) -> Result<ApiReply, ApiError>;
    async fn qr_status(&self, token: &str, request: &QrRequest) -> Result<ApiReply, ApiError>;
    async fn qr_verify(&self, token: &str, request: &QrRequest) -> Result<ApiReply, ApiError>;
    async fn give_pass(&self, token: &str, request: &SendPassRequest) -> Result<ApiReply, ApiError>;
}

/// Cliente API del navegador (fetch vía gloo-net)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.api_base_url.clone(),
        }
    }

    /// POST JSON con cookies incluidas y Bearer opcional
    async fn post_json<B: Serialize>(
        &self,
        endpoint: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<ApiReply, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        log::info!("🚀 [API] POST {}", endpoint);

        let mut builder = Request::post(&url).credentials(RequestCredentials::Include);
        if let Some(token) = token {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let response = builder
            .json(body)
            .map_err(|e| ApiError::Build(e.to_string()))?
            .send()
            .await
            .map_err(|e| {
                log::error!("❌ [API] POST {} falló: {}", endpoint, e);
                ApiError::Network(e.to_string())
            })?;

        let status = response.status();
        // Algunos endpoints responden sin body (p.ej. 201): body = None
        let body = response.json::<Value>().await.ok();

        if response.ok() {
            log::info!("✅ [API] {} POST {}", status, endpoint);
        } else {
            log::warn!("⚠️ [API] {} POST {}", status, endpoint);
        }

        Ok(ApiReply::new(status, body))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<ApiReply, ApiError> {
        self.post_json(ENDPOINT_ADMIN_LOGIN, None, request).await
    }

    async fn qr_status(&self, token: &str, request: &QrRequest) -> Result<ApiReply, ApiError> {
        self.post_json(ENDPOINT_QR_GET, Some(token), request).await
    }

    async fn qr_verify(&self, token: &str, request: &QrRequest) -> Result<ApiReply, ApiError> {
        self.post_json(ENDPOINT_QR_VERIFY, Some(token), request).await
    }

    async fn give_pass(&self, token: &str, request: &SendPassRequest) -> Result<ApiReply, ApiError> {
        self.post_json(ENDPOINT_GIVE_PASS, Some(token), request).await
    }
}
