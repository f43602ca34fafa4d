// ============================================================================
// ERRORES - Tipos de error de las capas de servicio y storage
// ============================================================================
// Los ViewModels nunca muestran estos errores tal cual: los traducen a
// mensajes para el operador.
// ============================================================================

use thiserror::Error;

/// Errores del cliente HTTP (antes de tener un status de respuesta)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("request build error: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
}

/// Errores de sessionStorage
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    #[error("error escribiendo '{key}': {reason}")]
    Write { key: String, reason: String },
}
