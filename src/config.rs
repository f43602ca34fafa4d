use serde::{Deserialize, Serialize};

use crate::utils::logging::parse_level;

const DEFAULT_API_BASE_URL: &str = "https://parsec.iitdh.ac.in/api/parsec/v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub environment: String,
    pub log_level: String,
    pub timers: TimerConfig,
}

/// Retardos visibles de la UI (ms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Espera antes de aceptar lecturas de la cámara (estabiliza el stream)
    pub scan_arm_delay_ms: u32,
    /// Tiempo para leer "session expired" antes del logout forzado
    pub session_expired_logout_delay_ms: u32,
    /// Cierre automático del modal de envío de pase tras éxito
    pub send_pass_auto_close_delay_ms: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            scan_arm_delay_ms: 1000,
            session_expired_logout_delay_ms: 1800,
            send_pass_auto_close_delay_ms: 2000,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            environment: "production".to_string(),
            log_level: "info".to_string(),
            timers: TimerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = TimerConfig::default();
        Self {
            api_base_url: option_env!("API_BASE_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("production").to_string(),
            log_level: option_env!("LOG_LEVEL")
                .unwrap_or("info").to_string(),
            timers: TimerConfig {
                scan_arm_delay_ms: option_env!("SCAN_ARM_DELAY_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.scan_arm_delay_ms),
                session_expired_logout_delay_ms: option_env!("SESSION_EXPIRED_LOGOUT_DELAY_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.session_expired_logout_delay_ms),
                send_pass_auto_close_delay_ms: option_env!("SEND_PASS_AUTO_CLOSE_DELAY_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.send_pass_auto_close_delay_ms),
            },
        }
    }

    /// Nivel de log configurado (`None` = desactivado)
    pub fn log_level(&self) -> Option<log::Level> {
        parse_level(&self.log_level)
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
