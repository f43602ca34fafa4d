use wasm_logger::Config;

/// Inicializar el logger una sola vez. `None` = logging desactivado.
pub fn init(level: Option<log::Level>) {
    match level {
        Some(level) => {
            wasm_logger::init(Config::new(level));
            log::info!("📝 [LOG] Logger inicializado (nivel {})", level);
        }
        None => log::set_max_level(log::LevelFilter::Off),
    }
}

/// Parsear el nivel configurado ("off" desactiva)
pub fn parse_level(raw: &str) -> Option<log::Level> {
    match raw.trim().to_lowercase().as_str() {
        "off" | "none" | "false" => None,
        other => other.parse().ok().or(Some(log::Level::Info)),
    }
}
