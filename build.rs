use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Variables de .env (API_BASE_URL, LOG_LEVEL, retardos...) -> option_env!
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    // El entorno del proceso tiene prioridad sobre .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Using built-in defaults (production API). Copy .env.example to .env to override.");
    }

    for key in [
        "API_BASE_URL",
        "ENVIRONMENT",
        "LOG_LEVEL",
        "SCAN_ARM_DELAY_MS",
        "SESSION_EXPIRED_LOGOUT_DELAY_MS",
        "SEND_PASS_AUTO_CLOSE_DELAY_MS",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
}
