use std::{collections::HashMap, fs};

use tracing::warn;

pub const SETTINGS_FILE: &str = "predict-server.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_bind: String,
    pub allowed_origin: String,
    pub max_upload_bytes: usize,
    pub min_usable_frames: usize,
    pub stub_frame_count: usize,
    pub stub_frame_score: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "0.0.0.0:5001".into(),
            allowed_origin: "http://localhost:5173".into(),
            max_upload_bytes: 256 * 1024 * 1024,
            min_usable_frames: 5,
            stub_frame_count: 30,
            stub_frame_score: 0.8,
        }
    }
}

/// Defaults, then `predict-server.toml`, then `APP__*` environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

pub(crate) fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, toml::Value>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(error) => {
            warn!(file = SETTINGS_FILE, %error, "ignoring unreadable settings file");
            return;
        }
    };

    for (key, value) in file_cfg {
        let value = match value {
            toml::Value::String(v) => v,
            other => other.to_string(),
        };
        apply_key(settings, &key, &value);
    }
}

pub(crate) fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    for key in [
        "bind_addr",
        "allowed_origin",
        "max_upload_bytes",
        "min_usable_frames",
        "stub_frame_count",
        "stub_frame_score",
    ] {
        if let Some(value) = lookup(&format!("APP__{}", key.to_ascii_uppercase())) {
            apply_key(settings, key, &value);
        }
    }
}

fn apply_key(settings: &mut Settings, key: &str, value: &str) {
    let value = value.trim();
    let applied = match key {
        "bind_addr" => {
            settings.server_bind = value.to_string();
            true
        }
        "allowed_origin" => {
            settings.allowed_origin = value.to_string();
            true
        }
        "max_upload_bytes" => parse_into(value, &mut settings.max_upload_bytes),
        "min_usable_frames" => parse_into(value, &mut settings.min_usable_frames),
        "stub_frame_count" => parse_into(value, &mut settings.stub_frame_count),
        "stub_frame_score" => parse_into(value, &mut settings.stub_frame_score),
        _ => {
            warn!(key, "unknown setting ignored");
            return;
        }
    };
    if !applied {
        warn!(key, value, "setting has an invalid value; keeping previous");
    }
}

fn parse_into<T: std::str::FromStr>(value: &str, slot: &mut T) -> bool {
    match value.parse::<T>() {
        Ok(parsed) => {
            *slot = parsed;
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
