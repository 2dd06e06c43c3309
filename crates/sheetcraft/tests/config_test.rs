//! Tests for layered configuration loading.

use sheetcraft::{GenerationMode, SheetcraftConfig};
use std::io::Write;

fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[test]
fn missing_file_yields_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = SheetcraftConfig::load_from(&dir.path().join("absent.toml"))?;
    assert_eq!(config.request_timeout_secs(), &60);
    assert_eq!(config.default_mode(), &GenerationMode::Ai);
    Ok(())
}

#[test]
fn file_values_are_read() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(
        file,
        r#"
relay_base_url = "https://worksheets.example.org"
temperature = 0.5
default_mode = "fast"
"#
    )?;

    let config = SheetcraftConfig::load_from(file.path())?;
    assert!(config.relay_enabled());
    assert_eq!(
        config.relay_base_url().as_deref(),
        Some("https://worksheets.example.org")
    );
    assert_eq!(config.temperature(), &0.5);
    assert_eq!(config.default_mode(), &GenerationMode::Fast);
    Ok(())
}

#[test]
fn environment_overrides_file() -> anyhow::Result<()> {
    let config = SheetcraftConfig::from_toml_str(
        "request_timeout_secs = 30\nuse_relay = true",
        env(&[
            ("SHEETCRAFT_REQUEST_TIMEOUT_SECS", "5"),
            ("SHEETCRAFT_USE_RELAY", "false"),
        ]),
    )?;
    assert_eq!(config.request_timeout_secs(), &5);
    assert!(!config.use_relay());
    Ok(())
}

#[test]
fn malformed_relay_url_is_rejected() {
    let err = SheetcraftConfig::from_toml_str("relay_base_url = \"localhost:8080\"", None)
        .unwrap_err();
    assert!(err.message.contains("relay_base_url"));
}

#[test]
fn out_of_range_temperature_is_rejected() {
    let err = SheetcraftConfig::from_toml_str("temperature = 3.5", None).unwrap_err();
    assert!(err.message.contains("temperature"));
}

#[test]
fn wrong_type_is_a_config_error() {
    let err = SheetcraftConfig::from_toml_str("request_timeout_secs = \"soon\"", None)
        .unwrap_err();
    assert!(err.message.contains("Failed to load configuration"));
}
