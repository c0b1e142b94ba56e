use price_alert::{AlertManager, AppError, PipelineConfig};
use std::io::Write;

fn write_config(contents: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(contents.as_bytes())
        .unwrap();
    (dir, path.to_string_lossy().into_owned())
}

#[test]
fn test_legacy_config_builds_a_manager() -> anyhow::Result<()> {
    let (_dir, path) = write_config(
        r#"{
            "email_sender": "alerts@example.com",
            "email_password": "app-password",
            "email_receiver": "me@example.com",
            "price_threshold": 20,
            "smtp_server": "smtp.zoho.com",
            "smtp_port": 465
        }"#,
    );

    let config = PipelineConfig::load(&path)?;
    assert!(AlertManager::from_config(&config).is_ok());

    Ok(())
}

#[test]
fn test_bad_selector_fails_startup() {
    let (_dir, path) = write_config(
        r#"{
            "sender_address": "alerts@example.com",
            "sender_credential": "app-password",
            "receiver_address": "me@example.com",
            "mail_host": "smtp.example.com",
            "mail_port": 465,
            "price_threshold": 20,
            "catalogue": { "selectors": { "price": "p..price" } }
        }"#,
    );

    let config = PipelineConfig::load(&path).unwrap();
    let result = AlertManager::from_config(&config);
    assert!(matches!(result, Err(AppError::Selector { .. })));
}

#[test]
fn test_url_template_without_placeholder_fails_startup() {
    let (_dir, path) = write_config(
        r#"{
            "sender_address": "alerts@example.com",
            "sender_credential": "app-password",
            "receiver_address": "me@example.com",
            "mail_host": "smtp.example.com",
            "mail_port": 465,
            "price_threshold": 20,
            "catalogue": { "url_template": "http://books.toscrape.com/index.html" }
        }"#,
    );

    let config = PipelineConfig::load(&path).unwrap();
    let result = AlertManager::from_config(&config);
    assert!(matches!(result, Err(AppError::UrlTemplate { .. })));
}

#[test]
fn test_missing_threshold_fails_startup() {
    let (_dir, path) = write_config(
        r#"{
            "sender_address": "alerts@example.com",
            "sender_credential": "app-password",
            "receiver_address": "me@example.com",
            "mail_host": "smtp.example.com",
            "mail_port": 465
        }"#,
    );

    let err = PipelineConfig::load(&path).unwrap_err();
    let app_err: AppError = err.into();
    assert!(app_err.to_string().contains("price_threshold"));
}
