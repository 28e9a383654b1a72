use anyhow::Result;
use portfolio_site::config::toml_config::PortfolioConfig;
use portfolio_site::utils::validation::Validate;
use portfolio_site::{render_page, SiteError, Theme, ViewState};
use tempfile::TempDir;

#[test]
fn test_bundled_portfolio_toml_loads() -> Result<()> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/portfolio.toml");
    let (config, data) = PortfolioConfig::load(path)?;

    assert_eq!(config.theme(), None);
    assert!(config.delivery.is_none());
    assert_eq!(data.projects.len(), 2);
    assert_eq!(data.about.skills[0], "Rust");

    let html = render_page(&data, &ViewState::with_theme(Theme::Light));
    assert!(html.contains(">Rust</span>"));
    assert!(!html.contains("Portfolio Website"));
    Ok(())
}

#[test]
fn test_load_rejects_invalid_content() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(
        &path,
        r#"
[social_links]
github = "github.com/no-scheme"
linkedin = "https://linkedin.com/in/x"
twitter = "https://twitter.com/x"
"#,
    )
    .unwrap();

    let err = PortfolioConfig::load(&path).unwrap_err();
    match err {
        SiteError::InvalidConfigValueError { field, .. } => {
            assert_eq!(field, "social_links.github")
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = PortfolioConfig::load(temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SiteError::IoError(_)));
    assert_eq!(
        err.recovery_suggestion(),
        "Check that the path exists and is writable"
    );
}

#[test]
fn test_dark_preference_and_delivery_section() {
    let config = PortfolioConfig::from_toml_str(
        r#"
[site]
prefers_dark = true

[delivery]
webhook_url = "https://hooks.example.com/contact"
timeout_seconds = 3
"#,
    )
    .unwrap();

    assert_eq!(config.theme(), Some(Theme::Dark));
    assert!(config.validate().is_ok());
    let delivery = config.delivery.unwrap();
    assert_eq!(delivery.timeout(), std::time::Duration::from_secs(3));
}

#[test]
fn test_explicit_light_preference_is_kept() {
    let config = PortfolioConfig::from_toml_str(
        r#"
[site]
prefers_dark = false
"#,
    )
    .unwrap();

    assert_eq!(config.theme(), Some(Theme::Light));
}
