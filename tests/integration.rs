// SPDX-License-Identifier: MPL-2.0
use iced_studio::app::config::{self, Config, GeneralConfig, GenerationConfig};
use iced_studio::app::history::{History, HISTORY_LIMIT};
use iced_studio::domain::generation::{GenerationId, GenerationRecord, Style, StyleTag};
use iced_studio::i18n::fluent::I18n;
use iced_studio::ui::theming::ThemeMode;
use tempfile::tempdir;

fn record(n: usize) -> GenerationRecord {
    GenerationRecord::new(
        GenerationId::new(format!("gen_{n}")),
        "data:image/jpeg;base64,AAAA",
        format!("prompt {n}"),
        Style::Streetwear.into(),
        "2026-10-14T09:00:00.000Z",
    )
}

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let english = Config {
        general: GeneralConfig {
            language: Some("en-US".to_string()),
            theme_mode: ThemeMode::Light,
        },
        generation: GenerationConfig::default(),
    };
    config::save_to_path(&english, &path).expect("Failed to write initial config file");
    let loaded = config::load_from_path(&path).expect("Failed to load initial config");
    let i18n_en = I18n::new(None, &loaded);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");
    assert_eq!(i18n_en.tr("generate-button"), "Generate Image");

    let french = Config {
        general: GeneralConfig {
            language: Some("fr".to_string()),
            theme_mode: ThemeMode::Light,
        },
        generation: GenerationConfig::default(),
    };
    config::save_to_path(&french, &path).expect("Failed to write french config file");
    let loaded = config::load_from_path(&path).expect("Failed to load french config");
    let i18n_fr = I18n::new(None, &loaded);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");
    assert_eq!(i18n_fr.tr("generate-button"), "Générer l'image");
}

#[test]
fn test_cli_language_wins_over_config() {
    let config = Config {
        general: GeneralConfig {
            language: Some("fr".to_string()),
            ..GeneralConfig::default()
        },
        ..Config::default()
    };
    let i18n = I18n::new(Some("en-US".to_string()), &config);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn test_config_round_trip_through_directory_override() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let mut config = Config::default();
    config.generation.failure_rate = Some(0.0);
    config.generation.seed = Some(7);
    config.generation.default_style = Some("vintage".to_string());

    config::save_with_override(&config, Some(dir.path().to_path_buf()))
        .expect("Failed to save config");
    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));

    assert!(warning.is_none());
    assert_eq!(loaded, config);
    assert_eq!(loaded.generation.default_style(), StyleTag::new("vintage"));
}

#[test]
fn test_history_survives_restart_and_stays_bounded() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let base = Some(dir.path().to_path_buf());

    let mut history = History::default();
    for n in 0..HISTORY_LIMIT + 2 {
        history.prepend(record(n));
    }
    history.save_to(base.clone()).expect("Failed to save history");

    let reloaded = History::load_from(base);
    assert_eq!(reloaded.len(), HISTORY_LIMIT);
    assert_eq!(reloaded.entries()[0].id().as_str(), "gen_6");
    assert_eq!(reloaded, history);
}

#[test]
fn test_history_keeps_unknown_style_tags() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let base = Some(dir.path().to_path_buf());

    let mut history = History::default();
    history.prepend(GenerationRecord::new(
        GenerationId::new("gen_legacy"),
        "data:image/jpeg;base64,AAAA",
        "old entry",
        StyleTag::new("cyberpunk"),
        "2025-01-01T00:00:00.000Z",
    ));
    history.save_to(base.clone()).expect("Failed to save history");

    let reloaded = History::load_from(base);
    assert_eq!(reloaded.entries()[0].style().as_str(), "cyberpunk");
    assert!(reloaded.entries()[0].style().style().is_none());
}
