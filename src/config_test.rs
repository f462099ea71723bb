use super::*;

#[test]
fn defaults_match_page_contract() {
    let config = ThemeConfig::default();
    assert_eq!(config.storage_key, "avatar-theme-preference");
    assert_eq!(config.theme_attribute, "data-theme");
    assert_eq!(config.meta_selector, r#"meta[name="theme-color"]"#);
    assert_eq!(config.toggle_selector, ".hero__theme-toggle");
    assert_eq!(config.change_event, "themechange");
    assert!(config.validate().is_ok());
}

#[test]
fn palette_colors_per_theme() {
    let palette = ThemePalette::default();
    assert_eq!(palette.color_for(Theme::Dark), "#060641");
    assert_eq!(palette.color_for(Theme::Light), "#f5f7fa");
}

#[test]
fn palette_falls_back_to_dark_color() {
    let palette = ThemePalette { dark: "#000000".to_owned(), light: None };
    assert_eq!(palette.color_for(Theme::Light), "#000000");
}

#[test]
fn from_json_fills_missing_fields_with_defaults() {
    let config = ThemeConfig::from_json(r#"{"storage_key":"site-theme"}"#).unwrap();
    assert_eq!(config.storage_key, "site-theme");
    assert_eq!(config.theme_attribute, "data-theme");
    assert_eq!(config.palette, ThemePalette::default());
}

#[test]
fn from_json_partial_palette_keeps_other_default() {
    let config = ThemeConfig::from_json(r##"{"palette":{"dark":"#111111"}}"##).unwrap();
    assert_eq!(config.palette.dark, "#111111");
    assert_eq!(config.palette.light.as_deref(), Some("#f5f7fa"));
}

#[test]
fn from_json_null_light_color_uses_dark() {
    let config = ThemeConfig::from_json(r##"{"palette":{"dark":"#111111","light":null}}"##).unwrap();
    assert_eq!(config.palette.color_for(Theme::Light), "#111111");
}

#[test]
fn from_json_rejects_malformed_input() {
    let err = ThemeConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("invalid theme config"));
}

#[test]
fn from_json_rejects_empty_required_field() {
    let err = ThemeConfig::from_json(r#"{"theme_attribute":"  "}"#).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyField("theme_attribute")));
}

#[test]
fn empty_selectors_are_allowed() {
    let config = ThemeConfig::from_json(r#"{"toggle_selector":"","meta_selector":""}"#).unwrap();
    assert!(config.toggle_selector.is_empty());
}

#[test]
fn from_optional_json_defaults_on_none_or_blank() {
    assert_eq!(ThemeConfig::from_optional_json(None).unwrap(), ThemeConfig::default());
    assert_eq!(ThemeConfig::from_optional_json(Some("   ")).unwrap(), ThemeConfig::default());
    let custom = ThemeConfig::from_optional_json(Some(r#"{"change_event":"modechange"}"#)).unwrap();
    assert_eq!(custom.change_event, "modechange");
}
