use super::*;

#[test]
fn default_config_uses_tab_and_restaurant_marker() -> Result<()> {
    let fmt = AppConfig::default().menu_format()?;
    assert_eq!(fmt.delimiter, '\t');
    assert_eq!(fmt.header_marker, "餐厅");
    Ok(())
}

#[test]
fn delimiter_must_be_one_char() {
    for bad in ["", "ab", "\t\t"] {
        let cfg = AppConfig {
            delimiter: bad.to_string(),
            ..AppConfig::default()
        };
        assert!(cfg.menu_format().is_err(), "accepted {:?}", bad);
    }

    let cfg = AppConfig {
        delimiter: "｜".to_string(),
        ..AppConfig::default()
    };
    assert!(cfg.menu_format().is_ok());
}

#[test]
fn empty_object_deserializes_to_defaults() -> Result<()> {
    let cfg: AppConfig = serde_json::from_str("{}")?;
    assert_eq!(cfg, AppConfig::default());
    Ok(())
}
