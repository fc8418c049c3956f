use figment::Jail;
use pretty_assertions::assert_eq;
use vin_config::VinConfig;

#[test]
fn external_overrides_fill_config_values() {
    Jail::expect_with(|_jail| {
        let overrides = vec![
            (
                "VINVENTORY_API__BASE_URL".to_string(),
                "https://override.example.com/api/v1".to_string(),
            ),
            ("VINVENTORY_API__TIMEOUT_SECS".to_string(), "12".to_string()),
        ];

        let config = VinConfig::load_with_env_overrides(&overrides).expect("config loads");
        assert_eq!(config.api.base_url, "https://override.example.com/api/v1");
        assert_eq!(config.api.timeout_secs, 12);
        Ok(())
    });
}

#[test]
fn process_env_beats_external_overrides() {
    Jail::expect_with(|jail| {
        jail.set_env("VINVENTORY_API__BASE_URL", "http://from-env/api/v1");
        let overrides = vec![(
            "VINVENTORY_API__BASE_URL".to_string(),
            "http://from-override/api/v1".to_string(),
        )];

        let config = VinConfig::load_with_env_overrides(&overrides).expect("config loads");
        assert_eq!(config.api.base_url, "http://from-env/api/v1");
        Ok(())
    });
}

#[test]
fn unprefixed_overrides_are_ignored() {
    Jail::expect_with(|_jail| {
        let overrides = vec![(
            "API__BASE_URL".to_string(),
            "http://ignored/api/v1".to_string(),
        )];

        let config = VinConfig::load_with_env_overrides(&overrides).expect("config loads");
        assert_eq!(config.api.base_url, "http://localhost:8080/api/v1");
        Ok(())
    });
}
