use figment::Jail;
use pretty_assertions::assert_eq;
use vit_config::VitConfig;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("VITRINE_DATABASE__PATH", "/var/lib/vitrine/app.db");
        jail.set_env("VITRINE_STORAGE__BUCKET", "media");
        jail.set_env("VITRINE_MAIL__API_URL", "https://mail.example/send");
        jail.set_env("VITRINE_MAIL__API_KEY", "mk_123");
        jail.set_env("VITRINE_JOBS__WORKERS", "4");

        let config = VitConfig::load().expect("config loads");
        assert_eq!(config.database.path, "/var/lib/vitrine/app.db");
        assert_eq!(config.storage.bucket, "media");
        assert!(config.mail.is_configured());
        assert_eq!(config.jobs.workers, 4);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file("vitrine.toml", "[server]\nadmin_token = \"from-file\"\n")?;
        jail.set_env("VITRINE_SERVER__ADMIN_TOKEN", "from-env");

        let config = VitConfig::load().expect("config loads");
        assert_eq!(config.server.admin_token, "from-env");
        Ok(())
    });
}

#[test]
fn env_list_uses_array_syntax() {
    Jail::expect_with(|jail| {
        jail.set_env(
            "VITRINE_WEBHOOKS__URLS",
            r#"["https://a.example/hook", "https://b.example/hook"]"#,
        );

        let config = VitConfig::load().expect("config loads");
        assert_eq!(
            config.webhooks.urls,
            vec![
                "https://a.example/hook".to_string(),
                "https://b.example/hook".to_string()
            ]
        );
        Ok(())
    });
}

#[test]
fn log_filter_variable_is_ignored_by_config() {
    Jail::expect_with(|jail| {
        jail.set_env("VITRINE_LOG", "debug");
        assert!(VitConfig::load().is_ok());
        Ok(())
    });
}
