//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for safe, sandboxed env var and file manipulation.

use clue_config::ClueConfig;
use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

#[test]
fn loads_include_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[include]
system_dirs = ["/opt/sysroot/include"]
extra_dirs = ["vendor/include", "third_party"]
max_depth = 8
follow_system = false
"#,
        )?;

        let config: ClueConfig = Figment::from(Serialized::defaults(ClueConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(
            config.include.system_dirs,
            vec![PathBuf::from("/opt/sysroot/include")]
        );
        assert_eq!(config.include.extra_dirs.len(), 2);
        assert_eq!(config.include.max_depth, 8);
        assert!(!config.include.follow_system);
        // Untouched section keeps its defaults.
        assert_eq!(config.completion.timeout_ms, 2000);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[completion]
timeout_ms = 500
keywords = false
",
        )?;
        jail.set_env("CLUE_COMPLETION__TIMEOUT_MS", "750");

        let config: ClueConfig = Figment::from(Serialized::defaults(ClueConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("CLUE_").split("__"))
            .extract()?;

        assert_eq!(config.completion.timeout_ms, 750);
        assert!(!config.completion.keywords);
        Ok(())
    });
}

#[test]
fn project_layer_is_read_from_dot_clue() {
    Jail::expect_with(|jail| {
        jail.create_dir(".clue")?;
        jail.create_file(
            ".clue/config.toml",
            r"
[include]
max_depth = 4
",
        )?;

        let config = ClueConfig::load_for_project(Path::new(".")).expect("config loads");
        assert_eq!(config.include.max_depth, 4);
        Ok(())
    });
}

#[test]
fn invalid_values_are_rejected_on_load() {
    Jail::expect_with(|jail| {
        jail.set_env("CLUE_INCLUDE__MAX_DEPTH", "0");
        let err = ClueConfig::load_for_project(Path::new(".")).expect_err("depth 0 rejected");
        assert!(err.to_string().contains("max_depth"), "got: {err}");
        Ok(())
    });
}
