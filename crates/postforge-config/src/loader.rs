// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-based loader.
//!
//! Lookup order: `./postforge.toml` > `~/.config/postforge/postforge.toml` >
//! `/etc/postforge/postforge.toml`, with `POSTFORGE_` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PostforgeConfig;

pub(crate) const LOCAL_FILE: &str = "postforge.toml";
pub(crate) const SYSTEM_FILE: &str = "/etc/postforge/postforge.toml";

/// Sections that env keys may address, e.g. `POSTFORGE_QUEUE_BATCH_DELAY_MS`.
const ENV_SECTIONS: &[&str] = &["app", "remote", "generation", "retry", "queue", "metrics"];

pub(crate) fn user_file() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("postforge").join(LOCAL_FILE))
        .unwrap_or_default()
}

/// Build the full layered figment (defaults, system, user, local, env).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PostforgeConfig::default()))
        .merge(Toml::file(SYSTEM_FILE))
        .merge(Toml::file(user_file()))
        .merge(Toml::file(LOCAL_FILE))
        .merge(env_provider())
}

/// Load configuration from the standard hierarchy with env overrides.
pub fn load_config() -> Result<PostforgeConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from an inline TOML string (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PostforgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PostforgeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file, still honouring env overrides.
pub fn load_config_from_path(path: &Path) -> Result<PostforgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PostforgeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Environment provider mapping `POSTFORGE_<SECTION>_<KEY>` to `section.key`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `POSTFORGE_GENERATION_MAX_RETRIES` maps to `generation.max_retries`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("POSTFORGE_").map(|key| {
        let raw = key.as_str();
        ENV_SECTIONS
            .iter()
            .find_map(|section| {
                raw.strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| raw.to_string())
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("POSTFORGE_GENERATION_MAX_RETRIES", "5");
            jail.set_env("POSTFORGE_QUEUE_BATCH_DELAY_MS", "250");
            jail.set_env("POSTFORGE_REMOTE_PROVIDER_HINT", "anthropic");

            let config: PostforgeConfig = Figment::new()
                .merge(Serialized::defaults(PostforgeConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.generation.max_retries, 5);
            assert_eq!(config.queue.batch_delay_ms, 250);
            assert_eq!(config.remote.provider_hint, "anthropic");
            Ok(())
        });
    }

    #[test]
    fn local_file_is_picked_up() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_FILE,
                r#"
[generation]
timeout_secs = 30
"#,
            )?;
            let config = load_config()?;
            assert_eq!(config.generation.timeout_secs, 30);
            Ok(())
        });
    }

    #[test]
    fn inline_string_overrides_defaults_only_where_set() {
        let config = load_config_from_str("[queue]\nconcurrency = 3\n").unwrap();
        assert_eq!(config.queue.concurrency, 3);
        assert_eq!(config.queue.batch_delay_ms, 1000);
    }
}
