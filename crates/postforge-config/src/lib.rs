// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Postforge generation pipeline.
//!
//! TOML files layered through figment with `POSTFORGE_*` environment
//! overrides, strict key checking, post-load validation, and miette
//! rendering of every problem found.
//!
//! ```no_run
//! let config = postforge_config::load_and_validate().expect("config errors");
//! println!("timeout: {}s", config.generation.timeout_secs);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::PostforgeConfig;

/// Load from the standard hierarchy and validate.
pub fn load_and_validate() -> Result<PostforgeConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &read_hierarchy_sources(),
        )),
    }
}

/// Load one explicit file (plus env overrides) and validate.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<PostforgeConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources: Vec<(String, String)> = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load an inline TOML string and validate.
pub fn load_and_validate_str(toml_content: &str) -> Result<PostforgeConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Contents of whichever hierarchy files exist, keyed the way figment reports them.
fn read_hierarchy_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(loader::LOCAL_FILE))
        .unwrap_or_else(|_| loader::LOCAL_FILE.into());
    [
        local,
        loader::user_file(),
        std::path::PathBuf::from(loader::SYSTEM_FILE),
    ]
    .into_iter()
    .filter_map(|path| {
        std::fs::read_to_string(&path)
            .ok()
            .map(|content| (path.display().to_string(), content))
    })
    .collect()
}
