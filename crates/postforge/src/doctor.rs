// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `postforge doctor`: health checks for the configured generator and library.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use colored::Colorize;
use postforge_config::PostforgeConfig;
use postforge_core::{HealthStatus, PluginAdapter, PostforgeError};
use postforge_library::JsonLibrary;

use crate::generate::remote_generator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of one adapter check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn failed(name: &str, err: &PostforgeError, started: Instant) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Fail,
            message: err.to_string(),
            duration: started.elapsed(),
        }
    }

    fn render(&self, use_color: bool) -> String {
        let duration_ms = self.duration.as_millis();
        let (tag, message) = match (self.status, use_color) {
            (CheckStatus::Pass, false) => ("[OK]  ".to_string(), self.message.clone()),
            (CheckStatus::Warn, false) => ("[WARN]".to_string(), self.message.clone()),
            (CheckStatus::Fail, false) => ("[FAIL]".to_string(), self.message.clone()),
            (CheckStatus::Pass, true) => ("✓".green().to_string(), self.message.clone()),
            (CheckStatus::Warn, true) => ("!".yellow().to_string(), self.message.yellow().to_string()),
            (CheckStatus::Fail, true) => ("✗".red().to_string(), self.message.red().to_string()),
        };
        format!("    {tag} {:<34} {message} ({duration_ms}ms)", self.name)
    }
}

/// Run `health_check` on one adapter and label it with its name, version and role.
pub async fn check_adapter<A: PluginAdapter + ?Sized>(adapter: &A) -> CheckResult {
    let started = Instant::now();
    let name = format!(
        "{} {} {}",
        adapter.adapter_type().to_string().to_lowercase(),
        adapter.name(),
        adapter.version()
    );
    let (status, message) = match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => (CheckStatus::Pass, "healthy".to_string()),
        Ok(HealthStatus::Degraded(reason)) => (CheckStatus::Warn, reason),
        Ok(HealthStatus::Unhealthy(reason)) => (CheckStatus::Fail, reason),
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };
    CheckResult {
        name,
        status,
        message,
        duration: started.elapsed(),
    }
}

/// Checks for every adapter the config wires up. Adapters that cannot be
/// constructed are reported as failures.
pub async fn collect_checks(config: &PostforgeConfig) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let started = Instant::now();
    match remote_generator(config) {
        Ok(generator) => results.push(check_adapter(generator.as_ref()).await),
        Err(e) => results.push(CheckResult::failed("generator", &e, started)),
    }

    let started = Instant::now();
    match JsonLibrary::open(&config.app.library_path).await {
        Ok(library) => results.push(check_adapter(&library).await),
        Err(e) => results.push(CheckResult::failed("store", &e, started)),
    }

    results
}

/// Print every check. Fails when any check failed; warnings only change the summary.
pub async fn run_doctor(config: &PostforgeConfig) -> Result<(), PostforgeError> {
    let use_color = std::io::stdout().is_terminal();
    let results = collect_checks(config).await;

    println!();
    println!("  postforge doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", result.render(use_color));
    }
    println!();

    let failed = results.iter().filter(|r| r.status == CheckStatus::Fail).count();
    let warned = results.iter().filter(|r| r.status == CheckStatus::Warn).count();
    match failed + warned {
        0 => println!("  All checks passed."),
        1 => println!("  1 issue found."),
        n => println!("  {n} issues found."),
    }

    if failed > 0 {
        return Err(PostforgeError::Internal(format!("{failed} health check(s) failed")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use postforge_core::AdapterType;

    use crate::offline::OfflineGenerator;

    struct Broken;

    #[async_trait]
    impl PluginAdapter for Broken {
        fn name(&self) -> &str {
            "broken"
        }
        fn version(&self) -> semver::Version {
            semver::Version::new(2, 1, 0)
        }
        fn adapter_type(&self) -> AdapterType {
            AdapterType::Notifier
        }
        async fn health_check(&self) -> Result<HealthStatus, PostforgeError> {
            Ok(HealthStatus::Unhealthy("socket closed".into()))
        }
    }

    fn config_in(dir: &std::path::Path) -> PostforgeConfig {
        let mut config = PostforgeConfig::default();
        config.app.library_path = dir.join("library.json").display().to_string();
        config
    }

    #[tokio::test]
    async fn offline_generator_is_a_warning() {
        let result = check_adapter(&OfflineGenerator).await;
        assert_eq!(result.status, CheckStatus::Warn);
        assert_eq!(result.name, "generator offline 0.1.0");
        assert_eq!(result.message, "no remote endpoint configured");
    }

    #[tokio::test]
    async fn unhealthy_adapter_fails() {
        let result = check_adapter(&Broken).await;
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.name, "notifier broken 2.1.0");
        let line = result.render(false);
        assert!(line.starts_with("    [FAIL] notifier broken 2.1.0"));
        assert!(line.contains("socket closed"));
    }

    #[tokio::test]
    async fn default_config_checks_generator_and_store() {
        let dir = tempfile::tempdir().unwrap();
        let results = collect_checks(&config_in(dir.path())).await;
        assert_eq!(results.len(), 2);
        assert!(results[0].name.starts_with("generator offline"));
        assert_eq!(results[0].status, CheckStatus::Warn);
        assert!(results[1].name.starts_with("store"));
        assert_eq!(results[1].status, CheckStatus::Pass);
    }

    #[tokio::test]
    async fn unreadable_library_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("library.json"), "{ not json").unwrap();
        let results = collect_checks(&config_in(dir.path())).await;
        assert_eq!(results[1].name, "store");
        assert_eq!(results[1].status, CheckStatus::Fail);
        assert!(run_doctor(&config_in(dir.path())).await.is_err());
    }
}
