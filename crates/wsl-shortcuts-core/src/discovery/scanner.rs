//! Manifest scanning through the subsystem.

use super::manifest::{extract_display_name, parse_batched_listing};
use crate::cancel::CancellationToken;
use crate::config::{Config, DiscoveryMode};
use crate::entry::ApplicationEntry;
use crate::error::{Result, ShortcutError};
use crate::platform::process::describe_command;
use crate::platform::CommandRunner;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a discovery run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryReport {
    /// Entries in scan order.
    pub entries: Vec<ApplicationEntry>,
    /// Search patterns whose listing command failed.
    pub failed_locations: Vec<String>,
}

impl DiscoveryReport {
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// User-facing warning when nothing was found.
    pub fn warning(&self) -> Option<&'static str> {
        if self.entries.is_empty() {
            Some("No WSL applications found. Try installing some GUI applications in WSL.")
        } else {
            None
        }
    }
}

/// Scans the distribution for desktop manifests.
pub struct AppDiscovery {
    config: Arc<Config>,
    runner: Arc<dyn CommandRunner>,
}

impl AppDiscovery {
    pub fn new(config: Arc<Config>, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    /// Scan every configured search location.
    ///
    /// A location whose listing fails is recorded and skipped, and a manifest
    /// without a display name is dropped. The only error is cancellation.
    pub fn discover(&self, cancel: &CancellationToken) -> Result<DiscoveryReport> {
        let mut report = DiscoveryReport::default();

        for pattern in &self.config.search_patterns {
            cancel.check()?;

            let found = match self.config.discovery_mode {
                DiscoveryMode::PerManifest => self.scan_per_manifest(pattern, cancel),
                DiscoveryMode::Batched => self.scan_batched(pattern),
            };

            match found {
                Ok(entries) => report.entries.extend(entries),
                Err(ShortcutError::Cancelled) => return Err(ShortcutError::Cancelled),
                Err(e) => {
                    warn!("Skipping search location {}: {}", pattern, e);
                    report.failed_locations.push(pattern.clone());
                }
            }
        }

        if report.entries.is_empty() {
            warn!("No applications found in WSL");
        } else {
            info!("Found {} WSL application(s)", report.count());
        }

        Ok(report)
    }

    fn wsl(&self, args: Vec<String>) -> Result<crate::platform::CommandOutput> {
        let command = describe_command(&self.config.wsl_executable, &args);
        debug!("Executing command: {}", command);
        self.runner
            .run(&self.config.wsl_executable, &args)?
            .into_checked(&command)
    }

    fn scan_per_manifest(
        &self,
        pattern: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<ApplicationEntry>> {
        let listing = self.wsl(vec!["--".into(), "ls".into(), pattern.to_string()])?;

        let mut entries = Vec::new();
        for path in listing
            .stdout_text()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
        {
            cancel.check()?;

            match self.read_display_name(path) {
                Ok(Some(name)) => {
                    debug!("Adding item: {} ({})", name, path);
                    entries.push(ApplicationEntry::discovered(name, path));
                }
                Ok(None) => debug!("No display name in {}", path),
                Err(e) => warn!("Failed to read {}: {}", path, e),
            }
        }

        Ok(entries)
    }

    fn read_display_name(&self, manifest_path: &str) -> Result<Option<String>> {
        let script = format!(
            "cat \"{}\" | grep \"^{}\" | head -n 1",
            manifest_path, self.config.name_key
        );
        let output = self.wsl(vec![
            "--".into(),
            self.config.linux_shell.clone(),
            "-c".into(),
            script,
        ])?;

        Ok(extract_display_name(
            &output.stdout_text(),
            &self.config.name_key,
        ))
    }

    fn scan_batched(&self, pattern: &str) -> Result<Vec<ApplicationEntry>> {
        let key = &self.config.name_key;
        let script = format!(
            "for f in {pattern}; do [ -f \"$f\" ] || continue; \
             n=$(grep -m 1 \"^{key}\" \"$f\"); \
             printf '%s\\t%s\\n' \"$f\" \"${{n#{key}}}\"; done"
        );
        let output = self.wsl(vec![
            "--".into(),
            self.config.linux_shell.clone(),
            "-c".into(),
            script,
        ])?;

        Ok(parse_batched_listing(&output.stdout_text())
            .into_iter()
            .map(|(path, name)| ApplicationEntry::discovered(name, path))
            .collect())
    }
}
