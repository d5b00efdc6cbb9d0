//! Front-end session: background execution and single-flight scheduling.
//!
//! Every subsystem call blocks for the lifetime of a `wsl.exe` process, so
//! the session runs discovery, creation and removal on tokio's blocking pool
//! and hands the result back when the task completes. At most one discovery
//! and one create/remove may be in flight; a second request fails fast with
//! [`ShortcutError::Busy`] instead of interleaving with the first.

use crate::cancel::CancellationToken;
use crate::config::Config;
use crate::custom::{CustomAppRegistrar, SubmitOutcome};
use crate::discovery::{AppDiscovery, DiscoveryReport};
use crate::distro::{DistroInfo, DistroResolver};
use crate::entry::{ApplicationEntry, EntrySource};
use crate::error::{Result, ShortcutError};
use crate::icon::IconConverter;
use crate::platform::CommandRunner;
use crate::shortcut::{BatchReport, LaunchSpec, ListOutcome, ShortcutManager, ShortcutWriter};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Marks an operation class as running until dropped.
struct FlightGuard {
    flag: Arc<AtomicBool>,
}

impl FlightGuard {
    fn acquire(flag: &Arc<AtomicBool>, operation: &str) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ShortcutError::Busy {
                operation: operation.to_string(),
            })?;
        Ok(Self { flag: flag.clone() })
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Run blocking work on the blocking pool and flatten join errors.
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ShortcutError::Other(format!("Background task failed: {}", e)))?
}

/// State shared by one front-end window.
pub struct Session {
    config: Arc<Config>,
    distro: std::result::Result<DistroInfo, String>,
    discovery: Arc<AppDiscovery>,
    shortcuts: Arc<ShortcutManager>,
    registrar: Arc<CustomAppRegistrar>,
    /// The selectable list: discovered entries first, then custom ones.
    entries: RwLock<Vec<ApplicationEntry>>,
    discovery_running: Arc<AtomicBool>,
    mutation_running: Arc<AtomicBool>,
    discovery_cancel: Mutex<CancellationToken>,
}

impl Session {
    /// Resolve the default distribution and assemble the components.
    ///
    /// A failed resolution does not fail the session; it leaves it in the
    /// disabled state reported by [`Session::distro`].
    pub async fn start(
        config: Arc<Config>,
        runner: Arc<dyn CommandRunner>,
        writer: Arc<dyn ShortcutWriter>,
    ) -> Self {
        let resolver = DistroResolver::new(config.clone(), runner.clone());
        let distro = match run_blocking(move || resolver.resolve()).await {
            Ok(info) => Ok(info),
            Err(e) => {
                error!("No WSL distribution found: {}", e);
                Err(e.to_string())
            }
        };
        Self::with_distro(config, runner, writer, distro)
    }

    /// Assemble a session around an already known resolution result.
    pub fn with_distro(
        config: Arc<Config>,
        runner: Arc<dyn CommandRunner>,
        writer: Arc<dyn ShortcutWriter>,
        distro: std::result::Result<DistroInfo, String>,
    ) -> Self {
        Self {
            discovery: Arc::new(AppDiscovery::new(config.clone(), runner)),
            shortcuts: Arc::new(ShortcutManager::new(config.clone(), writer)),
            registrar: Arc::new(CustomAppRegistrar::new(IconConverter::from_config(&config))),
            config,
            distro,
            entries: RwLock::new(Vec::new()),
            discovery_running: Arc::new(AtomicBool::new(false)),
            mutation_running: Arc::new(AtomicBool::new(false)),
            discovery_cancel: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The resolved distribution, or an environment error when none was found.
    pub fn distro(&self) -> Result<&DistroInfo> {
        self.distro.as_ref().map_err(|reason| {
            ShortcutError::environment(format!("No WSL distribution detected ({})", reason))
        })
    }

    /// Snapshot of the selectable list.
    pub async fn entries(&self) -> Vec<ApplicationEntry> {
        self.entries.read().await.clone()
    }

    /// Scan the distribution and replace the discovered part of the list.
    ///
    /// Custom entries already added are kept after the discovered ones.
    pub async fn discover(&self) -> Result<DiscoveryReport> {
        self.distro()?;

        // The flag and the token change under one lock so a concurrent
        // `cancel_discovery` always reaches the token of the running scan.
        let (guard, token) = {
            let mut current = self
                .discovery_cancel
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let guard = FlightGuard::acquire(&self.discovery_running, "discovery")?;
            *current = CancellationToken::new();
            (guard, current.clone())
        };

        info!("Scanning for WSL applications...");
        let discovery = self.discovery.clone();
        let report = run_blocking(move || {
            let _guard = guard;
            discovery.discover(&token)
        })
        .await?;

        let mut entries = self.entries.write().await;
        let custom: Vec<ApplicationEntry> = entries
            .drain(..)
            .filter(|e| e.source == EntrySource::Custom)
            .collect();
        *entries = report.entries.clone();
        entries.extend(custom);

        Ok(report)
    }

    /// Cancel a running discovery; a no-op when none is running.
    pub fn cancel_discovery(&self) {
        let token = self
            .discovery_cancel
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.discovery_running.load(Ordering::SeqCst) {
            debug!("Cancelling discovery");
        }
        token.cancel();
    }

    /// Validate a custom application and append it to the list.
    pub async fn add_custom(
        &self,
        name: String,
        invocation: String,
        icon_image: Option<PathBuf>,
    ) -> Result<SubmitOutcome> {
        let registrar = self.registrar.clone();
        let outcome =
            run_blocking(move || registrar.submit(&name, &invocation, icon_image.as_deref()))
                .await?;

        self.entries.write().await.push(outcome.entry.clone());
        Ok(outcome)
    }

    /// List existing shortcuts for the distribution.
    pub async fn list_shortcuts(&self) -> Result<ListOutcome> {
        let distro = self.distro()?.clone();
        let shortcuts = self.shortcuts.clone();
        run_blocking(move || shortcuts.list(&distro)).await
    }

    /// Launch description `create` would write for `entry`, and its destination.
    pub fn preview(&self, entry: &ApplicationEntry) -> Result<(LaunchSpec, PathBuf)> {
        let distro = self.distro()?;
        Ok((
            self.shortcuts.preview(distro, entry),
            self.shortcuts.shortcut_path(distro, entry),
        ))
    }

    /// Create shortcuts for the given entries.
    pub async fn create(
        &self,
        entries: Vec<ApplicationEntry>,
    ) -> Result<BatchReport<ApplicationEntry>> {
        let distro = self.distro()?.clone();
        let guard = FlightGuard::acquire(&self.mutation_running, "create/remove")?;

        let shortcuts = self.shortcuts.clone();
        run_blocking(move || {
            let _guard = guard;
            shortcuts.create(&distro, &entries)
        })
        .await
    }

    /// Remove shortcut files by name.
    pub async fn remove(&self, filenames: Vec<String>) -> Result<BatchReport<String>> {
        let distro = self.distro()?.clone();
        let guard = FlightGuard::acquire(&self.mutation_running, "create/remove")?;

        let shortcuts = self.shortcuts.clone();
        run_blocking(move || {
            let _guard = guard;
            Ok(shortcuts.remove(&distro, &filenames))
        })
        .await
    }

    /// Stop background work before the front-end goes away.
    pub fn shutdown(&self) {
        self.cancel_discovery();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}
