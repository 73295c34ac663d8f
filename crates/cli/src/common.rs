//! Common utilities and types shared across CLI commands

use anyhow::{Context, Result};
use hookah_config::{Config, Layout, find_repository_root};
use hookah_core::{RealSystem, System};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Runtime context for CLI commands
///
/// Built once at startup and passed by reference to every command, so no
/// command reads configuration on its own.
///
/// # Examples
///
/// ```no_run
/// use hookah::common::RuntimeContext;
///
/// let cwd = std::env::current_dir()?;
/// let context = RuntimeContext::new(&cwd, None)?;
/// println!("{}", context.layout.source_dir().display());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct RuntimeContext {
    /// Effective configuration (file values with overrides applied)
    pub config: Arc<Config>,
    /// Resolved paths
    pub layout: Layout,
    system: RealSystem,
}

impl RuntimeContext {
    /// Discover the repository from `start` and load its configuration
    ///
    /// `source_dir` comes from `--source-dir` or `HOOKAH_SOURCE_DIR` and wins
    /// over `hookah.yml`.
    pub fn new(start: &Path, source_dir: Option<PathBuf>) -> Result<Self> {
        let system = RealSystem;
        let root = find_repository_root(&system, start)?;

        let config = Config::load(&system, &root)
            .context("Failed to load configuration")?
            .with_source_dir(source_dir);
        let layout = Layout::new(root, &config);

        tracing::debug!(
            root = %layout.root().display(),
            source_dir = %layout.source_dir().display(),
            "Resolved repository layout"
        );

        Ok(Self {
            config: Arc::new(config),
            layout,
            system,
        })
    }

    /// Filesystem commands operate on
    #[inline]
    pub fn system(&self) -> &dyn System {
        &self.system
    }

    /// Repository root
    #[inline]
    pub fn root(&self) -> &Path {
        self.layout.root()
    }
}
