//! Path containment checks for file-backed providers

use crate::error::{ConfigError, Result};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Turns a path into its canonical, symlink-free absolute form.
///
/// Providers hold one of these so tests can swap the filesystem out.
pub trait PathResolver: Send + Sync {
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// Resolver backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalResolver;

impl PathResolver for CanonicalResolver {
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above a root; leading `..` of a relative path is kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Whether `candidate` is `root` or lies beneath it. Compares whole components,
/// so `/srv/conf-old` is not within `/srv/conf`.
pub fn is_within(root: &Path, candidate: &Path) -> bool {
    candidate.starts_with(root)
}

/// The sandbox boundary of a provider: either no restriction, or a canonical root
/// directory every resolved path must stay inside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootRestriction {
    root: Option<PathBuf>,
}

impl RootRestriction {
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Restrict to `root`, which is canonicalized once here and never changes afterward.
    pub fn new(root: &Path, resolver: &dyn PathResolver) -> Result<Self> {
        let canonical = resolver.canonicalize(root).map_err(|e| ConfigError::InvalidOption {
            key: "root".to_string(),
            reason: format!("cannot resolve {}: {}", root.display(), e),
        })?;
        Ok(Self { root: Some(canonical) })
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Resolve a provider path to the location that should be read.
    ///
    /// With a root, `path` is taken relative to it and must stay inside it both
    /// lexically and after symlink resolution. Without one, `path` is used as given.
    pub fn resolve(&self, path: &str, resolver: &dyn PathResolver) -> Result<PathBuf> {
        let Some(root) = &self.root else {
            return Ok(PathBuf::from(path));
        };

        let lexical = normalize_lexically(&root.join(path));
        if !is_within(root, &lexical) {
            return Err(Self::denied(path, root));
        }

        let canonical = resolver.canonicalize(&lexical).map_err(|e| ConfigError::io(&lexical, e))?;
        if !is_within(root, &canonical) {
            return Err(Self::denied(path, root));
        }
        Ok(canonical)
    }

    /// Check a location found while reading (e.g. a directory entry) against the root.
    pub fn check(&self, display: &str, location: &Path, resolver: &dyn PathResolver) -> Result<()> {
        let Some(root) = &self.root else {
            return Ok(());
        };
        let canonical = resolver.canonicalize(location).map_err(|e| ConfigError::io(location, e))?;
        if is_within(root, &canonical) {
            Ok(())
        } else {
            Err(Self::denied(display, root))
        }
    }

    fn denied(path: &str, root: &Path) -> ConfigError {
        tracing::warn!("Rejected config path '{}' outside of root {}", path, root.display());
        ConfigError::AccessDenied { path: path.to_string(), root: root.to_path_buf() }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{normalize_lexically, PathResolver};
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory resolver: every path exists, `links` maps symlink locations to targets.
    #[derive(Default)]
    pub(crate) struct FakeResolver {
        pub links: HashMap<PathBuf, PathBuf>,
        calls: AtomicUsize,
    }

    impl FakeResolver {
        pub fn with_link(mut self, link: &str, target: &str) -> Self {
            self.links.insert(PathBuf::from(link), PathBuf::from(target));
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PathResolver for FakeResolver {
        fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let path = normalize_lexically(path);
            for (link, target) in &self.links {
                if let Ok(rest) = path.strip_prefix(link) {
                    return Ok(normalize_lexically(&target.join(rest)));
                }
            }
            Ok(path)
        }
    }
}
