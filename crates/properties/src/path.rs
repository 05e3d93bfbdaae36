//! Path resolution collaborator.
//!
//! Handlers never call a resolver themselves. File-kind handlers attach it to
//! the property's [`ValidatingValue`](crate::ValidatingValue) so resolution
//! runs only when the value is eventually read.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Resolves declared paths relative to a task or project context.
pub trait PathResolver: Send + Sync + fmt::Debug {
    /// Resolve a declared path.
    fn resolve(&self, path: &Path) -> PathBuf;
}

/// Resolves relative paths against a project root.
#[derive(Debug, Clone)]
pub struct ProjectPathResolver {
    project_root: PathBuf,
}

impl ProjectPathResolver {
    /// Create a resolver rooted at `project_root`.
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            project_root: project_root.as_ref().to_path_buf(),
        }
    }

    /// The root relative paths are joined onto.
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

impl PathResolver for ProjectPathResolver {
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&self.project_root.join(path))
        }
    }
}

/// Leaves paths untouched apart from lexical normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPathResolver;

impl PathResolver for IdentityPathResolver {
    fn resolve(&self, path: &Path) -> PathBuf {
        normalize(path)
    }
}

/// Lexically remove `.` and `..` components without touching the filesystem.
///
/// A `..` only cancels a preceding normal component. Leading `..` of a
/// relative path are kept; at the root of an absolute path they are dropped.
fn normalize(p: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in p.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if matches!(last, Some(Component::Normal(_))) {
                    out.pop();
                } else if !at_root {
                    out.push(Component::ParentDir.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_join_project_root() {
        let resolver = ProjectPathResolver::new("/work/project");
        assert_eq!(
            resolver.resolve(Path::new("build/classes")),
            PathBuf::from("/work/project/build/classes")
        );
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let resolver = ProjectPathResolver::new("/work/project");
        assert_eq!(
            resolver.resolve(Path::new("/tmp/out.txt")),
            PathBuf::from("/tmp/out.txt")
        );
    }

    #[test]
    fn test_dot_components_are_normalized() {
        let resolver = ProjectPathResolver::new("/work/project");
        assert_eq!(
            resolver.resolve(Path::new("./src/../build/./libs")),
            PathBuf::from("/work/project/build/libs")
        );
        assert_eq!(
            IdentityPathResolver.resolve(Path::new("a/./b/../c")),
            PathBuf::from("a/c")
        );
    }

    #[test]
    fn test_leading_parent_dirs_are_kept() {
        assert_eq!(
            IdentityPathResolver.resolve(Path::new("../shared/gen")),
            PathBuf::from("../shared/gen")
        );
        assert_eq!(
            IdentityPathResolver.resolve(Path::new("a/../../b")),
            PathBuf::from("../b")
        );
        assert_eq!(
            ProjectPathResolver::new("proj").resolve(Path::new("../../x")),
            PathBuf::from("../x")
        );
    }

    #[test]
    fn test_parent_dirs_stop_at_root() {
        assert_eq!(
            IdentityPathResolver.resolve(Path::new("/../etc/./hosts")),
            PathBuf::from("/etc/hosts")
        );
        let resolver = ProjectPathResolver::new("/work");
        assert_eq!(
            resolver.resolve(Path::new("../../../tmp")),
            PathBuf::from("/tmp")
        );
    }
}
