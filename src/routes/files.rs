//! File responders
//!
//! GET reads and POST writes files under a configured serving directory.
//! Urls resolve lexically and must stay inside the root; a missing or
//! restricted root means neither responder ever matches.

use anyhow::Context;
use std::path::{Component, Path, PathBuf};

use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::routes::chain::starts_with_ignore_case;

const PREFIX: &str = "/files/";

/// Serving directories under these prefixes are refused outright. A coarse
/// string-prefix guard, not a security boundary; containment of the
/// resolved path is what actually confines file access.
const RESTRICTED_ROOTS: [&str; 2] = ["/etc", "/sys"];

/// Shared state of the file GET/POST responders: the serving root.
#[derive(Clone, Debug)]
pub struct FileRoutes {
    root: Option<PathBuf>,
}

impl FileRoutes {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    fn usable_root(&self) -> Option<&Path> {
        let root = self.root.as_deref()?;
        if root_is_restricted(root) {
            None
        } else {
            Some(root)
        }
    }

    /// The filesystem path a `/files/...` url resolves to, if resolution
    /// stays inside the serving root.
    fn target(&self, url: &str) -> Option<PathBuf> {
        let root = self.usable_root()?;
        let suffix = url.get(PREFIX.len()..)?;
        resolve_within(root, suffix)
    }

    pub fn get_matches(&self, request: &Request) -> bool {
        request.method == Method::Get
            && starts_with_ignore_case(&request.url, PREFIX)
            && self.target(&request.url).is_some_and(|p| p.is_file())
    }

    pub fn get_respond(&self, request: &Request) -> anyhow::Result<Response> {
        let path = self
            .target(&request.url)
            .context("file url stopped resolving between match and respond")?;

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;

        Ok(ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "application/octet-stream")
            .header("Content-Length", contents.len().to_string())
            .body(contents.into_bytes())
            .build())
    }

    pub fn post_matches(&self, request: &Request) -> bool {
        request.method == Method::Post
            && starts_with_ignore_case(&request.url, PREFIX)
            && self.target(&request.url).is_some()
    }

    pub fn post_respond(&self, request: &Request) -> anyhow::Result<Response> {
        let path = self
            .target(&request.url)
            .context("file url stopped resolving between match and respond")?;

        std::fs::write(&path, request.body.as_bytes())
            .with_context(|| format!("writing {}", path.display()))?;

        Ok(Response::empty(StatusCode::Created))
    }
}

fn root_is_restricted(root: &Path) -> bool {
    let root = root.to_string_lossy();

    RESTRICTED_ROOTS.iter().any(|prefix| {
        root.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Joins `suffix` onto `root`, resolving `.` and `..` segments lexically.
/// Returns None when the suffix is absolute or a `..` would climb past the
/// root.
pub fn resolve_within(root: &Path, suffix: &str) -> Option<PathBuf> {
    let mut kept: Vec<&std::ffi::OsStr> = Vec::new();

    for component in Path::new(suffix).components() {
        match component {
            Component::Normal(part) => kept.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                kept.pop()?;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    let mut path = root.to_path_buf();
    for part in kept {
        path.push(part);
    }

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_stays_inside_root() {
        let root = Path::new("/srv/data");

        assert_eq!(
            resolve_within(root, "a/b.txt"),
            Some(PathBuf::from("/srv/data/a/b.txt"))
        );
        assert_eq!(
            resolve_within(root, "a/../b.txt"),
            Some(PathBuf::from("/srv/data/b.txt"))
        );
        assert_eq!(resolve_within(root, "../escape.txt"), None);
        assert_eq!(resolve_within(root, "a/../../escape.txt"), None);
        assert_eq!(resolve_within(root, "/absolute.txt"), None);
    }

    #[test]
    fn restricted_roots_are_prefix_matched() {
        assert!(root_is_restricted(Path::new("/etc")));
        assert!(root_is_restricted(Path::new("/etc/served")));
        assert!(root_is_restricted(Path::new("/SYS/kernel")));
        assert!(!root_is_restricted(Path::new("/srv/data")));
    }
}
