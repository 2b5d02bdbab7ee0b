//! Picks the database file a call targets

use std::path::{Path, PathBuf};

/// Expand a leading `~` and make the path absolute
///
/// Existing paths are canonicalized; missing ones are joined onto the
/// current directory so the executor can report them by full path.
pub fn expand_path(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    let expanded = match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        (None, Some(home)) if path == "~" => home,
        _ => PathBuf::from(path),
    };

    if let Ok(canonical) = expanded.canonicalize() {
        return canonical;
    }
    if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    }
}

/// Resolve the database for one call
///
/// A non-blank per-call path always wins; otherwise the process default is
/// used. `None` means nothing is configured.
pub fn resolve_database_path(per_call: Option<&str>, default: Option<&Path>) -> Option<PathBuf> {
    match per_call.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => Some(expand_path(path)),
        None => default.map(Path::to_path_buf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_override_wins() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.db");
        std::fs::write(&file, b"").unwrap();
        let default = PathBuf::from("/somewhere/else.db");

        let resolved =
            resolve_database_path(Some(file.to_str().unwrap()), Some(&default)).unwrap();
        assert_eq!(resolved, file.canonicalize().unwrap());
    }

    #[test]
    fn test_falls_back_to_default() {
        let default = PathBuf::from("/data/default.db");
        assert_eq!(
            resolve_database_path(None, Some(&default)),
            Some(default.clone())
        );
        assert_eq!(
            resolve_database_path(Some("   "), Some(&default)),
            Some(default)
        );
    }

    #[test]
    fn test_absent_when_nothing_configured() {
        assert_eq!(resolve_database_path(None, None), None);
        assert_eq!(resolve_database_path(Some(""), None), None);
    }

    #[test]
    fn test_home_expansion() {
        if let Some(home) = dirs::home_dir() {
            let resolved = expand_path("~/definitely-not-here-sqlite-mcp.db");
            assert_eq!(resolved, home.join("definitely-not-here-sqlite-mcp.db"));
        }
    }

    #[test]
    fn test_relative_becomes_absolute() {
        let resolved = expand_path("relative/missing.db");
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("relative/missing.db"));
    }
}
