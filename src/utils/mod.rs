pub mod levenshtein;

use std::path::{Path, PathBuf};

use directories::BaseDirs;

/// Get a user-friendly display string for a path.
/// Paths under the home directory are shown with a leading `~` on Unix-like
/// systems.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(dirs) = BaseDirs::new() {
            if let Ok(relative) = path.strip_prefix(dirs.home_dir()) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

/// Expand a leading `~` or `~/` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match BaseDirs::new() {
        Some(dirs) if rest.is_empty() => dirs.home_dir().to_path_buf(),
        Some(dirs) => dirs.home_dir().join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tilde_leaves_other_paths_alone() {
        assert_eq!(expand_tilde("/tmp/schema.json"), PathBuf::from("/tmp/schema.json"));
        assert_eq!(expand_tilde("schema.json"), PathBuf::from("schema.json"));
        assert_eq!(expand_tilde("~user/schema.json"), PathBuf::from("~user/schema.json"));
    }

    #[test]
    fn expand_tilde_uses_home_directory() {
        let Some(dirs) = BaseDirs::new() else {
            return;
        };
        assert_eq!(expand_tilde("~"), dirs.home_dir());
        assert_eq!(
            expand_tilde("~/schemas/a.json"),
            dirs.home_dir().join("schemas/a.json")
        );
    }

    #[test]
    fn path_display_keeps_paths_outside_home() {
        assert_eq!(path_display("/definitely/not/home/x"), "/definitely/not/home/x");
    }
}
