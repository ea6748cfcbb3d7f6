//! Path helpers for the Windows-style relative paths found in solution and
//! project files.

use std::path::{Component, Path, PathBuf};

/// Turn a path written in a solution or project file into a host path.
/// Both `\` and `/` are treated as separators.
pub fn from_manifest(raw: &str) -> PathBuf {
    raw.trim()
        .split(['\\', '/'])
        .filter(|part| !part.is_empty())
        .fold(
            if raw.trim_start().starts_with(['\\', '/']) {
                PathBuf::from(std::path::MAIN_SEPARATOR_STR)
            } else {
                PathBuf::new()
            },
            |mut acc, part| {
                acc.push(part);
                acc
            },
        )
}

/// Resolve `relative` against `base_dir` and fold `.`/`..` lexically.
pub fn resolve(base_dir: &Path, relative: &Path) -> PathBuf {
    if relative.is_absolute() {
        normalize(relative)
    } else {
        normalize(&base_dir.join(relative))
    }
}

/// Lexical normalisation; does not touch the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Case-insensitive comparison key, matching how MSBuild treats paths.
pub fn match_key(path: &Path) -> String {
    normalize(path).to_string_lossy().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_backslashes() {
        let path = from_manifest(r"src\Core\Core.csproj");
        assert_eq!(path, Path::new("src").join("Core").join("Core.csproj"));
    }

    #[test]
    fn folds_parent_components() {
        let resolved = resolve(Path::new("/repo/src/App"), &from_manifest(r"..\Core\Core.csproj"));
        assert_eq!(resolved, PathBuf::from("/repo/src/Core/Core.csproj"));
    }

    #[test]
    fn keeps_leading_parents_of_relative_paths() {
        assert_eq!(normalize(Path::new("../a/./b")), PathBuf::from("../a/b"));
    }

    #[test]
    fn match_key_ignores_case() {
        assert_eq!(
            match_key(Path::new("/Repo/Core.CSPROJ")),
            match_key(Path::new("/repo/./core.csproj"))
        );
    }
}
