use std::path::{Path, PathBuf};

/// Name of the optional environment file forwarded to `docker run`.
pub const ENV_FILE: &str = ".env";

/// Return the `.env` file in `dir` if one exists. Its contents are opaque
/// to the launcher; the engine parses them.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(ENV_FILE);
    path.is_file().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn discover_finds_env_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env"), "OPENAI_API_KEY=sk-test\n").unwrap();

        let found = discover(dir.path());
        assert_eq!(found, Some(dir.path().join(".env")));
    }

    #[test]
    fn discover_returns_none_without_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path()).is_none());
    }

    #[test]
    fn discover_ignores_a_directory_named_env() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".env")).unwrap();
        assert!(discover(dir.path()).is_none());
    }
}
