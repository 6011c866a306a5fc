#[cfg(unix)]
use std::fs::OpenOptions;
#[cfg(unix)]
use std::io::Write;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use parley_types::TokenStore;
use tracing::warn;

/// Bearer token kept in a plain file between runs.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Writes `contents` readable by the owner only. Existing files are narrowed
/// to `0600` as well.
#[cfg(unix)]
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    std::fs::write(path, contents)
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Some(contents.trim().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("failed to read token file {}: {e}", self.path.display());
                None
            }
        }
    }

    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("failed to create {}: {e}", parent.display());
                return;
            }
        }
        if let Err(e) = write_private(&self.path, token) {
            warn!("failed to write token file {}: {e}", self.path.display());
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("failed to remove token file {}: {e}", self.path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::Session;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("parley-console-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn save_load_clear() {
        let path = scratch_path("token");
        let session = Session::new(FileTokenStore::new(&path));

        assert!(!session.is_authenticated());
        session.sign_in("abc");
        assert_eq!(session.token().as_deref(), Some("abc"));
        session.sign_out();
        assert!(!path.exists());
        session.sign_out();
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let path = scratch_path("private");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileTokenStore::new(&path);
        store.save("abc");

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().as_deref(), Some("abc"));
        store.clear();
    }

    #[test]
    fn fresh_token_file_is_written() {
        let path = scratch_path("nested/fresh");
        let store = FileTokenStore::new(&path);
        store.save("xyz");
        assert_eq!(store.load().as_deref(), Some("xyz"));
        store.clear();
        assert!(!path.exists());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let path = scratch_path("padded");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "abc\n").unwrap();

        assert_eq!(FileTokenStore::new(&path).load().as_deref(), Some("abc"));
        std::fs::remove_file(&path).unwrap();
    }
}
