use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Signed-in identity (written to .session.toml).
///
/// The id is an opaque token from the auth service; this client only
/// compares it against message sender ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
}

const SESSION_FILE: &str = ".session.toml";

/// Read the session, if signed in.
pub fn read_session(klyra_dir: &Path) -> Option<Session> {
    let path = klyra_dir.join(SESSION_FILE);
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

/// Write the session (sign in).
pub fn write_session(klyra_dir: &Path, session: &Session) -> Result<(), std::io::Error> {
    let path = klyra_dir.join(SESSION_FILE);
    let content = toml::to_string(session).expect("session serializes");
    fs::write(&path, content)
}

/// Remove the session (sign out). Absent session is not an error.
pub fn clear_session(klyra_dir: &Path) -> Result<(), std::io::Error> {
    let path = klyra_dir.join(SESSION_FILE);
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_session_round_trip() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_session(tmp.path()), None);

        let session = Session {
            user_id: "u-123".into(),
        };
        write_session(tmp.path(), &session).unwrap();
        assert_eq!(read_session(tmp.path()), Some(session));

        clear_session(tmp.path()).unwrap();
        assert_eq!(read_session(tmp.path()), None);

        // Clearing twice is fine
        clear_session(tmp.path()).unwrap();
    }
}
