use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use log::warn;

/// File-backed bearer token cache; the desktop analog of the localStorage
/// slot the web client keeps its token in.
///
/// The token is loaded once at construction and cached in memory. Writes go
/// to disk best-effort: a login still succeeds for the current session even
/// if the token file cannot be written.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
    cached: Mutex<Option<String>>,
}

impl TokenStore {
    pub fn open(path: PathBuf) -> Self {
        let cached = match fs::read_to_string(&path) {
            Ok(raw) => {
                let token = raw.trim().to_string();
                if token.is_empty() { None } else { Some(token) }
            }
            Err(_) => None,
        };
        TokenStore {
            path,
            cached: Mutex::new(cached),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.cached.lock().expect("token cache poisoned").clone()
    }

    pub fn set(&self, token: &str) {
        *self.cached.lock().expect("token cache poisoned") = Some(token.to_string());
        if let Err(err) = fs::write(&self.path, token) {
            warn!("could not persist token to {}: {}", self.path.display(), err);
        }
    }

    pub fn clear(&self) {
        *self.cached.lock().expect("token cache poisoned") = None;
        if self.path.exists() {
            if let Err(err) = fs::remove_file(&self.path) {
                warn!("could not remove token file {}: {}", self.path.display(), err);
            }
        }
    }
}
