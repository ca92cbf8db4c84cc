//! Credential file parsing and lookup.
//!
//! The file has two top-level keys:
//!
//! ```yaml
//! credentials:
//!   admin:
//!     name: Administrator
//!     password: $argon2id$v=19$...
//! cookie:
//!   name: salat_session
//!   key: some-long-random-secret
//!   expiry_days: 30
//! ```
//!
//! Any problem with the file is fatal at startup.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use salat_core::error::AppError;

use crate::password::PasswordHasher;

/// Longest accepted session lifetime.
pub const MAX_EXPIRY_DAYS: u32 = 3650;

/// Raw credential entry as written in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialEntry {
    /// Display name.
    name: String,
    /// Argon2 PHC hash.
    password: String,
}

/// Session cookie parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieSettings {
    /// Cookie name.
    pub name: String,
    /// Secret used to sign session tokens.
    pub key: String,
    /// Session lifetime in days.
    pub expiry_days: u32,
}

/// Shape of the credential file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialFile {
    credentials: HashMap<String, CredentialEntry>,
    cookie: CookieSettings,
}

/// One known user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Lowercased username.
    pub username: String,
    /// Name shown after login.
    pub display_name: String,
    /// Argon2 PHC hash.
    pub password_hash: String,
}

/// Immutable set of credentials and cookie parameters.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    records: HashMap<String, CredentialRecord>,
    cookie: CookieSettings,
}

impl CredentialStore {
    /// Reads and validates the credential file. The format follows the extension
    /// (`.yaml`, `.yml`, `.toml`, `.json`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AppError::configuration(format!(
                "Credential file '{}' not found",
                path.display()
            )));
        }

        let file: CredentialFile = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| {
                AppError::configuration(format!(
                    "Failed to parse credential file '{}': {e}",
                    path.display()
                ))
            })?;

        let store = Self::from_parts(file.credentials, file.cookie)?;
        info!(
            path = %path.display(),
            users = store.records.len(),
            "Loaded credential file"
        );
        Ok(store)
    }

    /// Builds a store from `(username, display name, hash)` triples.
    pub fn from_records(
        records: impl IntoIterator<Item = (String, String, String)>,
        cookie: CookieSettings,
    ) -> Result<Self, AppError> {
        let entries = records
            .into_iter()
            .map(|(username, name, password)| (username, CredentialEntry { name, password }))
            .collect();
        Self::from_parts(entries, cookie)
    }

    fn from_parts(
        entries: HashMap<String, CredentialEntry>,
        cookie: CookieSettings,
    ) -> Result<Self, AppError> {
        if entries.is_empty() {
            return Err(AppError::configuration(
                "Credential file defines no users",
            ));
        }
        if cookie.name.trim().is_empty() {
            return Err(AppError::configuration("cookie.name must not be empty"));
        }
        if cookie.key.trim().is_empty() {
            return Err(AppError::configuration("cookie.key must not be empty"));
        }
        if cookie.expiry_days == 0 || cookie.expiry_days > MAX_EXPIRY_DAYS {
            return Err(AppError::configuration(format!(
                "cookie.expiry_days must be between 1 and {MAX_EXPIRY_DAYS}"
            )));
        }

        let hasher = PasswordHasher::new();
        let mut records = HashMap::with_capacity(entries.len());
        for (username, entry) in entries {
            let username = username.trim().to_lowercase();
            if username.is_empty() {
                return Err(AppError::configuration("Empty username in credential file"));
            }
            if entry.password.starts_with("$2") {
                return Err(AppError::configuration(format!(
                    "User '{username}': bcrypt hashes are not supported. \
                     Re-hash the password with `salat-hash`"
                )));
            }
            hasher.check_hash_format(&entry.password).map_err(|e| {
                AppError::configuration(format!(
                    "User '{username}': {}. Generate a hash with `salat-hash`",
                    e.message
                ))
            })?;

            let record = CredentialRecord {
                username: username.clone(),
                display_name: entry.name,
                password_hash: entry.password,
            };
            if records.insert(username.clone(), record).is_some() {
                return Err(AppError::configuration(format!(
                    "Duplicate username '{username}' in credential file"
                )));
            }
        }

        Ok(Self { records, cookie })
    }

    /// Looks up a user, ignoring case and surrounding whitespace.
    pub fn find(&self, username: &str) -> Option<&CredentialRecord> {
        self.records.get(&username.trim().to_lowercase())
    }

    /// Cookie parameters.
    pub fn cookie(&self) -> &CookieSettings {
        &self.cookie
    }

    /// Number of known users.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store has no users (never true for a loaded store).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(ext: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn hash(password: &str) -> String {
        PasswordHasher::new().hash_password(password).unwrap()
    }

    #[test]
    fn test_load_yaml() {
        let content = format!(
            "credentials:\n  admin:\n    name: Administrator\n    password: \"{}\"\n  Imam:\n    name: Imam Yusuf\n    password: \"{}\"\ncookie:\n  name: salat_session\n  key: secret\n  expiry_days: 30\n",
            hash("a"),
            hash("b")
        );
        let file = write_file("yaml", &content);

        let store = CredentialStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.find("ADMIN").unwrap().display_name, "Administrator");
        assert_eq!(store.find("imam").unwrap().username, "imam");
        assert_eq!(store.cookie().expiry_days, 30);
        assert!(store.find("nobody").is_none());
    }

    #[test]
    fn test_load_toml() {
        let content = format!(
            "[credentials.admin]\nname = \"Administrator\"\npassword = \"{}\"\n\n[cookie]\nname = \"c\"\nkey = \"k\"\nexpiry_days = 1\n",
            hash("a")
        );
        let file = write_file("toml", &content);
        let store = CredentialStore::load(file.path()).unwrap();
        assert_eq!(store.cookie().name, "c");
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = CredentialStore::load("/definitely/not/here.yaml").unwrap_err();
        assert_eq!(err.kind, salat_core::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_missing_cookie_section_is_fatal() {
        let content = format!(
            "credentials:\n  admin:\n    name: A\n    password: \"{}\"\n",
            hash("a")
        );
        let file = write_file("yaml", &content);
        assert!(CredentialStore::load(file.path()).is_err());
    }

    #[test]
    fn test_plaintext_password_is_fatal() {
        let content = "credentials:\n  admin:\n    name: A\n    password: hunter2\ncookie:\n  name: c\n  key: k\n  expiry_days: 30\n";
        let file = write_file("yaml", content);
        let err = CredentialStore::load(file.path()).unwrap_err();
        assert!(err.message.contains("admin"));
    }

    #[test]
    fn test_bcrypt_hash_points_at_hash_tool() {
        let content = "credentials:\n  admin:\n    name: A\n    password: \"$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW\"\ncookie:\n  name: c\n  key: k\n  expiry_days: 30\n";
        let file = write_file("yaml", content);
        let err = CredentialStore::load(file.path()).unwrap_err();
        assert!(err.message.contains("bcrypt"));
        assert!(err.message.contains("salat-hash"));
    }

    #[test]
    fn test_expiry_days_bounds() {
        let h = hash("a");
        for expiry_days in [0, MAX_EXPIRY_DAYS + 1, 200_000_000] {
            let result = CredentialStore::from_records(
                vec![("admin".into(), "A".into(), h.clone())],
                CookieSettings {
                    name: "c".into(),
                    key: "k".into(),
                    expiry_days,
                },
            );
            assert!(result.is_err(), "expiry_days = {expiry_days}");
        }
        let store = CredentialStore::from_records(
            vec![("admin".into(), "A".into(), h)],
            CookieSettings {
                name: "c".into(),
                key: "k".into(),
                expiry_days: MAX_EXPIRY_DAYS,
            },
        );
        assert!(store.is_ok());
    }

    #[test]
    fn test_duplicate_usernames_rejected() {
        let cookie = CookieSettings {
            name: "c".into(),
            key: "k".into(),
            expiry_days: 1,
        };
        let h = hash("a");
        let result = CredentialStore::from_records(
            vec![
                ("Admin".into(), "A".into(), h.clone()),
                ("admin".into(), "B".into(), h),
            ],
            cookie,
        );
        assert!(result.is_err());
    }
}
