//! # Connection Descriptors
//!
//! A `ConnectionDescriptor` is a tagged configuration describing one of the
//! three supported data sources: the bundled sample database, a user-uploaded
//! SQLite file, or a remote MySQL server. The connector dispatches over this
//! sum type; validation happens before any handle is opened.

use crate::errors::ConnectError;
use std::path::PathBuf;

/// File extensions accepted for uploaded SQLite databases.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["db", "sqlite", "sqlite3"];

/// Identifies which database to connect to and how.
#[derive(Debug, Clone)]
pub enum ConnectionDescriptor {
    /// The bundled sample database at a fixed, deployment-configured path.
    Local { path: PathBuf },
    /// A user-supplied SQLite file, held in memory until materialized.
    Uploaded { file_name: String, bytes: Vec<u8> },
    /// A remote MySQL server. All four fields are required and non-empty.
    Remote {
        host: String,
        user: String,
        password: String,
        database: String,
    },
}

impl ConnectionDescriptor {
    /// Checks the descriptor for completeness without touching any I/O.
    ///
    /// Returns `InvalidConfig` for an incomplete `Remote`, an empty upload,
    /// or an upload whose file name has no accepted extension.
    pub fn validate(&self) -> Result<(), ConnectError> {
        match self {
            Self::Local { .. } => Ok(()),
            Self::Uploaded { file_name, bytes } => {
                if bytes.is_empty() {
                    return Err(ConnectError::InvalidConfig(
                        "Uploaded file is empty".to_string(),
                    ));
                }
                let extension = file_name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase());
                match extension {
                    Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
                    _ => Err(ConnectError::InvalidConfig(format!(
                        "Unsupported file type for '{file_name}'. Accepted: .db, .sqlite, .sqlite3"
                    ))),
                }
            }
            Self::Remote {
                host,
                user,
                password,
                database,
            } => {
                if [host, user, password, database]
                    .iter()
                    .any(|field| field.trim().is_empty())
                {
                    Err(ConnectError::InvalidConfig(
                        "All MySQL connection fields (host, user, password, database) are required"
                            .to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// A short human-readable label for the configured source.
    pub fn source_label(&self) -> String {
        match self {
            Self::Local { path } => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "sample database".to_string()),
            Self::Uploaded { file_name, .. } => file_name.clone(),
            Self::Remote { host, database, .. } => format!("{database} @ {host}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_descriptor_is_always_valid() {
        let descriptor = ConnectionDescriptor::Local {
            path: PathBuf::from("db/sample.db"),
        };
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn empty_upload_is_invalid_config() {
        let descriptor = ConnectionDescriptor::Uploaded {
            file_name: "data.db".to_string(),
            bytes: vec![],
        };
        assert!(matches!(
            descriptor.validate(),
            Err(ConnectError::InvalidConfig(_))
        ));
    }

    #[test]
    fn upload_with_wrong_extension_is_invalid_config() {
        let descriptor = ConnectionDescriptor::Uploaded {
            file_name: "notes.txt".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(matches!(
            descriptor.validate(),
            Err(ConnectError::InvalidConfig(_))
        ));
    }

    #[test]
    fn upload_extensions_are_case_insensitive() {
        let descriptor = ConnectionDescriptor::Uploaded {
            file_name: "Data.SQLITE3".to_string(),
            bytes: vec![1],
        };
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn remote_with_any_blank_field_is_invalid_config() {
        for missing in 0..4 {
            let field = |index: usize| {
                if index == missing {
                    String::new()
                } else {
                    "value".to_string()
                }
            };
            let descriptor = ConnectionDescriptor::Remote {
                host: field(0),
                user: field(1),
                password: field(2),
                database: field(3),
            };
            assert!(
                matches!(descriptor.validate(), Err(ConnectError::InvalidConfig(_))),
                "field {missing} blank should be rejected"
            );
        }
    }

    #[test]
    fn complete_remote_descriptor_is_valid() {
        let descriptor = ConnectionDescriptor::Remote {
            host: "localhost".to_string(),
            user: "root".to_string(),
            password: "secret".to_string(),
            database: "shop".to_string(),
        };
        assert!(descriptor.validate().is_ok());
    }
}
