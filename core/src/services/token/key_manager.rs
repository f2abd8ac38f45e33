//! RS256 key management for JWT signing and verification

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonwebtoken::{DecodingKey, EncodingKey};
use tracing::debug;

use crate::errors::{DomainError, DomainResult, TokenError};

/// PEM-encoded RSA key pair as handed over by the key loader
///
/// The text is not parsed here; format problems surface on first use.
#[derive(Clone)]
pub struct KeyMaterial {
    private_key_pem: String,
    public_key_pem: String,
    source: KeySource,
}

#[derive(Debug, Clone)]
enum KeySource {
    Memory,
    Files {
        private_key_path: PathBuf,
        public_key_path: PathBuf,
    },
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl KeyMaterial {
    /// Wraps in-memory PEM strings
    pub fn from_pem(private_key_pem: impl Into<String>, public_key_pem: impl Into<String>) -> Self {
        Self {
            private_key_pem: private_key_pem.into(),
            public_key_pem: public_key_pem.into(),
            source: KeySource::Memory,
        }
    }

    /// Reads the key pair from PEM files
    ///
    /// # Arguments
    ///
    /// * `private_key_path` - Path to the PEM-encoded private key file
    /// * `public_key_path` - Path to the PEM-encoded public key file
    ///
    /// # Returns
    ///
    /// * `Ok(KeyMaterial)` - Both files were read
    /// * `Err(DomainError::KeyLoad)` - A file is missing or unreadable
    ///
    /// # Example
    ///
    /// ```no_run
    /// use km_core::services::token::KeyMaterial;
    ///
    /// let keys = KeyMaterial::from_files("keys/rsa.private", "keys/rsa.pub")
    ///     .expect("Failed to load keys");
    /// ```
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        private_key_path: P,
        public_key_path: Q,
    ) -> DomainResult<Self> {
        let private_key_path = private_key_path.as_ref().to_path_buf();
        let public_key_path = public_key_path.as_ref().to_path_buf();

        let private_key_pem = read_key(&private_key_path)?;
        let public_key_pem = read_key(&public_key_path)?;

        debug!(
            private_key = %private_key_path.display(),
            public_key = %public_key_path.display(),
            "Loaded RSA key pair"
        );

        Ok(Self {
            private_key_pem,
            public_key_pem,
            source: KeySource::Files {
                private_key_path,
                public_key_path,
            },
        })
    }

    /// PEM text of the private key
    pub fn private_key_pem(&self) -> &str {
        &self.private_key_pem
    }

    /// PEM text of the public key
    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }

    /// Paths the material was read from, if it came from files
    pub fn key_paths(&self) -> Option<(&Path, &Path)> {
        match &self.source {
            KeySource::Memory => None,
            KeySource::Files {
                private_key_path,
                public_key_path,
            } => Some((private_key_path, public_key_path)),
        }
    }
}

fn read_key(path: &Path) -> DomainResult<String> {
    fs::read_to_string(path).map_err(|e| DomainError::KeyLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Manager for RS256 keys used in JWT operations
///
/// Parses each key the first time it is needed and keeps the parsed form for
/// the rest of its lifetime. A failed parse is not cached and is reported on
/// every attempt.
pub struct Rs256KeyManager {
    material: KeyMaterial,
    encoding_key: OnceLock<EncodingKey>,
    decoding_key: OnceLock<DecodingKey>,
}

impl std::fmt::Debug for Rs256KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rs256KeyManager")
            .field("material", &self.material)
            .field("encoding_key_parsed", &self.encoding_key.get().is_some())
            .field("decoding_key_parsed", &self.decoding_key.get().is_some())
            .finish()
    }
}

impl Rs256KeyManager {
    /// Creates a key manager over unparsed key material
    pub fn new(material: KeyMaterial) -> Self {
        Self {
            material,
            encoding_key: OnceLock::new(),
            decoding_key: OnceLock::new(),
        }
    }

    /// Returns the encoding key for signing JWTs
    pub fn encoding_key(&self) -> Result<&EncodingKey, TokenError> {
        if let Some(key) = self.encoding_key.get() {
            return Ok(key);
        }

        let key = EncodingKey::from_rsa_pem(self.material.private_key_pem().as_bytes())
            .map_err(|e| TokenError::Signing {
                message: format!("Invalid private key format: {}", e),
            })?;

        Ok(self.encoding_key.get_or_init(|| key))
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> Result<&DecodingKey, TokenError> {
        if let Some(key) = self.decoding_key.get() {
            return Ok(key);
        }

        let key = DecodingKey::from_rsa_pem(self.material.public_key_pem().as_bytes())
            .map_err(|e| TokenError::InvalidVerificationKey {
                message: format!("Invalid public key format: {}", e),
            })?;

        Ok(self.decoding_key.get_or_init(|| key))
    }

    /// Key material backing this manager
    pub fn material(&self) -> &KeyMaterial {
        &self.material
    }
}
