//! Password Hashing and Verification
//!
//! Salted one-way digests backed by bcrypt:
//! - Fresh random salt per digest, generated inside the primitive
//! - Self-describing `$2b$<cost>$<salt><hash>` output
//! - Constant-time comparison on verification
//! - Zeroization of clear text secrets
//!
//! ## Security Features
//! - Callers can never supply a salt; two digests of the same secret differ
//! - Structurally invalid digests are rejected, never treated as a mismatch
//! - Work factor is range-checked before any hashing starts

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Lowest work factor callers may request
pub const MIN_WORK_FACTOR: u32 = 1;

/// Lowest cost the bcrypt primitive runs; smaller requests are raised to it
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest cost the bcrypt primitive accepts
pub const MAX_WORK_FACTOR: u32 = 31;

/// Length of a bcrypt modular-crypt string
const DIGEST_LEN: usize = 60;

/// Length of the salt + hash tail (22 + 31 chars)
const SALT_AND_HASH_LEN: usize = 53;

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    /// Work factor outside the range the primitive supports
    #[error("Work factor must be between {min} and {max} (got {actual})")]
    InvalidWorkFactor { min: u32, max: u32, actual: i64 },

    /// Digest string does not parse into {tag, cost, salt, hash}
    #[error("Malformed password digest: {0}")]
    MalformedDigest(String),

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Work Factor
// ============================================================================

/// bcrypt cost parameter (hashing performs 2^cost rounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkFactor(u32);

impl WorkFactor {
    /// Validate a caller-supplied work factor
    ///
    /// Accepts signed input so that zero and negative values are reported
    /// as [`PasswordHashError::InvalidWorkFactor`] instead of wrapping.
    /// Requests of 1 to 3 are raised to [`MIN_BCRYPT_COST`].
    pub fn new(value: i64) -> Result<Self, PasswordHashError> {
        if value < i64::from(MIN_WORK_FACTOR) || value > i64::from(MAX_WORK_FACTOR) {
            return Err(PasswordHashError::InvalidWorkFactor {
                min: MIN_WORK_FACTOR,
                max: MAX_WORK_FACTOR,
                actual: value,
            });
        }
        // In range, so the cast is lossless
        Ok(Self((value as u32).max(MIN_BCRYPT_COST)))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for WorkFactor {
    fn default() -> Self {
        Self(bcrypt::DEFAULT_COST)
    }
}

impl fmt::Display for WorkFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Secret (Zeroized on drop)
// ============================================================================

/// Clear text secret with automatic memory zeroization
///
/// No structure or length rules are enforced here; bcrypt itself only
/// reads the first 72 bytes.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::{Secret, WorkFactor};
///
/// let secret = Secret::new("correct horse battery staple");
/// let digest = secret.hash(WorkFactor::new(4).unwrap()).unwrap();
/// assert!(digest.verify(&secret).unwrap());
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the secret with a freshly generated salt
    ///
    /// ## Returns
    /// A `$2b$` digest embedding the salt and work factor
    pub fn hash(&self, work_factor: WorkFactor) -> Result<PasswordDigest, PasswordHashError> {
        let digest = bcrypt::hash(self.as_bytes(), work_factor.get())
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(PasswordDigest {
            digest,
            variant: DigestVariant::TwoB,
            work_factor,
        })
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Password Digest
// ============================================================================

/// bcrypt revision tag found between the first two `$`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestVariant {
    TwoA,
    TwoB,
    TwoX,
    TwoY,
}

impl DigestVariant {
    fn parse(tag: &str) -> Option<Self> {
        match tag {
            "2a" => Some(Self::TwoA),
            "2b" => Some(Self::TwoB),
            "2x" => Some(Self::TwoX),
            "2y" => Some(Self::TwoY),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwoA => "2a",
            Self::TwoB => "2b",
            Self::TwoX => "2x",
            Self::TwoY => "2y",
        }
    }
}

/// Salted bcrypt digest in modular-crypt format
///
/// Only obtainable from [`Secret::hash`] or [`PasswordDigest::parse`],
/// so every value has a well-formed tag, cost, salt and hash.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    digest: String,
    variant: DigestVariant,
    work_factor: WorkFactor,
}

impl PasswordDigest {
    /// Parse and validate a digest string
    ///
    /// Rejects empty input, wrong length, unknown algorithm tags,
    /// out-of-range costs and characters outside the bcrypt alphabet.
    pub fn parse(s: &str) -> Result<Self, PasswordHashError> {
        if s.is_empty() {
            return Err(malformed("empty digest"));
        }
        if s.len() != DIGEST_LEN {
            return Err(malformed(format!(
                "expected {} characters, got {}",
                DIGEST_LEN,
                s.len()
            )));
        }

        let rest = s
            .strip_prefix('$')
            .ok_or_else(|| malformed("missing leading '$'"))?;
        let mut parts = rest.splitn(3, '$');
        let (Some(tag), Some(cost), Some(tail)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed("expected $<tag>$<cost>$<salt+hash>"));
        };

        let variant = DigestVariant::parse(tag)
            .ok_or_else(|| malformed(format!("unsupported algorithm tag '{}'", tag)))?;

        if cost.len() != 2 || !cost.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(format!("invalid cost field '{}'", cost)));
        }
        let cost: i64 = cost
            .parse()
            .map_err(|_| malformed(format!("invalid cost field '{}'", cost)))?;
        // Digests never carry a cost below what bcrypt runs, so no raising here
        if cost < i64::from(MIN_BCRYPT_COST) {
            return Err(malformed(format!("cost {} outside supported range", cost)));
        }
        let work_factor = WorkFactor::new(cost)
            .map_err(|_| malformed(format!("cost {} outside supported range", cost)))?;

        if tail.len() != SALT_AND_HASH_LEN || !tail.bytes().all(is_bcrypt_base64) {
            return Err(malformed("invalid salt or hash encoding"));
        }

        Ok(Self {
            digest: s.to_string(),
            variant,
            work_factor,
        })
    }

    /// Get the digest string
    pub fn as_str(&self) -> &str {
        &self.digest
    }

    pub fn into_string(self) -> String {
        self.digest
    }

    pub fn variant(&self) -> DigestVariant {
        self.variant
    }

    /// Work factor embedded in the digest
    pub fn work_factor(&self) -> WorkFactor {
        self.work_factor
    }

    /// Verify a candidate secret against this digest
    ///
    /// Recomputes the hash with the embedded salt and cost; bcrypt
    /// compares in constant time. A mismatch is `Ok(false)`.
    pub fn verify(&self, candidate: &Secret) -> Result<bool, PasswordHashError> {
        // The primitive still decodes salt/hash bytes, which can fail on
        // non-canonical encodings that pass the alphabet check above
        bcrypt::verify(candidate.as_bytes(), &self.digest)
            .map_err(|e| PasswordHashError::MalformedDigest(e.to_string()))
    }

    /// Check if the digest should be regenerated at a new target cost
    ///
    /// True when the embedded cost is below `target` or the digest uses a
    /// legacy revision tag.
    pub fn needs_rehash(&self, target: WorkFactor) -> bool {
        self.work_factor < target || self.variant != DigestVariant::TwoB
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("variant", &self.variant.as_str())
            .field("work_factor", &self.work_factor)
            .field("digest", &"[HASH]")
            .finish()
    }
}

impl std::str::FromStr for PasswordDigest {
    type Err = PasswordHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse `digest` and verify `candidate` against it
pub fn verify(candidate: &Secret, digest: &str) -> Result<bool, PasswordHashError> {
    PasswordDigest::parse(digest)?.verify(candidate)
}

// ============================================================================
// Helper Functions
// ============================================================================

fn malformed(reason: impl Into<String>) -> PasswordHashError {
    PasswordHashError::MalformedDigest(reason.into())
}

/// bcrypt's base64 alphabet: `./A-Za-z0-9`
fn is_bcrypt_base64(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'/'
}

// ============================================================================
// Tests
// ============================================================================
