use crate::errors::{ErrorKind, RepoError, RepoResult};
use chrono::Utc;
use once_cell::sync::Lazy;
use std::fmt::{Debug, Display};
use std::sync::atomic::{AtomicU32, Ordering};

/// Length of the canonical hex representation.
pub const OBJECT_ID_HEX_LEN: usize = 24;

/// Per-process random machine/process identifier, fixed for the lifetime of
/// the process.
static PROCESS_ID: Lazy<[u8; 5]> = Lazy::new(rand::random);

/// Monotonic counter with a random seed; only the low 3 bytes are used.
static COUNTER: Lazy<AtomicU32> = Lazy::new(|| AtomicU32::new(rand::random::<u32>() & 0x00FF_FFFF));

/// The database-native unique identifier for documents.
///
/// An `ObjectId` is 12 bytes: a 4-byte big-endian seconds timestamp, a 5-byte
/// per-process random value and a 3-byte incrementing counter with a random
/// seed. Identifiers generated in one process are unique and roughly ordered
/// by creation time.
///
/// Callers frequently supply identifiers as 24-character hex strings; the
/// query normalizer and the validation `convert` function parse those into
/// this type wherever the schema marks a field as identifier-like.
///
/// # Examples
///
/// ```rust,ignore
/// use baserepo::object_id::ObjectId;
///
/// // Auto-generate an id
/// let id = ObjectId::new();
///
/// // Parse the canonical hex form
/// let id = ObjectId::parse_str("507f191e810c19729de860ea")?;
/// assert_eq!(id.to_hex(), "507f191e810c19729de860ea");
/// ```
#[derive(PartialEq, Eq, Ord, PartialOrd, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId {
    bytes: [u8; 12],
}

impl ObjectId {
    /// Generates a new unique `ObjectId` from the current time, the process
    /// random value and the next counter value.
    pub fn new() -> Self {
        let timestamp = Utc::now().timestamp() as u32;
        let counter = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00FF_FFFF;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&timestamp.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_ID);
        bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..4]);

        ObjectId { bytes }
    }

    /// Creates an `ObjectId` from raw bytes.
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        ObjectId { bytes }
    }

    /// Parses the canonical 24-character hex representation.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::InvalidId] error when the input has the wrong
    /// length or contains non-hex characters.
    pub fn parse_str(hex: &str) -> RepoResult<ObjectId> {
        let chars: Vec<char> = hex.chars().collect();
        if chars.len() != OBJECT_ID_HEX_LEN {
            return Err(RepoError::new(
                &format!(
                    "ObjectId hex string must be {} characters, got {}",
                    OBJECT_ID_HEX_LEN,
                    chars.len()
                ),
                ErrorKind::InvalidId,
            ));
        }

        let mut bytes = [0u8; 12];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let hi = chars[i * 2].to_digit(16);
            let lo = chars[i * 2 + 1].to_digit(16);
            match (hi, lo) {
                (Some(hi), Some(lo)) => *byte = ((hi << 4) | lo) as u8,
                _ => {
                    return Err(RepoError::new(
                        &format!("ObjectId hex string contains a non-hex character: {}", hex),
                        ErrorKind::InvalidId,
                    ));
                }
            }
        }

        Ok(ObjectId { bytes })
    }

    /// Returns the canonical lowercase hex representation.
    pub fn to_hex(&self) -> String {
        let mut hex = String::with_capacity(OBJECT_ID_HEX_LEN);
        for byte in &self.bytes {
            hex.push(char::from_digit((byte >> 4) as u32, 16).unwrap_or('0'));
            hex.push(char::from_digit((byte & 0x0F) as u32, 16).unwrap_or('0'));
        }
        hex
    }

    /// Returns the raw bytes of this id.
    pub fn bytes(&self) -> &[u8; 12] {
        &self.bytes
    }

    /// Returns the seconds-since-epoch timestamp embedded in this id.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]])
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        ObjectId::new()
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Debug for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId(\"{}\")", self.to_hex())
    }
}

impl std::str::FromStr for ObjectId {
    type Err = RepoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
    }
}
