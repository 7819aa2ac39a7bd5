use std::fmt;
use std::io::Read;

use crate::error::GatewayError;

/// Length in bytes of a remote object identifier. A sharded file's entire
/// content is exactly one identifier, no framing.
pub const POINTER_LEN: usize = 24;

/// The remote object identifier stored locally in place of file content.
///
/// Always exactly [`POINTER_LEN`] bytes; construction and decoding enforce
/// the invariant so every `Pointer` in the program is well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pointer(String);

impl Pointer {
    /// Validate an identifier received from the remote.
    pub fn new(id: impl Into<String>) -> Result<Self, GatewayError> {
        let id = id.into();
        if id.len() != POINTER_LEN {
            return Err(GatewayError::MalformedPointer(format!(
                "id is {} bytes",
                id.len()
            )));
        }
        Ok(Self(id))
    }

    /// Decode a pointer from the start of a local file or stream.
    ///
    /// Reads exactly [`POINTER_LEN`] bytes. Shorter input is a format
    /// error, not a partial pointer, and a read error fails the decode even
    /// if bytes were produced.
    pub fn read_from(reader: &mut impl Read) -> Result<Self, GatewayError> {
        let mut buf = [0u8; POINTER_LEN];
        reader.read_exact(&mut buf).map_err(|err| {
            if err.kind() == std::io::ErrorKind::UnexpectedEof {
                GatewayError::MalformedPointer("file is shorter than a pointer".into())
            } else {
                GatewayError::Io(err)
            }
        })?;

        let id = std::str::from_utf8(&buf)
            .map_err(|_| GatewayError::MalformedPointer("id is not valid UTF-8".into()))?;
        Ok(Self(id.to_string()))
    }

    /// The identifier's raw bytes: the exact content of a sharded file.
    pub fn encode(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
