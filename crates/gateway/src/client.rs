use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use bytes::Bytes;
use futures::Stream;

use crate::config::{Config, ConfigError};
use crate::error::{GatewayError, Result};
use crate::models::{RemoteFile, RemoteFileInfo, StorageStatus};
use crate::multipart::SpooledForm;
use crate::pointer::Pointer;
use crate::transport::Transport;

/// Field name the remote expects for the payload part.
const FILE_FIELD: &str = "file";
/// Field name the remote expects for the object's display name.
const DISPLAY_NAME_FIELD: &str = "DisplayName";

/// Client for the remote blob-storage service.
///
/// Cheap to clone; concurrent invocations share no mutable state beyond
/// the connection pool. Configuration is injected once at construction.
#[derive(Debug, Clone)]
pub struct Gateway {
    transport: Transport,
}

impl Gateway {
    pub fn new(config: &Config) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Upload a byte stream under the given object name and return the
    /// remote identifier as a validated pointer.
    pub async fn put(&self, reader: impl Read, name: &str) -> Result<Pointer> {
        let mut form = SpooledForm::new()?;
        form.stream_part(FILE_FIELD, name, reader)?;
        form.text_part(DISPLAY_NAME_FIELD, name)?;
        let encoded = form.finish()?;

        let url = self.transport.endpoint(&["files"]);
        let response = self.transport.post_form(url, encoded).await?;
        Pointer::new(response.id)
    }

    /// Move a local file's bytes to the remote and replace its content
    /// with the pointer.
    ///
    /// The rewrite goes through a sibling temp file renamed over the
    /// original, so an interruption leaves either the old content or the
    /// finished pointer, never an empty file. If the rewrite fails after a
    /// successful upload the remote object is orphaned; recovery can
    /// always re-derive local state from the inventory.
    pub async fn shard(&self, path: &Path, object_name: &str) -> Result<Pointer> {
        let file = File::open(path)?;
        let pointer = self.put(file, object_name).await?;

        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut staged = tempfile::NamedTempFile::new_in(parent.unwrap_or(Path::new(".")))?;
        staged.write_all(pointer.encode())?;
        staged.flush()?;
        staged
            .persist(path)
            .map_err(|err| GatewayError::Io(err.error))?;

        tracing::debug!(path = %path.display(), id = %pointer, "sharded local file");
        Ok(pointer)
    }

    /// Decode a pointer from the stream and fetch the object it names.
    pub async fn get(&self, mut reader: impl Read) -> Result<RemoteObject> {
        let pointer = Pointer::read_from(&mut reader)?;
        self.fetch(&pointer).await
    }

    /// Fetch the remote object behind a pointer.
    ///
    /// Returns a live, unbuffered body; the caller owns draining it.
    pub async fn fetch(&self, pointer: &Pointer) -> Result<RemoteObject> {
        let url = self.transport.endpoint(&["files", pointer.as_str()]);
        let response = self.transport.get(url).await?;
        Ok(RemoteObject { response })
    }

    /// Query the logical size of a remote object.
    ///
    /// The remote may report an encrypted-at-rest size; only a positive
    /// `unencryptedSize` is authoritative. Anything else means the object
    /// is unknown to the remote.
    pub async fn file_size(&self, pointer: &Pointer) -> Result<u64> {
        let url = self.transport.endpoint(&["files", "info", pointer.as_str()]);
        let info: RemoteFileInfo = self.transport.get_json(url).await?;

        if info.unencrypted_size > 0 {
            return Ok(info.unencrypted_size as u64);
        }

        Err(GatewayError::NotFound(pointer.as_str().to_string()))
    }

    /// Fetch one page of the remote inventory.
    pub async fn list_page(&self, offset: usize, limit: usize) -> Result<Vec<RemoteFile>> {
        let mut url = self.transport.endpoint(&["files"]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        self.transport.get_json(url).await
    }

    /// Per-node status of the remote's backing storage, verbatim.
    pub async fn health(&self) -> Result<Vec<StorageStatus>> {
        let url = self.transport.endpoint(&["health"]);
        self.transport.get_json(url).await
    }
}

/// A remote object's body, streamed as it arrives.
#[derive(Debug)]
pub struct RemoteObject {
    response: reqwest::Response,
}

impl RemoteObject {
    /// Content length declared by the remote, if any.
    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// The raw byte stream. The caller owns closing it by dropping.
    pub fn bytes_stream(self) -> impl Stream<Item = reqwest::Result<Bytes>> {
        self.response.bytes_stream()
    }

    /// Drain the whole body into memory.
    pub async fn bytes(self) -> Result<Bytes> {
        Ok(self.response.bytes().await?)
    }
}
