use serde::{Deserialize, Serialize};

/// One entry of the remote inventory listing.
///
/// `id` is the canonical pointer value; `file_name` is the relative path
/// the object was sharded from, used by recovery to rebuild the local tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    pub id: String,
    pub pointer: String,
    pub file_name: String,
    /// Opaque to this gateway; carried as the remote sends it
    pub creation_date: String,
}

/// Metadata returned by the size-query endpoint.
///
/// `unencrypted_size`, when positive, is authoritative: `size` may reflect
/// the encrypted-at-rest length and must not be used as the logical length.
/// More fields are available remotely; only these are consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFileInfo {
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub unencrypted_size: i64,
    #[serde(default)]
    pub id: String,
}

/// Upload response. The identifier is the only field consumed locally;
/// anything else the remote includes is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub id: String,
}

/// Per-node status record from the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStatus {
    pub host: String,
    pub status: String,
    pub region: String,
}

/// JSON error body the remote attaches to 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteErrorBody {
    pub message: String,
}
