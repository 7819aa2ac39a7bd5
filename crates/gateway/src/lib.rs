/**
 * Configuration record for the remote backend.
 *  Loaded once from a static JSON file and passed
 *  explicitly into every component that needs it.
 */
pub mod config;
/**
 * Error taxonomy shared across the gateway.
 */
pub mod error;
/**
 * Wire records exchanged with the remote service.
 */
pub mod models;
/**
 * Fixed-width codec for the pointer stored in place
 *  of a sharded file's content.
 */
pub mod pointer;
/**
 * Multipart/form-data encoder that spools the body to
 *  a temporary file so uploads carry a known length.
 */
pub mod multipart;
/**
 * HTTP plumbing against the remote service: URL
 *  joining, authenticated GETs, multipart POSTs, and
 *  remote-error translation.
 */
pub mod transport;
/**
 * The gateway operations themselves: shard, get,
 *  size query, inventory listing, health.
 */
pub mod client;
/**
 * Bulk rebuild of a local pointer tree from the
 *  remote inventory, with atomic commit.
 */
pub mod recovery;

pub mod prelude {
    pub use crate::client::{Gateway, RemoteObject};
    pub use crate::config::{Config, ConfigError};
    pub use crate::error::GatewayError;
    pub use crate::pointer::{Pointer, POINTER_LEN};
    pub use crate::recovery::{Recovery, RecoveryError};
}
