//! Working directory discovery through the client's `roots/list` capability.

use std::path::PathBuf;

use rmcp::{Peer, RoleServer};
use tracing::debug;
use url::Url;

/// First filesystem root advertised by the client, if any.
///
/// Clients without the roots capability, failed requests and non-`file://`
/// roots all yield `None`; the caller then uses its own directory.
pub async fn caller_root(peer: &Peer<RoleServer>) -> Option<PathBuf> {
    let supports_roots = peer
        .peer_info()
        .is_some_and(|info| info.capabilities.roots.is_some());
    if !supports_roots {
        debug!("Client does not advertise roots, using process directory");
        return None;
    }

    match peer.list_roots().await {
        Ok(result) => {
            let root = result.roots.iter().find_map(|root| root_to_path(&root.uri));
            debug!(?root, "Resolved caller root");
            root
        }
        Err(e) => {
            debug!(error = %e, "roots/list failed, using process directory");
            None
        }
    }
}

/// Converts a `file://` URI into a local path.
pub fn root_to_path(uri: &str) -> Option<PathBuf> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}
