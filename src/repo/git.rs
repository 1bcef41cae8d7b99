use std::path::Path;

use git2::{build::RepoBuilder, Cred, FetchOptions, RemoteCallbacks};
use log::trace;

use super::{BasicAuth, CloneProgress, ProgressFn, Transport};

/// Clones repositories with libgit2, injecting credentials per call.
pub struct GitTransport;

impl Transport for GitTransport {
    fn clone_into(
        &self,
        url: &str,
        target: &Path,
        auth: Option<&BasicAuth>,
        progress: Option<&ProgressFn>,
    ) -> anyhow::Result<()> {
        let mut callbacks = RemoteCallbacks::new();

        if let Some(auth) = auth {
            let auth = auth.clone();
            callbacks.credentials(move |url, username, allowed_types| {
                trace!(
                    "credentials requested for {}, username {:?}, allowed types {:?}",
                    url,
                    username,
                    allowed_types
                );
                Cred::userpass_plaintext(&auth.username, &auth.password)
            });
        }

        if let Some(progress) = progress {
            callbacks.transfer_progress(move |stats| {
                progress(CloneProgress {
                    received_objects: stats.received_objects(),
                    total_objects: stats.total_objects(),
                    received_bytes: stats.received_bytes(),
                });
                true
            });
        }

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);

        RepoBuilder::new()
            .fetch_options(fetch_options)
            .clone(url, target)?;

        Ok(())
    }
}
