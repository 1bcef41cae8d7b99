mod git;

pub use git::GitTransport;

use std::{
    io,
    path::{Path, PathBuf},
};

use log::{debug, error, warn};
use thiserror::Error;

/// Synthetic username used when cloning with a token over basic auth.
const TOKEN_USERNAME: &str = "git";

/// Canonical public host rewritten by [`RepoFetcher::configure_private_access`].
const PUBLIC_HOST: &str = "github.com";

/// Name prefix of ephemeral clone workspaces, kept recognizable so that any
/// leaked directory can be traced back to this crate.
const WORKSPACE_PREFIX: &str = "clone-repo-";

/// Basic-auth credentials passed to a [`Transport`] for a single clone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// A single transfer-progress update emitted while a clone is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CloneProgress {
    pub received_objects: usize,
    pub total_objects: usize,
    pub received_bytes: usize,
}

pub type ProgressFn = dyn Fn(CloneProgress) + Send + Sync;

/// Writes a human readable progress line for every transfer update. Pass to
/// [`RepoFetcher::on_progress`] to get clone progress on standard output.
pub fn stdout_progress(progress: CloneProgress) {
    println!(
        "received {}/{} objects ({} bytes)",
        progress.received_objects, progress.total_objects, progress.received_bytes
    );
}

/// Retrieves repository content over the network.
///
/// The production implementation is [`GitTransport`]; tests substitute a fake
/// to observe the options a clone was invoked with.
pub trait Transport {
    /// Clones `url` into `target`, which already exists. `auth` is `None` for
    /// unauthenticated access. `progress` receives transfer updates when set.
    fn clone_into(
        &self,
        url: &str,
        target: &Path,
        auth: Option<&BasicAuth>,
        progress: Option<&ProgressFn>,
    ) -> anyhow::Result<()>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn clone_into(
        &self,
        url: &str,
        target: &Path,
        auth: Option<&BasicAuth>,
        progress: Option<&ProgressFn>,
    ) -> anyhow::Result<()> {
        (**self).clone_into(url, target, auth, progress)
    }
}

/// Broad classification of a [`FetchError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local setup failed before any transport attempt was made.
    Precondition,
    /// The transport failed, or local processing after it did.
    Internal,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("error preparing output path {path}: {source}")]
    OutputPath { path: PathBuf, source: io::Error },
    #[error("error cloning repository {url}: {cause}")]
    Clone { url: String, cause: anyhow::Error },
    #[error("error creating temporary workspace for {url}: {source}")]
    Workspace { url: String, source: io::Error },
    #[error("error reading {path} from repository {url}: {source}")]
    FileRead {
        url: String,
        path: PathBuf,
        source: io::Error,
    },
    #[error("error downloading file from repository {url}: {source}")]
    FileFetch { url: String, source: Box<FetchError> },
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::OutputPath { .. } => ErrorKind::Precondition,
            FetchError::Clone { .. }
            | FetchError::Workspace { .. }
            | FetchError::FileRead { .. }
            | FetchError::FileFetch { .. } => ErrorKind::Internal,
        }
    }
}

/// Clones remote repositories and extracts file content from them.
///
/// Stateless across calls: the credential and identity are fixed at
/// construction and no call mutates the fetcher. Concurrent `fetch_file`
/// calls are safe with respect to each other, each one works in a uniquely
/// named ephemeral workspace.
pub struct RepoFetcher<T = GitTransport> {
    credential: Option<String>,
    identity: Option<String>,
    progress: Option<Box<ProgressFn>>,
    transport: T,
}

impl RepoFetcher<GitTransport> {
    /// Creates a fetcher backed by libgit2. `credential` is an access token
    /// (`None` for unauthenticated access), `identity` the principal name the
    /// token belongs to.
    pub fn new(credential: Option<String>, identity: Option<String>) -> Self {
        Self::with_transport(credential, identity, GitTransport)
    }
}

impl<T: Transport> RepoFetcher<T> {
    pub fn with_transport(
        credential: Option<String>,
        identity: Option<String>,
        transport: T,
    ) -> Self {
        RepoFetcher {
            credential,
            identity,
            progress: None,
            transport,
        }
    }

    /// Registers a callback receiving clone transfer progress. Without one a
    /// clone produces no output beyond log events.
    pub fn on_progress(mut self, callback: impl Fn(CloneProgress) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Downloads the repository at `repo_url` into `output_path`, creating
    /// the directory if it does not exist. The directory is left in place on
    /// failure; callers owning an ephemeral workspace remove it themselves.
    pub fn clone_repository(&self, repo_url: &str, output_path: &Path) -> Result<(), FetchError> {
        debug!(
            "cloning repository {} into {}",
            repo_url,
            output_path.display()
        );

        self.create_if_not_exists(output_path)?;

        let auth = self.credential.as_ref().map(|token| BasicAuth {
            username: TOKEN_USERNAME.to_string(),
            password: token.clone(),
        });

        self.transport
            .clone_into(repo_url, output_path, auth.as_ref(), self.progress.as_deref())
            .map_err(|cause| {
                error!("error cloning repository {repo_url}: {cause:#}");
                FetchError::Clone {
                    url: repo_url.to_string(),
                    cause,
                }
            })?;

        debug!("repository {repo_url} successfully cloned");
        Ok(())
    }

    /// Installs a global git URL rewrite so that external git invocations
    /// reach private repositories on the canonical public host with the
    /// configured identity and credential embedded.
    ///
    /// This mutates machine-wide git configuration: it is not scoped to this
    /// process, not atomic, and last-writer-wins. It exists only for interop
    /// with external tooling; clones performed through this fetcher already
    /// inject credentials per call. Failures are logged and never propagated,
    /// a missing credential or identity degrades to an advisory warning.
    pub fn configure_private_access(&self) {
        let (Some(identity), Some(credential)) = (&self.identity, &self.credential) else {
            warn!(
                "credential or identity missing, cloning private repositories may fail; \
                 provide both to enable authenticated access"
            );
            return;
        };

        // git config --global url.https://<user>:<token>@github.com.insteadOf https://github.com
        let rewrite = format!("url.https://{identity}:{credential}@{PUBLIC_HOST}.insteadOf");
        let output = std::process::Command::new("git")
            .args(["config", "--global", &rewrite, &format!("https://{PUBLIC_HOST}")])
            .output();

        match output {
            Ok(output) if output.status.success() => {
                debug!("configured global url rewrite for private repository access");
            }
            Ok(output) => {
                error!(
                    "git config command failed with {}: {}{}",
                    output.status,
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr)
                );
            }
            Err(error) => {
                error!("error executing git config command: {error}");
            }
        }
    }

    /// Returns the byte contents of `file_path` as it exists in the
    /// repository at `repo_url`.
    ///
    /// The repository is cloned into an ephemeral workspace which is removed
    /// on every exit path; removal failures are logged but never mask the
    /// primary result.
    pub fn fetch_file(&self, repo_url: &str, file_path: &Path) -> Result<Vec<u8>, FetchError> {
        debug!(
            "fetching {} from repository {}",
            file_path.display(),
            repo_url
        );

        let workspace = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()
            .map_err(|source| {
                error!("error creating temporary workspace: {source}");
                FetchError::Workspace {
                    url: repo_url.to_string(),
                    source,
                }
            })?;

        let content = self.fetch_file_into(repo_url, file_path, workspace.path());

        if let Err(error) = workspace.close() {
            warn!("failed to remove temporary workspace: {error}");
        }

        content
    }

    fn fetch_file_into(
        &self,
        repo_url: &str,
        file_path: &Path,
        workspace: &Path,
    ) -> Result<Vec<u8>, FetchError> {
        self.clone_repository(repo_url, workspace)
            .map_err(|source| FetchError::FileFetch {
                url: repo_url.to_string(),
                source: Box::new(source),
            })?;

        let content = std::fs::read(workspace.join(file_path)).map_err(|source| {
            error!(
                "error reading {} from cloned repository {}",
                file_path.display(),
                repo_url
            );
            FetchError::FileRead {
                url: repo_url.to_string(),
                path: file_path.to_path_buf(),
                source,
            }
        })?;

        debug!("file {} successfully downloaded", file_path.display());
        Ok(content)
    }

    fn create_if_not_exists(&self, output_path: &Path) -> Result<(), FetchError> {
        match std::fs::metadata(output_path) {
            Ok(_) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "directory {} does not exist, creating it",
                    output_path.display()
                );
                std::fs::create_dir_all(output_path).map_err(|source| FetchError::OutputPath {
                    path: output_path.to_path_buf(),
                    source,
                })
            }
            Err(source) => Err(FetchError::OutputPath {
                path: output_path.to_path_buf(),
                source,
            }),
        }
    }
}
