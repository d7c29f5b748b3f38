//! zigdl core: version index lookups, ZLS compatibility queries and
//! mirrored, digest-verified downloads.

pub mod companion;
pub mod config;
pub mod error;
pub mod index;
pub mod install;
pub mod io;

pub mod reporter;

pub use companion::CompatibilityResolver;
pub use config::Config;
pub use error::{Error, ErrorKind, Result, TransportError};
pub use index::VersionIndex;
pub use install::{InstallOutcome, Installer};
pub use io::download::{MirrorPolicy, MirroredDownloader, Verified};
pub use io::http::{HttpTransport, ReqwestTransport};
pub use reporter::{NullReporter, Reporter, TracingReporter};

/// User Agent string for core operations
pub const USER_AGENT: &str = concat!("zigdl/", env!("CARGO_PKG_VERSION"));
