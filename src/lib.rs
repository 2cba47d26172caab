//! In-memory election core
//!
//! Voters register, candidates are added, each voter casts at most one vote
//! after authenticating, and tallies are reported through a pluggable
//! obfuscation strategy. Front ends (CLI, HTTP) talk to [`ElectionService`].

pub mod config;
pub mod errors;
pub mod types;
pub mod voting;

// Re-export commonly used types
pub use errors::{EntityKind, Error, Result};
pub use types::{Candidate, Credential, ResultRow, Voter};
pub use voting::ElectionService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default settings (`election=info`, full format)
pub fn init() -> Result<()> {
    init_with(&config::LoggingConfig::default())
}

/// Initialize logging from a [`config::LoggingConfig`]
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a global
/// subscriber is already installed.
pub fn init_with(logging: &config::LoggingConfig) -> Result<()> {
    use config::LogFormat;

    let builder = tracing_subscriber::fmt().with_env_filter(logging.env_filter()?);
    let installed = match logging.format {
        LogFormat::Full => builder.try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    installed.map_err(|e| Error::internal(format!("Logging already initialized: {e}")))?;

    tracing::info!("🗳️  Election core v{} initialized", VERSION);
    Ok(())
}
