//! Configuration loading and merging
//!
//! Handles loading from config files and environment variables with proper
//! precedence (Env > later File > earlier File > current values).

pub mod binding;
pub mod error;
pub mod loader;

pub use binding::EnvKey;
pub use error::LoadError;
pub use loader::{load, Feeder, Format, Loader};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A destination type the loader can populate.
///
/// File keys are matched against the serialized field names ignoring case,
/// `_` and `-`, so a JSON `LogFile` or a YAML `logfile` both land in a
/// `log_file` field. Environment variables and dotenv entries are only
/// consumed through the [`EnvKey`] bindings in [`Config::ENV_KEYS`].
pub trait Config: Serialize + DeserializeOwned {
    /// Environment variable name to dotted field path bindings.
    const ENV_KEYS: &'static [EnvKey] = &[];

    /// Called once per load, after every source has been applied.
    fn validate(&self) -> anyhow::Result<()>;
}
