//! configer: typed configuration from files and the environment
//!
//! Loads JSON, YAML and dotenv files in the order given, then the process
//! environment, into a caller-defined struct and runs its validation hook.
//! Environment variables always win over file values.
//!
//! ```rust,ignore
//! use configer::{Config, EnvKey, StringSlice};
//!
//! let mut files = StringSlice::new();
//! files.set("config.json");
//! files.set("local.env");
//!
//! let mut cfg = ServerConfig::default();
//! configer::load(&mut cfg, &files)?;
//! ```

pub mod config;
pub mod flag;

pub use config::{load, Config, EnvKey, Feeder, Format, LoadError, Loader};
pub use flag::StringSlice;
