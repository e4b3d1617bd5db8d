//! Config file loading

use figment::value::{Dict, Map};
use figment::{Figment, Metadata, Profile, Provider};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::binding::{self, EnvKey};
use super::error::LoadError;
use super::Config;

/// File formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    DotEnv,
}

impl Format {
    /// Detect the format from the text after the last `.` of the file name.
    ///
    /// A file named just `.env` counts as dotenv. Returns `None` for unknown
    /// or missing extensions.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "env" => Some(Self::DotEnv),
            _ => None,
        }
    }

    fn parse(self, content: &str, path: &Path) -> Result<Dict, LoadError> {
        let parse_error = |message: String| LoadError::Parse {
            path: path.to_path_buf(),
            format: self,
            message,
        };

        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
            // An empty YAML document is a null, not an empty mapping
            Self::Yaml if content.trim().is_empty() => Ok(Dict::new()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string())),
            Self::DotEnv => {
                let mut dict = Dict::new();
                for item in dotenvy::from_read_iter(content.as_bytes()) {
                    let (key, value) = item.map_err(|e| parse_error(e.to_string()))?;
                    dict.insert(key, value.into());
                }
                Ok(dict)
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::DotEnv => "dotenv",
        };
        f.write_str(name)
    }
}

/// One source of values, in merge order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feeder {
    File { path: PathBuf, format: Format },
    Env,
}

impl Feeder {
    /// Produce this source's values shaped like `template`.
    fn feed(&self, template: &Dict, keys: &[EnvKey]) -> Result<Dict, LoadError> {
        match self {
            Self::File { path, format } => {
                let content = fs::read_to_string(path)
                    .map_err(|source| LoadError::Read { path: path.clone(), source })?;
                let parsed = format.parse(&content, path)?;

                if *format == Format::DotEnv {
                    Ok(bind_flat(parsed, template, keys))
                } else {
                    Ok(binding::align(parsed, template))
                }
            }
            Self::Env => {
                // Exact, case-sensitive lookup per binding, in declaration order
                let mut dict = Dict::new();
                for key in keys {
                    let Ok(value) = env::var(key.var) else { continue };
                    tracing::trace!("Environment variable {} bound to {}", key.var, key.path);
                    binding::place(&mut dict, template, key.path, &value);
                }
                Ok(dict)
            }
        }
    }
}

impl fmt::Display for Feeder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path, format } => write!(f, "{} file {}", format, path.display()),
            Self::Env => f.write_str("environment"),
        }
    }
}

/// Dotenv keys only reach the struct through explicit bindings.
fn bind_flat(parsed: Dict, template: &Dict, keys: &[EnvKey]) -> Dict {
    let mut dict = Dict::new();
    for (name, value) in parsed {
        let Some(raw) = value.as_str() else { continue };
        let mut bound = false;
        for key in keys.iter().filter(|k| k.var == name) {
            binding::place(&mut dict, template, key.path, raw);
            bound = true;
        }
        if !bound {
            tracing::debug!("Dotenv key {} has no binding, ignoring", name);
        }
    }
    dict
}

/// A named, already-bound layer merged into the figment.
struct Layer {
    name: String,
    dict: Dict,
}

impl Provider for Layer {
    fn metadata(&self) -> Metadata {
        Metadata::named(self.name.clone())
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Ok(Profile::Default.collect(self.dict.clone()))
    }
}

/// Collects config files, then binds them plus the environment into a [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Loader {
    files: Vec<Feeder>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file. Paths with an unrecognized extension are skipped.
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Format::from_path(path) {
            Some(format) => {
                tracing::debug!("Registered {} config file {}", format, path.display());
                self.files.push(Feeder::File { path: path.to_path_buf(), format });
            }
            None => {
                tracing::debug!("Skipping config file with unrecognized extension: {}", path.display());
            }
        }
        self
    }

    pub fn files<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths.into_iter().fold(self, |loader, path| loader.file(path))
    }

    /// Registered sources in merge order; the environment is always last.
    pub fn feeders(&self) -> Vec<Feeder> {
        let mut feeders = self.files.clone();
        feeders.push(Feeder::Env);
        feeders
    }

    /// Feed every source into `config`, then run its validation.
    ///
    /// `config` is only overwritten once every source has been read and
    /// bound successfully; `validate` is not called on binding failures.
    pub fn load<C: Config>(&self, config: &mut C) -> Result<(), LoadError> {
        let template = binding::template_of(&*config)?;

        let mut figment = Figment::new().merge(Layer {
            name: "current values".to_string(),
            dict: template.clone(),
        });
        for feeder in self.feeders() {
            let dict = feeder.feed(&template, C::ENV_KEYS)?;
            figment = figment.merge(Layer { name: feeder.to_string(), dict });
        }

        *config = figment.extract_lossy()?;
        config.validate().map_err(LoadError::Validation)
    }
}

/// Load `paths` (in order) and then the environment into `config`.
///
/// Environment variables bound through [`Config::ENV_KEYS`] always take
/// precedence; among files the later one wins. Files with an unrecognized
/// extension are ignored.
pub fn load<C, I, P>(config: &mut C, paths: I) -> Result<(), LoadError>
where
    C: Config,
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    Loader::new().files(paths).load(config)
}
