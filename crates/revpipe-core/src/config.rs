use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sources::SourceKind;

/// Environment variable consulted when no `--config` flag is given.
pub const CONFIG_ENV_VAR: &str = "REVPIPE_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub sources: SourcePaths,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourcePaths {
    pub sales: PathBuf,
    pub product: PathBuf,
    pub customer: PathBuf,
    pub inventory: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            sales: PathBuf::from(SourceKind::Sales.descriptor().default_path),
            product: PathBuf::from(SourceKind::Product.descriptor().default_path),
            customer: PathBuf::from(SourceKind::Customer.descriptor().default_path),
            inventory: PathBuf::from(SourceKind::Inventory.descriptor().default_path),
        }
    }
}

impl SourcePaths {
    pub fn for_kind(&self, kind: SourceKind) -> &Path {
        match kind {
            SourceKind::Sales => &self.sales,
            SourceKind::Product => &self.product,
            SourceKind::Customer => &self.customer,
            SourceKind::Inventory => &self.inventory,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Every target receives the same artifact. The default pair matches
    /// the directory layout downstream consumers already read from.
    pub targets: Vec<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            targets: vec![
                PathBuf::from("dataset/sales/output_df/revenue_summary.csv"),
                PathBuf::from("dataset/sales/output_sql/revenue_summary.csv"),
            ],
        }
    }
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Picks the configuration source: explicit flag, then the
    /// `REVPIPE_CONFIG` environment variable, then built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::load(Path::new(&path)),
            Err(_) => Ok(Self::default()),
        }
    }
}
