use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use bfsweep_core::errors::SweepError;
use serde::{Deserialize, Serialize};

use crate::serde::from_yaml_slice;

/// One concrete assignment of the three benchmark parameters.
///
/// `key_power` and `lookup_power` are exponents (the benchmark runs with
/// `2^n` keys and lookups); `bits_per_key` is passed through as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParameterCombination {
    pub key_power: u32,
    pub bits_per_key: u32,
    pub lookup_power: u32,
}

impl ParameterCombination {
    pub fn new(key_power: u32, bits_per_key: u32, lookup_power: u32) -> Self {
        Self {
            key_power,
            bits_per_key,
            lookup_power,
        }
    }

    /// Positional arguments handed to the benchmark, in invocation order.
    pub fn args(&self) -> [String; 3] {
        [
            self.key_power.to_string(),
            self.bits_per_key.to_string(),
            self.lookup_power.to_string(),
        ]
    }

    /// Name of the result file for this combination.
    pub fn file_name(&self) -> String {
        format!(
            "keys_{}_bits_{}_lookups_{}.txt",
            self.key_power, self.bits_per_key, self.lookup_power
        )
    }
}

impl fmt::Display for ParameterCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "keys=2^{}, bits={}, lookups=2^{}",
            self.key_power, self.bits_per_key, self.lookup_power
        )
    }
}

/// Location of the result file for `combination` under `output_dir`.
pub fn output_path(output_dir: &Path, combination: &ParameterCombination) -> PathBuf {
    output_dir.join(combination.file_name())
}

/// The three sweep dimensions. The sweep covers their Cartesian product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterGrid {
    #[serde(default)]
    pub key_powers: Vec<u32>,
    #[serde(default)]
    pub bits_per_key: Vec<u32>,
    #[serde(default)]
    pub lookup_powers: Vec<u32>,
}

impl Default for ParameterGrid {
    fn default() -> Self {
        Self {
            key_powers: vec![12, 14, 16, 18],
            bits_per_key: vec![14],
            lookup_powers: vec![24],
        }
    }
}

impl ParameterGrid {
    pub fn new(key_powers: Vec<u32>, bits_per_key: Vec<u32>, lookup_powers: Vec<u32>) -> Self {
        Self {
            key_powers,
            bits_per_key,
            lookup_powers,
        }
    }

    /// A grid with no values in any dimension.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    /// Loads a grid from a YAML document.
    pub fn from_yaml_path(path: &Path) -> Result<Self, SweepError> {
        let bytes = fs::read(path).map_err(|err| SweepError::io("bfsweep.grid_read", path, err))?;
        from_yaml_slice(&bytes).map_err(|err| match err {
            SweepError::Config(info) => {
                SweepError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Number of combinations in the sweep.
    pub fn len(&self) -> usize {
        self.key_powers.len() * self.bits_per_key.len() * self.lookup_powers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the Cartesian product with `key_power` outermost and
    /// `lookup_power` innermost.
    pub fn combinations(&self) -> impl Iterator<Item = ParameterCombination> + '_ {
        self.key_powers.iter().flat_map(move |&key_power| {
            self.bits_per_key.iter().flat_map(move |&bits_per_key| {
                self.lookup_powers.iter().map(move |&lookup_power| {
                    ParameterCombination::new(key_power, bits_per_key, lookup_power)
                })
            })
        })
    }
}
