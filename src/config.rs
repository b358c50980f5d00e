//! Run configuration for the extraction engine.

use std::{fs::File, path::Path};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

/// Outlet-type prefixes accepted by the field mapper. Data rows whose first
/// cell starts with none of these produce no canonical record.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ExtractConfig {
    #[serde(default = "default_outlet_types")]
    pub outlet_types: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            outlet_types: default_outlet_types(),
        }
    }
}

fn default_outlet_types() -> Vec<String> {
    ["#A", "#B", "#C"].map(str::to_string).into()
}

impl ExtractConfig {
    /// Loads and validates the configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let rdr = File::open(path)
            .with_context(|| format!("opening configuration file {:?}", path))?;
        let config: Self =
            serde_yaml_ng::from_reader(rdr).with_context(|| "parsing configuration file")?;
        config.ensure_valid()?;
        Ok(config)
    }

    /// Checks that the configuration can drive an extraction.
    pub fn ensure_valid(&self) -> Result<()> {
        ensure!(!self.outlet_types.is_empty(), "no outlet types selected");
        ensure!(
            self.outlet_types.iter().all(|prefix| !prefix.is_empty()),
            "empty outlet type prefix",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::ExtractConfig;

    #[gtest]
    fn defaults_to_outlet_types_a_to_c() {
        let config = ExtractConfig::default();

        expect_that!(config.outlet_types, elements_are![eq("#A"), eq("#B"), eq("#C")]);
    }

    #[gtest]
    fn parses_outlet_types_from_yaml() {
        let config: ExtractConfig =
            serde_yaml_ng::from_str("outlet_types: ['#A', '#D']").expect("should parse");

        expect_that!(config.outlet_types, elements_are![eq("#A"), eq("#D")]);
    }

    #[gtest]
    fn missing_outlet_types_fall_back_to_the_default() {
        let config: ExtractConfig = serde_yaml_ng::from_str("{}").expect("should parse");

        expect_that!(config, eq(&ExtractConfig::default()));
    }

    #[gtest]
    fn rejects_empty_outlet_type_selection() {
        let config = ExtractConfig {
            outlet_types: vec![],
        };

        expect_that!(config.ensure_valid(), err(anything()));
    }
}
