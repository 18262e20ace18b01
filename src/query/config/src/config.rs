// Copyright 2021 Datafuse Labs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

use clap::ArgMatches;
use clap::Args;
use clap::CommandFactory;
use clap::FromArgMatches;
use clap::Parser;
use clap::ValueEnum;
use clap::parser::ValueSource;
use frjoin_common_exception::ErrorCode;
use frjoin_common_exception::Result;
use frjoin_common_tracing::Config as InnerLogConfig;
use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_VALUE_GROUP_CAPACITY: usize = 1000;
pub const DEFAULT_HASH_TABLE_CAPACITY: usize = 1000;
pub const DEFAULT_OPERATOR_NAME: &str = "FRJoin";

/// When a join key counts as null.
///
/// A single-field key is null iff its field is null under both policies;
/// the policies only differ for multi-field keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum NullKeyPolicy {
    /// A key is null when any of its fields is null.
    #[default]
    AnyField,
    /// A key is null only when it carries no value at all, i.e. every field is null.
    WholeKey,
}

/// When the replicated hash tables are built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum BuildMode {
    /// Build on the first `prepare` call issued by the probe loop.
    #[default]
    Lazy,
    /// Build as soon as the broadcast inputs are attached.
    Eager,
}

impl Display for NullKeyPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NullKeyPolicy::AnyField => write!(f, "any_field"),
            NullKeyPolicy::WholeKey => write!(f, "whole_key"),
        }
    }
}

impl Display for BuildMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Lazy => write!(f, "lazy"),
            BuildMode::Eager => write!(f, "eager"),
        }
    }
}

/// Settings of one fragment-replicate join operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Args)]
#[serde(default)]
pub struct FrJoinConfig {
    /// Number of values every new value group is pre-sized for.
    #[clap(
        long = "frjoin-value-group-capacity",
        value_name = "VALUE",
        env = "FRJOIN_VALUE_GROUP_CAPACITY",
        default_value_t = DEFAULT_VALUE_GROUP_CAPACITY
    )]
    pub value_group_capacity: usize,

    /// Number of distinct keys every replicated hash table is pre-sized for.
    #[clap(
        long = "frjoin-hash-table-capacity",
        value_name = "VALUE",
        env = "FRJOIN_HASH_TABLE_CAPACITY",
        default_value_t = DEFAULT_HASH_TABLE_CAPACITY
    )]
    pub hash_table_capacity: usize,

    /// Which join keys are discarded as null <any_field|whole_key>.
    #[clap(
        long = "frjoin-null-key-policy",
        value_name = "VALUE",
        value_enum,
        env = "FRJOIN_NULL_KEY_POLICY",
        default_value_t = NullKeyPolicy::AnyField
    )]
    pub null_key_policy: NullKeyPolicy,

    /// When the replicated hash tables are built <lazy|eager>.
    #[clap(
        long = "frjoin-build-mode",
        value_name = "VALUE",
        value_enum,
        env = "FRJOIN_BUILD_MODE",
        default_value_t = BuildMode::Lazy
    )]
    pub build_mode: BuildMode,

    /// Operator name used in diagnostics.
    #[clap(
        long = "frjoin-operator-name",
        value_name = "VALUE",
        env = "FRJOIN_OPERATOR_NAME",
        default_value = DEFAULT_OPERATOR_NAME
    )]
    pub operator_name: String,
}

impl Default for FrJoinConfig {
    fn default() -> Self {
        Self {
            value_group_capacity: DEFAULT_VALUE_GROUP_CAPACITY,
            hash_table_capacity: DEFAULT_HASH_TABLE_CAPACITY,
            null_key_policy: NullKeyPolicy::AnyField,
            build_mode: BuildMode::Lazy,
            operator_name: DEFAULT_OPERATOR_NAME.to_string(),
        }
    }
}

impl Display for FrJoinConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "value_group_capacity={}, hash_table_capacity={}, null_key_policy={}, build_mode={}, operator_name={}",
            self.value_group_capacity,
            self.hash_table_capacity,
            self.null_key_policy,
            self.build_mode,
            self.operator_name
        )
    }
}

impl FrJoinConfig {
    pub fn load_from_toml(content: &str) -> Result<Self> {
        let config: FrJoinConfig = toml::from_str(content)
            .map_err(|e| ErrorCode::InvalidConfig(format!("invalid frjoin config: {}", e)))?;
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> Result<()> {
        if self.value_group_capacity == 0 {
            return Err(ErrorCode::InvalidConfig(
                "value_group_capacity must be greater than 0",
            ));
        }

        if self.hash_table_capacity == 0 {
            return Err(ErrorCode::InvalidConfig(
                "hash_table_capacity must be greater than 0",
            ));
        }

        if self.operator_name.trim().is_empty() {
            return Err(ErrorCode::InvalidConfig("operator_name must not be empty"));
        }

        Ok(())
    }

    // Flags and env vars win over the file, defaults never do.
    fn merge_matches(&mut self, arg_conf: &FrJoinConfig, matches: &ArgMatches) {
        let explicit = |id: &str| {
            matches!(
                matches.value_source(id),
                Some(ValueSource::CommandLine) | Some(ValueSource::EnvVariable)
            )
        };

        if explicit("value_group_capacity") {
            self.value_group_capacity = arg_conf.value_group_capacity;
        }
        if explicit("hash_table_capacity") {
            self.hash_table_capacity = arg_conf.hash_table_capacity;
        }
        if explicit("null_key_policy") {
            self.null_key_policy = arg_conf.null_key_policy;
        }
        if explicit("build_mode") {
            self.build_mode = arg_conf.build_mode;
        }
        if explicit("operator_name") {
            self.operator_name = arg_conf.operator_name.clone();
        }
    }
}

/// Config for a worker hosting fragment-replicate joins.
///
/// Loaded from, in increasing priority:
///
/// - the TOML config file (`--config-file` or `CONFIG_FILE`)
/// - env vars
/// - command line args
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Parser)]
#[clap(name = "frjoin", about, version = env!("CARGO_PKG_VERSION"))]
#[serde(default)]
pub struct Config {
    #[clap(long, short = 'c', default_value_t)]
    #[serde(skip)]
    pub config_file: String,

    #[clap(flatten)]
    pub frjoin: FrJoinConfig,

    #[clap(skip)]
    pub log: InnerLogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_file: String::new(),
            frjoin: FrJoinConfig::default(),
            log: InnerLogConfig::default(),
        }
    }
}

impl Config {
    /// Load from the process args, env and config file.
    pub fn load() -> Result<Self> {
        Self::load_from_args(env::args_os())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command()
            .try_get_matches_from(args)
            .map_err(|e| ErrorCode::InvalidConfig(e.to_string()))?;
        let arg_conf = Self::from_arg_matches(&matches)
            .map_err(|e| ErrorCode::InvalidConfig(e.to_string()))?;

        let config_file = if !arg_conf.config_file.is_empty() {
            arg_conf.config_file.clone()
        } else if let Ok(path) = env::var("CONFIG_FILE") {
            path
        } else {
            String::new()
        };

        let mut conf = if config_file.is_empty() {
            arg_conf.clone()
        } else {
            let content = std::fs::read_to_string(&config_file).map_err(|e| {
                ErrorCode::InvalidConfig(format!(
                    "failed to read config file {}: {}",
                    config_file, e
                ))
            })?;
            let mut conf = Self::load_from_toml(&content)?;
            conf.frjoin.merge_matches(&arg_conf.frjoin, &matches);
            conf
        };

        conf.config_file = config_file;
        conf.frjoin.check()?;
        Ok(conf)
    }

    pub fn load_from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ErrorCode::InvalidConfig(format!("invalid config: {}", e)))
    }
}
