//! Configuration module for analysis-gate
//!
//! This module handles:
//! - Validator configuration (analysis-gate.toml)
//! - Section key names of the analysis document
//! - Simulation phrases and cleaning markers
//! - Journal and CLI defaults

mod validator_config;

pub use validator_config::{
    default_journal_dir,
    load_config,
    load_config_file,
    CleaningConfig,
    CliDefaults,
    JournalConfig,
    SectionKeys,
    SimulationConfig,
    ValidatorConfig,
    CONFIG_FILE_NAMES,
    DEFAULT_CONFIG_TEMPLATE,
};
