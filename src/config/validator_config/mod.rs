//! Validator configuration support
//!
//! Loads configuration from `analysis-gate.toml` or `.analysis-gate.json`
//! in the working directory, or from an explicit path.
//!
//! # Configuration Format
//!
//! ```toml
//! # analysis-gate.toml
//!
//! [sections]
//! avatar = "avatar_ultra_detalhado"
//! insights = "insights_exclusivos"
//!
//! [simulation]
//! phrases = ["n/a", "placeholder", "template"]
//!
//! [cleaning]
//! invalid_markers = ["ERRO_", "FALHA_", "INVALID_"]
//!
//! [journal]
//! enabled = true
//! dir = ".analysis-gate/journal"
//!
//! [defaults]
//! format = "json"
//! no_emoji = true
//! ```
//!
//! Every key is optional. The threshold profiles are not configurable.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config files searched in the working directory, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &["analysis-gate.toml", ".analysis-gate.json"];

/// Phrases that mark generic, placeholder-like orchestrator output
const DEFAULT_SIMULATION_PHRASES: &[&str] = &[
    "n/a",
    "não informado",
    "customizado para",
    "baseado em dados",
    "específico para",
    "exemplo genérico",
    "placeholder",
    "template",
];

/// Markers the orchestrator puts on failed or invalid fields
const DEFAULT_INVALID_MARKERS: &[&str] = &["ERRO_", "FALHA_", "INVALID_"];

/// Validator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Key names of the analysis sections
    #[serde(default)]
    pub sections: SectionKeys,

    /// Genericness phrases for simulation detection
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Output cleaning markers
    #[serde(default)]
    pub cleaning: CleaningConfig,

    /// Event journal
    #[serde(default)]
    pub journal: JournalConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Key names of the sections the orchestrator emits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionKeys {
    /// Sections worth half of the structure score
    #[serde(default = "default_essential")]
    pub essential: Vec<String>,

    /// Sections sharing the other half of the structure score
    #[serde(default = "default_optional")]
    pub optional: Vec<String>,

    #[serde(default = "default_avatar")]
    pub avatar: String,

    /// Avatar subsections, each worth an equal share of 80 points
    #[serde(default = "default_avatar_subsections")]
    pub avatar_subsections: Vec<String>,

    /// Avatar subsection holding the demographic profile
    #[serde(default = "default_avatar_demographics")]
    pub avatar_demographics: String,

    /// Avatar subsection holding visceral pains
    #[serde(default = "default_avatar_pains")]
    pub avatar_pains: String,

    /// Avatar subsection holding secret desires
    #[serde(default = "default_avatar_desires")]
    pub avatar_desires: String,

    #[serde(default = "default_research")]
    pub research: String,

    /// Statistics map inside the research section
    #[serde(default = "default_research_stats")]
    pub research_stats: String,

    #[serde(default = "default_content_length_field")]
    pub content_length_field: String,

    #[serde(default = "default_unique_sources_field")]
    pub unique_sources_field: String,

    #[serde(default = "default_average_quality_field")]
    pub average_quality_field: String,

    #[serde(default = "default_insights")]
    pub insights: String,

    /// Mental drivers section
    #[serde(default = "default_drivers")]
    pub drivers: String,

    /// List of drivers when the drivers section is a map
    #[serde(default = "default_drivers_list")]
    pub drivers_list: String,
}

impl Default for SectionKeys {
    fn default() -> Self {
        Self {
            essential: default_essential(),
            optional: default_optional(),
            avatar: default_avatar(),
            avatar_subsections: default_avatar_subsections(),
            avatar_demographics: default_avatar_demographics(),
            avatar_pains: default_avatar_pains(),
            avatar_desires: default_avatar_desires(),
            research: default_research(),
            research_stats: default_research_stats(),
            content_length_field: default_content_length_field(),
            unique_sources_field: default_unique_sources_field(),
            average_quality_field: default_average_quality_field(),
            insights: default_insights(),
            drivers: default_drivers(),
            drivers_list: default_drivers_list(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_essential() -> Vec<String> {
    strings(&["avatar_ultra_detalhado"])
}
fn default_optional() -> Vec<String> {
    strings(&[
        "drivers_mentais_customizados",
        "provas_visuais_sugeridas",
        "sistema_anti_objecao",
        "pre_pitch_invisivel",
        "insights_exclusivos",
    ])
}
fn default_avatar() -> String {
    "avatar_ultra_detalhado".to_string()
}
fn default_avatar_subsections() -> Vec<String> {
    strings(&[
        "perfil_demografico",
        "perfil_psicografico",
        "dores_viscerais",
        "desejos_secretos",
    ])
}
fn default_avatar_demographics() -> String {
    "perfil_demografico".to_string()
}
fn default_avatar_pains() -> String {
    "dores_viscerais".to_string()
}
fn default_avatar_desires() -> String {
    "desejos_secretos".to_string()
}
fn default_research() -> String {
    "pesquisa_web_massiva".to_string()
}
fn default_research_stats() -> String {
    "estatisticas".to_string()
}
fn default_content_length_field() -> String {
    "total_conteudo".to_string()
}
fn default_unique_sources_field() -> String {
    "fontes_unicas".to_string()
}
fn default_average_quality_field() -> String {
    "qualidade_media".to_string()
}
fn default_insights() -> String {
    "insights_exclusivos".to_string()
}
fn default_drivers() -> String {
    "drivers_mentais_customizados".to_string()
}
fn default_drivers_list() -> String {
    "drivers_customizados".to_string()
}

/// Simulation detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Phrases counted case-insensitively in the serialized analysis
    #[serde(default = "default_simulation_phrases")]
    pub phrases: Vec<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            phrases: default_simulation_phrases(),
        }
    }
}

fn default_simulation_phrases() -> Vec<String> {
    strings(DEFAULT_SIMULATION_PHRASES)
}

/// Output cleaning configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Substrings (matched case-insensitively) that disqualify a field
    #[serde(default = "default_invalid_markers")]
    pub invalid_markers: Vec<String>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            invalid_markers: default_invalid_markers(),
        }
    }
}

fn default_invalid_markers() -> Vec<String> {
    strings(DEFAULT_INVALID_MARKERS)
}

/// Event journal configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Write one JSON file per validation event
    #[serde(default)]
    pub enabled: bool,

    /// Journal root (default: platform data dir)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl JournalConfig {
    /// Effective journal directory
    pub fn effective_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(default_journal_dir)
    }
}

/// Journal root under the platform data dir, e.g. ~/.local/share/analysis-gate/journal
pub fn default_journal_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .map(|h| h.join(".local").join("share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("analysis-gate").join("journal")
}

/// Default CLI flags that can be set in the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliDefaults {
    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,

    /// Disable emoji by default
    #[serde(default)]
    pub no_emoji: Option<bool>,
}

/// Load configuration from the given directory.
///
/// Searches for `analysis-gate.toml`, then `.analysis-gate.json`.
/// A file that fails to parse is skipped with a warning. Returns the
/// built-in configuration when nothing is found.
pub fn load_config(dir: &Path) -> ValidatorConfig {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", path.display(), e);
            }
        }
    }

    debug!("No config file found, using defaults");
    ValidatorConfig::default()
}

/// Load configuration from an explicit file; the format follows the extension
pub fn load_config_file(path: &Path) -> anyhow::Result<ValidatorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config file {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let config: ValidatorConfig = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON config {}", path.display()))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Invalid TOML config {}", path.display()))?
    };

    if config.simulation.phrases.iter().any(|p| p.is_empty()) {
        anyhow::bail!(
            "{}: simulation phrases must not be empty strings",
            path.display()
        );
    }
    if config.cleaning.invalid_markers.iter().any(|m| m.is_empty()) {
        anyhow::bail!(
            "{}: cleaning markers must not be empty strings",
            path.display()
        );
    }

    Ok(config)
}

/// Commented config written by `analysis-gate init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# analysis-gate configuration
# Every key is optional; omitted keys use the built-in defaults shown here.

[sections]
# essential = ["avatar_ultra_detalhado"]
# optional = ["drivers_mentais_customizados", "provas_visuais_sugeridas", "sistema_anti_objecao", "pre_pitch_invisivel", "insights_exclusivos"]
# avatar = "avatar_ultra_detalhado"
# avatar_subsections = ["perfil_demografico", "perfil_psicografico", "dores_viscerais", "desejos_secretos"]
# research = "pesquisa_web_massiva"
# research_stats = "estatisticas"
# insights = "insights_exclusivos"

[simulation]
# Phrases counted case-insensitively; more hits lower the simulation score
# phrases = ["n/a", "não informado", "customizado para", "baseado em dados", "específico para", "exemplo genérico", "placeholder", "template"]

[cleaning]
# invalid_markers = ["ERRO_", "FALHA_", "INVALID_"]

[journal]
# Write one JSON file per validation event
enabled = false
# dir = ".analysis-gate/journal"

[defaults]
# format = "text"
# no_emoji = false
"#;

#[cfg(test)]
mod tests;
