//! Configuration loaded from `config.toml`.
//!
//! Every field has a default, so an absent or partial file is fine. The
//! defaults reproduce the stock deployment: two models, rounds of ten
//! near neighbours plus two decoys.

use std::env;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::error::EngineError;
use crate::error::Result;

/// Environment variable that overrides [`Config::models_path`].
pub const MODELS_PATH_ENV: &str = "MODELS_PATH";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Directory the model files in `[[models]]` are resolved against.
    #[serde(default = "default_models_path")]
    pub models_path: PathBuf,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default = "default_models")]
    pub models: Vec<ModelSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models_path: default_models_path(),
            engine: EngineConfig::default(),
            server: ServerSettings::default(),
            export: ExportSettings::default(),
            models: default_models(),
        }
    }
}

impl Config {
    /// Default location: `<config_dir>/lexapprox/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("lexapprox/config.toml"))
            .unwrap_or_else(|| PathBuf::from("lexapprox.toml"))
    }

    /// Read `path`, falling back to defaults when the file does not exist.
    /// `MODELS_PATH` in the environment wins over the file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path)?;
            Self::from_toml(&text)?
        } else {
            debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };
        if let Ok(models_path) = env::var(MODELS_PATH_ENV) {
            config.models_path = PathBuf::from(models_path);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;
        let mut ids: Vec<u32> = self.models.iter().map(|m| m.id).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            return Err(EngineError::Config("model ids must be unique".into()));
        }
        if self.server.workers == 0 {
            return Err(EngineError::Config("server.workers must be at least 1".into()));
        }
        Ok(())
    }

    /// Absolute or `models_path`-relative location of a model file.
    pub fn model_file(&self, spec: &ModelSpec) -> PathBuf {
        if spec.file.is_absolute() {
            spec.file.clone()
        } else {
            self.models_path.join(&spec.file)
        }
    }
}

fn default_models_path() -> PathBuf {
    PathBuf::from("models")
}

/// Tuning of the suggestion rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Nearest neighbours offered per round.
    #[serde(default = "default_n_similar")]
    pub n_similar: usize,

    /// Decoys drawn from the middle of the ranking per round.
    #[serde(default = "default_n_dissimilar")]
    pub n_dissimilar: usize,

    /// Percentile of the ranking the starting set chains through. On a space
    /// of exactly 100 items the last chaining step ranks 89 items, so values
    /// above 89 only work on larger spaces.
    #[serde(default = "default_start_percentile")]
    pub start_percentile: usize,

    /// Width of the mid-ranking slice decoys are drawn from.
    #[serde(default = "default_dissimilar_pool")]
    pub dissimilar_pool: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            n_similar: default_n_similar(),
            n_dissimilar: default_n_dissimilar(),
            start_percentile: default_start_percentile(),
            dissimilar_pool: default_dissimilar_pool(),
        }
    }
}

impl EngineConfig {
    /// Items per round (K).
    pub const fn round_size(&self) -> usize {
        self.n_similar + self.n_dissimilar
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_similar == 0 {
            return Err(EngineError::Config("engine.n_similar must be at least 1".into()));
        }
        if self.n_dissimilar > self.dissimilar_pool {
            return Err(EngineError::Config(format!(
                "engine.n_dissimilar ({}) exceeds engine.dissimilar_pool ({})",
                self.n_dissimilar, self.dissimilar_pool
            )));
        }
        if !(1..=99).contains(&self.start_percentile) {
            return Err(EngineError::Config(format!(
                "engine.start_percentile must be within 1..=99, got {}",
                self.start_percentile
            )));
        }
        Ok(())
    }
}

const fn default_n_similar() -> usize {
    10
}

const fn default_n_dissimilar() -> usize {
    2
}

const fn default_start_percentile() -> usize {
    67
}

const fn default_dissimilar_pool() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Idle time after which a game session is dropped.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,

    /// Live sessions kept before the least recently used one is evicted.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            workers: default_workers(),
            session_ttl_secs: default_session_ttl(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

const fn default_workers() -> usize {
    4
}

const fn default_session_ttl() -> u64 {
    600
}

const fn default_max_sessions() -> usize {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportSettings {
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

/// One selectable embedding space.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelSpec {
    pub id: u32,
    pub name: String,
    /// What one item is called in the UI ("word", "symptom").
    pub item_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructions: String,
    /// Word-vector file, relative to `models_path` unless absolute.
    pub file: PathBuf,
}

fn default_models() -> Vec<ModelSpec> {
    vec![
        ModelSpec {
            id: 0,
            name: "bert_uncased_L-12_H-768_A-12".to_string(),
            item_name: "word".to_string(),
            description: "Vectors of items from dialogues of about 600 Simpsons episodes. \
                Vectors generated with \"BERT base uncased\" (pre-trained on English \
                Wikipedia and BookCorpus)."
                .to_string(),
            instructions: "Think of a word and keep selecting the most similar word from \
                the suggested ones until you see the word you're thinking of. Then click \
                the green button."
                .to_string(),
            file: PathBuf::from("bert-vectors-simpsons.txt"),
        },
        ModelSpec {
            id: 1,
            name: "bluebert_pubmed_mimic_uncased_L-12_H-768_A-12".to_string(),
            item_name: "symptom".to_string(),
            description: "Vectors of items from a list of medical symptoms. Vectors \
                generated with a BERT model pre-trained on PubMed abstracts and clinical \
                notes (MIMIC-III dataset)."
                .to_string(),
            instructions: "Think of a symptom and keep selecting the most similar symptom \
                from the suggested ones until you see the symptom you're thinking of. Then \
                click the green button."
                .to_string(),
            file: PathBuf::from("bluebert-vectors-symptoms.txt"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.engine.round_size(), 12);
        assert_eq!(config.models.len(), 2);
        assert_eq!(config.server.session_ttl_secs, 600);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
models_path = "/srv/models"

[engine]
n_similar = 6

[[models]]
id = 3
name = "tiny"
item_name = "word"
file = "tiny.txt"
"#,
        )
        .unwrap();
        assert_eq!(config.engine.n_similar, 6);
        assert_eq!(config.engine.n_dissimilar, 2);
        assert_eq!(config.models.len(), 1);
        assert_eq!(
            config.model_file(&config.models[0]),
            PathBuf::from("/srv/models/tiny.txt")
        );
    }

    #[test]
    fn rejects_invalid_engine_settings() {
        assert!(Config::from_toml("[engine]\nn_similar = 0\n").is_err());
        assert!(Config::from_toml("[engine]\nn_dissimilar = 5\ndissimilar_pool = 4\n").is_err());
        assert!(Config::from_toml("[engine]\nstart_percentile = 100\n").is_err());
    }

    #[test]
    fn rejects_duplicate_model_ids() {
        let text = r#"
[[models]]
id = 1
name = "a"
item_name = "word"
file = "a.txt"

[[models]]
id = 1
name = "b"
item_name = "word"
file = "b.txt"
"#;
        assert!(matches!(Config::from_toml(text), Err(EngineError::Config(_))));
    }
}
