use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_URL: &str = "https://euromillions.api.pedromealha.dev/draws";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source_url: String,
    pub timeout_secs: u64,
    /// Nombre de tirages listés par `results`
    pub results_shown: usize,
    /// Taille des classements top/bottom
    pub top: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: 30,
            results_shown: 10,
            top: 5,
        }
    }
}

impl AppConfig {
    /// Charge le fichier JSON s'il est fourni ; les champs absents gardent
    /// leur valeur par défaut.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&json)
            .with_context(|| format!("JSON invalide dans {}", path.display()))?;
        log::debug!("Configuration chargée depuis {}", path.display());
        Ok(config)
    }

    /// Les options de la ligne de commande priment sur le fichier.
    pub fn with_overrides(mut self, url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(url) = url {
            self.source_url = url;
        }
        if let Some(t) = timeout_secs {
            self.timeout_secs = t;
        }
        self
    }
}
