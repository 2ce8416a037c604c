//! Récupération des tirages : API publique ou fichier JSON local.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use thiserror::Error;

use tirages_core::repository::DrawRepository;

use crate::config::AppConfig;

const USER_AGENT: &str = concat!("tirages/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Requête HTTP échouée : {0}")]
    Request(#[from] reqwest::Error),

    #[error("Réponse HTTP {status} pour {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Impossible de lire {path:?} : {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawSource {
    Http { url: String, timeout: Duration },
    File(PathBuf),
}

impl DrawSource {
    /// Un fichier local prime sur l'URL configurée.
    pub fn from_config(config: &AppConfig, file: Option<PathBuf>) -> Self {
        match file {
            Some(path) => DrawSource::File(path),
            None => DrawSource::Http {
                url: config.source_url.clone(),
                timeout: Duration::from_secs(config.timeout_secs),
            },
        }
    }

    pub fn fetch_text(&self) -> Result<String, SourceError> {
        match self {
            DrawSource::Http { url, timeout } => {
                log::info!("Téléchargement des tirages depuis {url}");
                let client = reqwest::blocking::Client::builder()
                    .timeout(*timeout)
                    .user_agent(USER_AGENT)
                    .build()?;
                let response = client.get(url).send()?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::Status {
                        status,
                        url: url.clone(),
                    });
                }
                Ok(response.text()?)
            }
            DrawSource::File(path) => {
                log::info!("Lecture des tirages depuis {}", path.display());
                std::fs::read_to_string(path).map_err(|source| SourceError::Io {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

pub fn load_repository(source: &DrawSource) -> Result<DrawRepository> {
    let text = source.fetch_text()?;
    let mut repo = DrawRepository::new();
    let n = repo.load_json(&text).context("Données de tirages inexploitables")?;
    log::info!("{n} tirages chargés");
    Ok(repo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("tirages-{}-{}.json", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_from_config() {
        let config = AppConfig::default();
        assert_eq!(
            DrawSource::from_config(&config, None),
            DrawSource::Http {
                url: config.source_url.clone(),
                timeout: Duration::from_secs(30),
            }
        );
        assert_eq!(
            DrawSource::from_config(&config, Some(PathBuf::from("draws.json"))),
            DrawSource::File(PathBuf::from("draws.json"))
        );
    }

    #[test]
    fn test_load_repository_from_file() {
        let path = write_temp(
            "ok",
            r#"[{"date": "2024-01-01", "numbers": ["1","2","3","4","5"], "stars": ["1","2"]},
                {"date": "2024-01-08", "numbers": [1,2,3,4,6], "stars": [1,3]}]"#,
        );
        let repo = load_repository(&DrawSource::File(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.latest().unwrap().numbers, vec![1, 2, 3, 4, 6]);
    }

    #[test]
    fn test_load_repository_rejects_object() {
        let path = write_temp("obj", r#"{"error": "rate limited"}"#);
        let res = load_repository(&DrawSource::File(path.clone()));
        std::fs::remove_file(&path).unwrap();
        assert!(res.is_err());
    }

    #[test]
    fn test_missing_file() {
        let source = DrawSource::File(PathBuf::from("/nonexistent/tirages.json"));
        assert!(matches!(source.fetch_text(), Err(SourceError::Io { .. })));
    }
}
