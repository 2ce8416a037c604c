use thiserror::Error;

/// Erreurs d'ingestion des tirages. L'état du dépôt reste inchangé.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("JSON invalide : {0}")]
    Json(#[source] serde_json::Error),

    #[error("Les données ne sont pas une liste de tirages (reçu : {found})")]
    NotASequence { found: &'static str },

    #[error("Tirage #{index} mal formé : {source}")]
    MalformedRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickError {
    #[error("Date invalide : '{0}'")]
    InvalidSeed(String),

    #[error("{kind} {value} hors limites (1-{max})")]
    OutOfRange {
        kind: &'static str,
        value: i64,
        max: u8,
    },

    #[error("{kind} en double : {value}")]
    Duplicate { kind: &'static str, value: i64 },

    #[error("{expected} {kind} attendus, {actual} reçus")]
    WrongCount {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
}
