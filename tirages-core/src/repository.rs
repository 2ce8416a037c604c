use chrono::NaiveDate;

use crate::error::IngestError;
use crate::models::{validate_draw, Draw};

/// Collection en mémoire des tirages d'une session.
///
/// L'ordre de la source est conservé tel quel ; rien ici ne suppose qu'une
/// extrémité du tableau soit le tirage le plus récent.
#[derive(Debug, Default, Clone)]
pub struct DrawRepository {
    draws: Vec<Draw>,
}

impl DrawRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remplace intégralement la collection.
    pub fn load(&mut self, draws: Vec<Draw>) {
        log::debug!("{} tirages chargés", draws.len());
        self.draws = draws;
    }

    /// Parse une réponse JSON et remplace la collection.
    ///
    /// En cas d'erreur la collection précédente est conservée.
    pub fn load_json(&mut self, text: &str) -> Result<usize, IngestError> {
        let value: serde_json::Value = serde_json::from_str(text).map_err(IngestError::Json)?;
        let items = match value {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(IngestError::NotASequence {
                    found: json_kind(&other),
                })
            }
        };

        let mut draws = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let draw: Draw = serde_json::from_value(item)
                .map_err(|source| IngestError::MalformedRecord { index, source })?;
            if let Err(e) = validate_draw(&draw) {
                log::warn!("Tirage du {} incohérent ({}), conservé tel quel", draw.date, e);
            }
            draws.push(draw);
        }

        let n = draws.len();
        self.load(draws);
        Ok(n)
    }

    pub fn all(&self) -> &[Draw] {
        &self.draws
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Tirage de date maximale. À date égale, le premier rencontré l'emporte.
    pub fn latest(&self) -> Option<&Draw> {
        latest_of(self.draws.iter())
    }

    /// Tirage le plus récent dont la date est `<= day`.
    pub fn most_recent_up_to(&self, day: NaiveDate) -> Option<&Draw> {
        latest_of(self.draws.iter().filter(|d| d.date <= day))
    }

    /// Exclut les tirages annoncés mais pas encore effectués.
    pub fn most_recent_up_to_today(&self) -> Option<&Draw> {
        self.most_recent_up_to(chrono::Local::now().date_naive())
    }

    /// Les `n` tirages les plus récents, du plus récent au plus ancien.
    pub fn recent(&self, n: usize) -> Vec<&Draw> {
        let mut sorted: Vec<&Draw> = self.draws.iter().collect();
        // tri stable : à date égale, l'ordre de la source est conservé
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted.truncate(n);
        sorted
    }
}

fn latest_of<'a>(draws: impl Iterator<Item = &'a Draw>) -> Option<&'a Draw> {
    draws.fold(None, |best: Option<&Draw>, d| match best {
        Some(b) if b.date >= d.date => Some(b),
        _ => Some(d),
    })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "booléen",
        serde_json::Value::Number(_) => "nombre",
        serde_json::Value::String(_) => "chaîne",
        serde_json::Value::Array(_) => "liste",
        serde_json::Value::Object(_) => "objet",
    }
}
