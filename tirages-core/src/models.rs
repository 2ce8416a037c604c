use std::fmt;

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::error::PickError;

/// Un tirage historique tel que reçu de la source.
///
/// Les listes sont des `Vec` et non des tableaux fixes : une source
/// incohérente (doublons, longueur fausse, valeur hors domaine) est conservée
/// telle quelle et les calculs en aval restent tolérants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Draw {
    #[serde(default, deserialize_with = "de_draw_id")]
    pub draw_id: Option<String>,
    pub date: NaiveDate,
    #[serde(deserialize_with = "de_values")]
    pub numbers: Vec<i64>,
    #[serde(deserialize_with = "de_values")]
    pub stars: Vec<i64>,
    #[serde(default, deserialize_with = "de_prize")]
    pub prize: Option<Prize>,
}

impl Draw {
    pub fn new(date: NaiveDate, numbers: &[i64], stars: &[i64]) -> Self {
        Self {
            draw_id: None,
            date,
            numbers: numbers.to_vec(),
            stars: stars.to_vec(),
            prize: None,
        }
    }
}

/// Gain annoncé pour un tirage : montant ou texte libre.
#[derive(Debug, Clone, PartialEq)]
pub enum Prize {
    Amount(f64),
    Text(String),
}

impl fmt::Display for Prize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prize::Amount(v) => write!(f, "{:.2} €", v),
            Prize::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Text(String),
}

// L'API publique renvoie les numéros sous forme de chaînes ("07").
// Les valeurs hors domaine (0, 300, -1) sont conservées telles quelles.
fn de_values<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Scalar>::deserialize(deserializer)?
        .into_iter()
        .map(|s| match s {
            Scalar::Int(v) => Ok(v),
            Scalar::Text(t) => t
                .trim()
                .parse::<i64>()
                .map_err(|_| D::Error::custom(format!("valeur non numérique '{}'", t))),
        })
        .collect()
}

fn de_draw_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| match s {
        Scalar::Int(v) => v.to_string(),
        Scalar::Text(t) => t,
    }))
}

// Champ facultatif : tout ce qui n'est ni nombre ni texte vaut "non disponible".
fn de_prize<'de, D>(deserializer: D) -> Result<Option<Prize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().map(Prize::Amount),
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(Prize::Text(s)),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Numbers,
    Stars,
}

impl Domain {
    pub fn size(&self) -> u8 {
        match self {
            Domain::Numbers => 50,
            Domain::Stars => 12,
        }
    }

    pub fn pick_count(&self) -> usize {
        match self {
            Domain::Numbers => 5,
            Domain::Stars => 2,
        }
    }

    pub fn values_from<'a>(&self, draw: &'a Draw) -> &'a [i64] {
        match self {
            Domain::Numbers => &draw.numbers,
            Domain::Stars => &draw.stars,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        (1..=i64::from(self.size())).contains(&value)
    }

    /// Libellé singulier, utilisé dans les messages d'erreur.
    pub fn kind(&self) -> &'static str {
        match self {
            Domain::Numbers => "Numéro",
            Domain::Stars => "Étoile",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Numbers => write!(f, "Numéros (1-50)"),
            Domain::Stars => write!(f, "Étoiles (1-12)"),
        }
    }
}

/// Résultat d'analyse de fréquence pour une valeur.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub value: i64,
    pub count: u32,
    pub percentage: f64,
}

/// Grille candidate : 5 numéros et 2 étoiles distincts, triés.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pick {
    numbers: [u8; 5],
    stars: [u8; 2],
}

impl Pick {
    /// Construit une grille validée ; l'ordre des valeurs en entrée est libre.
    pub fn new(numbers: &[u8], stars: &[u8]) -> Result<Self, PickError> {
        validate_values(Domain::Numbers, &widen(numbers))?;
        validate_values(Domain::Stars, &widen(stars))?;

        let mut n = [0u8; 5];
        n.copy_from_slice(numbers);
        n.sort();
        let mut s = [0u8; 2];
        s.copy_from_slice(stars);
        s.sort();

        Ok(Self { numbers: n, stars: s })
    }

    /// Réservé au générateur, qui garantit déjà les invariants.
    pub(crate) fn from_sorted(numbers: [u8; 5], stars: [u8; 2]) -> Self {
        Self { numbers, stars }
    }

    pub fn numbers(&self) -> &[u8; 5] {
        &self.numbers
    }

    pub fn stars(&self) -> &[u8; 2] {
        &self.stars
    }
}

pub fn validate_values(domain: Domain, values: &[i64]) -> Result<(), PickError> {
    if values.len() != domain.pick_count() {
        return Err(PickError::WrongCount {
            kind: domain.kind(),
            expected: domain.pick_count(),
            actual: values.len(),
        });
    }
    for &v in values {
        if !domain.contains(v) {
            return Err(PickError::OutOfRange {
                kind: domain.kind(),
                value: v,
                max: domain.size(),
            });
        }
    }
    for i in 0..values.len() {
        for j in (i + 1)..values.len() {
            if values[i] == values[j] {
                return Err(PickError::Duplicate {
                    kind: domain.kind(),
                    value: values[i],
                });
            }
        }
    }
    Ok(())
}

fn widen(values: &[u8]) -> Vec<i64> {
    values.iter().map(|&v| i64::from(v)).collect()
}

pub fn validate_draw(draw: &Draw) -> Result<(), PickError> {
    validate_values(Domain::Numbers, &draw.numbers)?;
    validate_values(Domain::Stars, &draw.stars)
}
