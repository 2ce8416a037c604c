use std::collections::BTreeMap;

use crate::models::{Domain, Draw, RankedEntry};

/// Occurrences par valeur pour un domaine, reconstruite à chaque analyse.
///
/// Les valeurs jamais sorties sont absentes (pas de compteur à zéro).
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    pub domain: Domain,
    pub total_draws: usize,
    pub counts: BTreeMap<i64, u32>,
}

impl FrequencyTable {
    pub fn build(draws: &[Draw], domain: Domain) -> Self {
        let mut counts: BTreeMap<i64, u32> = BTreeMap::new();
        for draw in draws {
            // doublons et valeurs hors domaine sont comptés tels quels
            for &v in domain.values_from(draw) {
                *counts.entry(v).or_insert(0) += 1;
            }
        }
        Self {
            domain,
            total_draws: draws.len(),
            counts,
        }
    }

    /// Entrées triées par nombre d'occurrences décroissant, puis par valeur
    /// croissante en cas d'égalité.
    pub fn ranked(&self) -> Vec<RankedEntry> {
        if self.total_draws == 0 {
            return Vec::new();
        }
        let total = self.total_draws as f64;
        let mut entries: Vec<RankedEntry> = self
            .counts
            .iter()
            .map(|(&value, &count)| RankedEntry {
                value,
                count,
                percentage: round2(count as f64 / total * 100.0),
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.value.cmp(&b.value)));
        entries
    }
}

pub fn analyze(draws: &[Draw], domain: Domain) -> Vec<RankedEntry> {
    FrequencyTable::build(draws, domain).ranked()
}

pub fn top_n(entries: &[RankedEntry], n: usize) -> &[RankedEntry] {
    &entries[..n.min(entries.len())]
}

/// Les `n` dernières entrées, dans l'ordre du classement.
pub fn bottom_n(entries: &[RankedEntry], n: usize) -> &[RankedEntry] {
    &entries[entries.len().saturating_sub(n)..]
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug, Clone)]
pub struct FrequencySummary {
    pub domain: Domain,
    pub total_draws: usize,
    pub entries: Vec<RankedEntry>,
}

impl FrequencySummary {
    pub fn top(&self, n: usize) -> &[RankedEntry] {
        top_n(&self.entries, n)
    }

    pub fn bottom(&self, n: usize) -> &[RankedEntry] {
        bottom_n(&self.entries, n)
    }

    pub fn percentage_sum(&self) -> f64 {
        self.entries.iter().map(|e| e.percentage).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn summarize(draws: &[Draw], domain: Domain) -> FrequencySummary {
    FrequencySummary {
        domain,
        total_draws: draws.len(),
        entries: analyze(draws, domain),
    }
}
