mod config;
mod display;
mod source;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use tirages_core::error::PickError;
use tirages_core::frequency::summarize;
use tirages_core::models::{Domain, Pick};
use tirages_core::picks::{historical_matches, PickGenerator};
use tirages_core::repository::DrawRepository;

use crate::config::AppConfig;
use crate::display::{
    display_chart, display_draws, display_full_ranking, display_latest, display_pick,
    display_summary,
};
use crate::source::{load_repository, DrawSource};

#[derive(Parser)]
#[command(name = "tirages", about = "Statistiques et grilles porte-bonheur EuroMillions")]
struct Cli {
    /// Fichier JSON local à utiliser à la place de l'API
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// URL de l'API des tirages
    #[arg(long, global = true)]
    url: Option<String>,

    /// Délai maximal de la requête HTTP (secondes)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Fichier de configuration JSON
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lister les derniers tirages
    Results {
        /// Nombre de tirages à afficher
        #[arg(short, long)]
        last: Option<usize>,
    },

    /// Fréquences des numéros et des étoiles
    Stats {
        /// Taille des classements (plus / moins fréquents)
        #[arg(short, long)]
        top: Option<usize>,

        /// Afficher le classement complet
        #[arg(long)]
        all: bool,
    },

    /// Graphique des fréquences
    Chart,

    /// Grille porte-bonheur dérivée d'une date de naissance
    Lucky {
        /// Date (AAAA-MM-JJ ou JJ/MM/AAAA)
        birthdate: String,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Ne pas comparer aux tirages passés (aucun téléchargement)
        #[arg(long)]
        no_check: bool,
    },

    /// Grilles aléatoires
    Random {
        /// Nombre de grilles
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Ne pas comparer aux tirages passés (aucun téléchargement)
        #[arg(long)]
        no_check: bool,
    },

    /// Vérifier si une grille est déjà sortie
    Check {
        /// 5 numéros + 2 étoiles (7 nombres)
        numbers: Vec<u8>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(cli.url, cli.timeout);
    let source = DrawSource::from_config(&config, cli.file);

    match cli.command {
        Command::Results { last } => cmd_results(&source, last.unwrap_or(config.results_shown)),
        Command::Stats { top, all } => cmd_stats(&source, top.unwrap_or(config.top), all),
        Command::Chart => cmd_chart(&source),
        Command::Lucky {
            birthdate,
            seed,
            no_check,
        } => cmd_lucky(&source, &birthdate, seed, no_check),
        Command::Random {
            count,
            seed,
            no_check,
        } => cmd_random(&source, count, seed, no_check),
        Command::Check { numbers } => cmd_check(&source, &numbers),
    }
}

fn generator(seed: Option<u64>) -> PickGenerator {
    match seed {
        Some(s) => PickGenerator::seeded(s),
        None => PickGenerator::from_entropy(),
    }
}

fn cmd_results(source: &DrawSource, last: usize) -> Result<()> {
    let repo = load_repository(source)?;
    display_latest(repo.most_recent_up_to_today());
    println!();
    display_draws(&repo.recent(last));
    Ok(())
}

fn cmd_stats(source: &DrawSource, top: usize, all: bool) -> Result<()> {
    let repo = load_repository(source)?;
    for domain in [Domain::Numbers, Domain::Stars] {
        let summary = summarize(repo.all(), domain);
        if all {
            display_full_ranking(&summary);
        } else {
            display_summary(&summary, top);
        }
    }
    Ok(())
}

fn cmd_chart(source: &DrawSource) -> Result<()> {
    let repo = load_repository(source)?;
    display_chart(&summarize(repo.all(), Domain::Numbers));
    display_chart(&summarize(repo.all(), Domain::Stars));
    Ok(())
}

fn history(source: &DrawSource, no_check: bool) -> Result<Option<DrawRepository>> {
    if no_check {
        return Ok(None);
    }
    load_repository(source).map(Some)
}

fn cmd_lucky(
    source: &DrawSource,
    birthdate: &str,
    seed: Option<u64>,
    no_check: bool,
) -> Result<()> {
    let pick = match generator(seed).from_seed_str(birthdate) {
        Ok(pick) => pick,
        Err(PickError::InvalidSeed(raw)) => {
            bail!("Entrez une date valide (AAAA-MM-JJ ou JJ/MM/AAAA) : '{raw}'")
        }
        Err(e) => return Err(e.into()),
    };

    let repo = history(source, no_check)?;
    let matches = repo.as_ref().map(|r| historical_matches(&pick, r.all()));
    display_pick("Grille porte-bonheur", &pick, matches.as_deref());
    Ok(())
}

fn cmd_random(source: &DrawSource, count: usize, seed: Option<u64>, no_check: bool) -> Result<()> {
    let repo = history(source, no_check)?;
    let mut picks = generator(seed);
    for i in 0..count {
        let pick = picks.random();
        let matches = repo.as_ref().map(|r| historical_matches(&pick, r.all()));
        display_pick(&format!("Grille {}", i + 1), &pick, matches.as_deref());
    }
    Ok(())
}

fn cmd_check(source: &DrawSource, numbers: &[u8]) -> Result<()> {
    if numbers.len() != 7 {
        bail!("Entrez exactement 7 nombres : 5 numéros puis 2 étoiles");
    }
    let pick = Pick::new(&numbers[..5], &numbers[5..])?;
    let repo = load_repository(source)?;
    let matches = historical_matches(&pick, repo.all());
    display_pick("Grille", &pick, Some(matches.as_slice()));
    Ok(())
}
