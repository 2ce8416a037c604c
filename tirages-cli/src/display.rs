use std::fmt::Display;

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use textplots::Plot;

use tirages_core::frequency::FrequencySummary;
use tirages_core::models::{Draw, Pick, RankedEntry};

pub const NO_DATA: &str = "Aucune donnée disponible.";

pub fn format_values<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| format!("{:2}", v))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn format_percentage(p: f64) -> String {
    format!("{:.2}%", p)
}

fn sorted(values: &[i64]) -> Vec<i64> {
    let mut v = values.to_vec();
    v.sort();
    v
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn display_draws(draws: &[&Draw]) {
    if draws.is_empty() {
        println!("{NO_DATA}");
        return;
    }

    let mut table = new_table(vec!["Date", "Tirage", "Numéros", "Étoiles", "Gain"]);
    for draw in draws {
        let prize = draw
            .prize
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "non disponible".to_string());
        table.add_row(vec![
            draw.date.format("%d/%m/%Y").to_string(),
            draw.draw_id.clone().unwrap_or_else(|| "—".to_string()),
            format_values(&sorted(&draw.numbers)),
            format_values(&sorted(&draw.stars)),
            prize,
        ]);
    }
    println!("{table}");
}

pub fn display_latest(latest: Option<&Draw>) {
    match latest {
        Some(draw) => println!(
            "Dernier tirage ({}) : {} | ★ {}",
            draw.date.format("%d/%m/%Y"),
            format_values(&sorted(&draw.numbers)),
            format_values(&sorted(&draw.stars)),
        ),
        None => println!("Dernier tirage : {NO_DATA}"),
    }
}

fn ranking_table(entries: &[RankedEntry], color: Color) -> Table {
    let mut table = new_table(vec!["Valeur", "Sorties", "Fréquence"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(format!("{:2}", entry.value)).fg(color),
            Cell::new(entry.count.to_string()),
            Cell::new(format_percentage(entry.percentage)),
        ]);
    }
    table
}

pub fn display_summary(summary: &FrequencySummary, top: usize) {
    println!("\n── {} sur {} tirages ──", summary.domain, summary.total_draws);
    if summary.is_empty() {
        println!("{NO_DATA}");
        return;
    }

    println!("Les plus fréquents :");
    println!("{}", ranking_table(summary.top(top), Color::Green));
    println!("Les moins fréquents :");
    println!("{}", ranking_table(summary.bottom(top), Color::Red));
}

pub fn display_full_ranking(summary: &FrequencySummary) {
    println!("\n── {} : classement complet ──", summary.domain);
    if summary.is_empty() {
        println!("{NO_DATA}");
        return;
    }
    println!("{}", ranking_table(&summary.entries, Color::White));
}

pub fn chart_points(entries: &[RankedEntry]) -> Vec<(f32, f32)> {
    let mut points: Vec<(f32, f32)> = entries
        .iter()
        .map(|e| (e.value as f32, e.percentage as f32))
        .collect();
    points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    points
}

pub fn display_chart(summary: &FrequencySummary) {
    println!("\n== Fréquence (%) : {} ==\n", summary.domain);
    let x_max = summary.domain.size() as f32 + 1.0;
    // les valeurs hors domaine restent dans les tableaux, pas sur le graphique
    let mut points = chart_points(&summary.entries);
    points.retain(|p| p.0 >= 1.0 && p.0 < x_max);
    if points.is_empty() {
        println!("  {NO_DATA}");
        return;
    }

    let y_max = points.iter().map(|p| p.1).fold(0.0f32, f32::max) + 1.0;
    let shape = textplots::Shape::Bars(&points);
    let mut chart = textplots::Chart::new_with_y_range(120, 40, 0.0, x_max, 0.0, y_max);
    println!("{}", chart.lineplot(&shape));
}

pub fn display_pick(label: &str, pick: &Pick, matches: Option<&[&Draw]>) {
    println!(
        "{label} : {} | ★ {}",
        format_values(&pick.numbers()[..]),
        format_values(&pick.stars()[..]),
    );
    match matches {
        None => {}
        Some([]) => println!("  Cette combinaison n'est jamais sortie."),
        Some(found) => {
            for draw in found {
                println!("  Déjà sortie le {} !", draw.date.format("%d/%m/%Y"));
            }
        }
    }
}
