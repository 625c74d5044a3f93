use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use bicolore_core::models::{Combination, Game, Zone, DISCLAIMER};
use bicolore_core::render::{
    AnalysisView, FixedReport, HeatLevel, MissingEntry, NumberStatus, RankedNumber, RatioSlice,
    Severity,
};

use crate::Metric;

pub fn display_analysis(view: &AnalysisView, metric: Metric) {
    println!(
        "\n📊 {} — statistiques sur les {} derniers tirages\n",
        view.game_name, view.periods
    );

    let primary = view.game.zone_label(Zone::Primary);
    let secondary = view.game.zone_label(Zone::Secondary);

    if matches!(metric, Metric::All | Metric::HotCold) {
        println!("── Numéros chauds TOP10 ({}) ──", primary);
        display_ranked_table(&view.hot, true);

        println!("\n── Numéros froids TOP10 ({}) ──", primary);
        display_ranked_table(&view.cold, true);

        println!("\n── Numéros chauds TOP5 ({}) ──", secondary);
        display_ranked_table(&view.secondary_hot, false);
    }

    if matches!(metric, Metric::All | Metric::Missing) {
        println!("\n── Retards TOP10 ({}) ──", primary);
        display_missing_table(&view.missing_primary);

        println!("\n── Retards TOP5 ({}) ──", secondary);
        display_missing_table(&view.missing_secondary);
    }

    if matches!(metric, Metric::All | Metric::Heatmap) {
        println!("\n── Carte de chaleur ({}) ──", primary);
        display_heatmap(view);
    }

    if matches!(metric, Metric::All | Metric::OddEven) {
        println!("\n── Répartition impairs:pairs ──");
        display_ratio_table(&view.odd_even);
    }

    if matches!(metric, Metric::All | Metric::BigSmall) {
        println!("\n── Répartition grands:petits ──");
        display_ratio_table(&view.big_small);
    }

    if matches!(metric, Metric::All | Metric::Overview) {
        if let Some(overview) = &view.overview {
            println!("\n── Vue d'ensemble ──");
            println!(
                "  Suites de numéros   : {} ({}% des périodes)",
                overview.consecutive_runs, overview.consecutive_rate
            );
            if let Some(run) = &overview.most_common_run {
                println!("  Suite la plus vue   : {}", run);
            }
            println!(
                "  Somme               : min {}  max {}  moyenne {}  médiane {}",
                overview.sum.min, overview.sum.max, overview.sum.average, overview.sum.median
            );
            println!(
                "  Étendue             : min {}  max {}  moyenne {}",
                overview.span.min, overview.span.max, overview.span.average
            );
            let bands = overview
                .band_means
                .iter()
                .map(|m| format!("{:.2}", m))
                .collect::<Vec<_>>()
                .join(" / ");
            println!("  Moyenne par tranche : {}", bands);
        }
    }
}

fn display_ranked_table(entries: &[RankedNumber], with_percentage: bool) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    if with_percentage {
        table.set_header(vec!["Rang", "Numéro", "Sorties", "Fréquence"]);
    } else {
        table.set_header(vec!["Rang", "Numéro", "Sorties"]);
    }

    for (i, entry) in entries.iter().enumerate() {
        let mut row = vec![
            format!("{}", i + 1),
            format!("{:02}", entry.number),
            entry.count.to_string(),
        ];
        if with_percentage {
            row.push(format!("{:.1}%", entry.percentage));
        }
        table.add_row(row);
    }
    println!("{table}");
}

fn display_missing_table(entries: &[MissingEntry]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéro", "Retard", "Sévérité"]);

    for entry in entries {
        let (label, color) = match entry.severity {
            Severity::High => ("élevée", Color::Red),
            Severity::Medium => ("moyenne", Color::Yellow),
            Severity::Low => ("faible", Color::White),
        };
        table.add_row(vec![
            Cell::new(format!("{:02}", entry.number)),
            Cell::new(format!("{} périodes", entry.missing)),
            Cell::new(label).fg(color),
        ]);
    }
    println!("{table}");
}

fn display_heatmap(view: &AnalysisView) {
    let levels = [
        (HeatLevel::Hot3, "🔥🔥🔥 hot-3 "),
        (HeatLevel::Hot2, "🔥🔥  hot-2 "),
        (HeatLevel::Hot1, "🔥   hot-1 "),
        (HeatLevel::Heat1, "🌡️   heat-1"),
        (HeatLevel::Heat0, "🌡️   heat-0"),
        (HeatLevel::Cold, "❄️   cold  "),
    ];

    for (level, label) in levels {
        let cells: Vec<String> = view
            .heatmap
            .iter()
            .filter(|c| c.level == level)
            .map(|c| format!("{:02} ({})", c.number, c.count))
            .collect();
        if !cells.is_empty() {
            println!("  {} : {}", label, cells.join("  "));
        }
    }
}

fn display_ratio_table(slices: &[RatioSlice]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Ratio", "Sorties", "Part"]);

    for slice in slices {
        table.add_row(vec![
            slice.label.clone(),
            slice.count.to_string(),
            format!("{:.1}%", slice.percentage),
        ]);
    }
    println!("{table}");
}

pub fn display_fixed_report(report: &FixedReport, game: Game) {
    println!("\n🔢 {} — analyse de numéros fixés\n", game.name());

    let primary_str = report
        .primary
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" ");
    let secondary_str = report
        .secondary
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" ");

    if !primary_str.is_empty() {
        println!("  {} : {}", game.zone_label(Zone::Primary), primary_str);
    }
    if !secondary_str.is_empty() {
        println!("  {} : {}", game.zone_label(Zone::Secondary), secondary_str);
    }

    println!("\n── Historique des numéros fixés ──");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéro", "Zone", "Sorties", "Fréquence", "Retard", "Statut"]);

    for stat in &report.stats {
        let color = match stat.status {
            NumberStatus::Hot => Color::Green,
            NumberStatus::Cold => Color::Red,
            NumberStatus::Normal => Color::White,
        };
        table.add_row(vec![
            Cell::new(format!("{:02}", stat.number)),
            Cell::new(&stat.zone),
            Cell::new(stat.count.to_string()),
            Cell::new(format!("{:.1}%", stat.frequency)),
            Cell::new(format!("{} périodes", stat.missing)),
            Cell::new(stat.status.to_string()).fg(color),
        ]);
    }
    println!("{table}");

    let eval = &report.evaluation;
    println!("\n── Équilibre de la sélection ──");
    println!("  Impairs:pairs : {}", eval.odd_even_ratio);
    println!("  Grands:petits : {}", eval.big_small_ratio);
    println!(
        "  Évaluation    : {} ({}/{})",
        eval.rating, eval.total_score, eval.max_score
    );
    println!(
        "  Reste à choisir : {} {} et {} {}",
        eval.need_primary,
        game.zone_label(Zone::Primary).to_lowercase(),
        eval.need_secondary,
        game.zone_label(Zone::Secondary).to_lowercase()
    );
}

pub fn display_combinations(combinations: &[Combination], game: Game) {
    println!("\n🎲 Combinaisons générées\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "#",
            game.zone_label(Zone::Primary),
            game.zone_label(Zone::Secondary),
        ]);

    for (i, combo) in combinations.iter().enumerate() {
        let primary_str = combo
            .primary
            .iter()
            .map(|n| format!("{:02}", n))
            .collect::<Vec<_>>()
            .join(" - ");
        let secondary_str = combo
            .secondary
            .iter()
            .map(|n| format!("{:02}", n))
            .collect::<Vec<_>>()
            .join(" - ");

        table.add_row(vec![format!("{}", i + 1), primary_str, secondary_str]);
    }
    println!("{table}");

    println!("\n{}", DISCLAIMER);
}
