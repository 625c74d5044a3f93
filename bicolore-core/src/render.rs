use anyhow::{bail, Result};
use serde::Serialize;

use crate::models::{validate_selection, Game, Zone};
use crate::sampler::FixedSelection;
use crate::stats::{SpanStats, StatSnapshot, SumStats};

#[derive(Debug, Clone, Serialize)]
pub struct RankedNumber {
    pub number: u8,
    pub count: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// Sévérité d'un retard : > 15 périodes élevé, > 10 moyen, sinon faible.
pub fn missing_severity(missing: u32) -> Severity {
    if missing > 15 {
        Severity::High
    } else if missing > 10 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MissingEntry {
    pub number: u8,
    pub missing: u32,
    pub severity: Severity,
}

/// Niveaux de chaleur par percentiles de la fenêtre : P90, P75, P50, P25,
/// présence simple, jamais sorti.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeatLevel {
    #[serde(rename = "hot-3")]
    Hot3,
    #[serde(rename = "hot-2")]
    Hot2,
    #[serde(rename = "hot-1")]
    Hot1,
    #[serde(rename = "heat-1")]
    Heat1,
    #[serde(rename = "heat-0")]
    Heat0,
    #[serde(rename = "cold")]
    Cold,
}

impl std::fmt::Display for HeatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HeatLevel::Hot3 => "hot-3",
            HeatLevel::Hot2 => "hot-2",
            HeatLevel::Hot1 => "hot-1",
            HeatLevel::Heat1 => "heat-1",
            HeatLevel::Heat0 => "heat-0",
            HeatLevel::Cold => "cold",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatCell {
    pub number: u8,
    pub count: u32,
    pub level: HeatLevel,
}

/// Une part de camembert prête à tracer.
#[derive(Debug, Clone, Serialize)]
pub struct RatioSlice {
    pub label: String,
    pub count: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub consecutive_runs: u32,
    pub consecutive_rate: f64,
    pub most_common_run: Option<String>,
    pub sum: SumStats,
    pub span: SpanStats,
    pub band_means: Vec<f64>,
}

/// Structure d'affichage produite par le moteur de rendu, consommée par la
/// couche de présentation (tables CLI, JSON pour une couche graphique).
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub game: Game,
    pub game_name: String,
    pub periods: u32,
    /// true quand aucune donnée n'était disponible : toutes les listes sont
    /// vides et l'appelant affiche un écran vide plutôt qu'une erreur.
    pub placeholder: bool,
    pub generated_at: String,
    pub hot: Vec<RankedNumber>,
    pub cold: Vec<RankedNumber>,
    pub secondary_hot: Vec<RankedNumber>,
    pub missing_primary: Vec<MissingEntry>,
    pub missing_secondary: Vec<MissingEntry>,
    pub heatmap: Vec<HeatCell>,
    pub odd_even: Vec<RatioSlice>,
    pub big_small: Vec<RatioSlice>,
    pub overview: Option<Overview>,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Transforme un agrégat en structure d'affichage. Transformation pure :
/// un agrégat vide produit un écran vide (`placeholder`), jamais une erreur.
pub fn render_analysis(snapshot: &StatSnapshot) -> AnalysisView {
    let game = snapshot.game;
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    if snapshot.is_empty() {
        return AnalysisView {
            game,
            game_name: game.name().to_string(),
            periods: 0,
            placeholder: true,
            generated_at,
            hot: Vec::new(),
            cold: Vec::new(),
            secondary_hot: Vec::new(),
            missing_primary: Vec::new(),
            missing_secondary: Vec::new(),
            heatmap: Vec::new(),
            odd_even: Vec::new(),
            big_small: Vec::new(),
            overview: None,
        };
    }

    let periods = snapshot.periods;

    let overview = match (&snapshot.sum, &snapshot.span) {
        (Some(sum), Some(span)) => Some(Overview {
            consecutive_runs: snapshot.consecutive.runs,
            consecutive_rate: snapshot.consecutive.rate,
            most_common_run: snapshot
                .consecutive
                .top_patterns
                .first()
                .map(|(pattern, _)| pattern.clone()),
            sum: sum.clone(),
            span: span.clone(),
            band_means: snapshot.band_means.clone(),
        }),
        _ => None,
    };

    AnalysisView {
        game,
        game_name: game.name().to_string(),
        periods,
        placeholder: false,
        generated_at,
        hot: ranked(snapshot.counts(Zone::Primary), periods, 10, Order::Desc),
        cold: ranked(snapshot.counts(Zone::Primary), periods, 10, Order::Asc),
        secondary_hot: ranked(snapshot.counts(Zone::Secondary), periods, 5, Order::Desc),
        missing_primary: missing_entries(snapshot.missing(Zone::Primary), 10),
        missing_secondary: missing_entries(snapshot.missing(Zone::Secondary), 5),
        heatmap: heatmap(snapshot.counts(Zone::Primary)),
        odd_even: slices(&snapshot.odd_even, periods),
        big_small: slices(&snapshot.big_small, periods),
        overview,
    }
}

/// Écran vide pour un jeu sans données (`MissingDataset`).
pub fn placeholder(game: Game) -> AnalysisView {
    render_analysis(&crate::stats::compute_snapshot(game, &[], 0))
}

#[derive(Clone, Copy, PartialEq)]
enum Order {
    Desc,
    Asc,
}

fn ranked(counts: &[u32], periods: u32, top: usize, order: Order) -> Vec<RankedNumber> {
    let mut entries: Vec<RankedNumber> = counts
        .iter()
        .enumerate()
        // Le classement des chauds ne retient que les numéros réellement
        // sortis ; celui des froids garde les jamais sortis
        .filter(|&(_, &count)| order == Order::Asc || count > 0)
        .map(|(i, &count)| RankedNumber {
            number: (i + 1) as u8,
            count,
            percentage: round2(count as f64 / periods as f64 * 100.0),
        })
        .collect();
    entries.sort_by(|a, b| {
        let by_count = match order {
            Order::Desc => b.count.cmp(&a.count),
            Order::Asc => a.count.cmp(&b.count),
        };
        by_count.then_with(|| a.number.cmp(&b.number))
    });
    entries.truncate(top);
    entries
}

fn missing_entries(missing: &[u32], top: usize) -> Vec<MissingEntry> {
    let mut entries: Vec<MissingEntry> = missing
        .iter()
        .enumerate()
        .map(|(i, &m)| MissingEntry {
            number: (i + 1) as u8,
            missing: m,
            severity: missing_severity(m),
        })
        .collect();
    entries.sort_by(|a, b| b.missing.cmp(&a.missing).then_with(|| a.number.cmp(&b.number)));
    entries.truncate(top);
    entries
}

fn heatmap(counts: &[u32]) -> Vec<HeatCell> {
    let mut sorted = counts.to_vec();
    sorted.sort_unstable();

    let p25 = percentile(&sorted, 0.25);
    let p50 = percentile(&sorted, 0.50);
    let p75 = percentile(&sorted, 0.75);
    let p90 = percentile(&sorted, 0.90);

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            // Un numéro jamais sorti est froid quel que soit le P25
            let level = if count == 0 {
                HeatLevel::Cold
            } else if count >= p90 {
                HeatLevel::Hot3
            } else if count >= p75 {
                HeatLevel::Hot2
            } else if count >= p50 {
                HeatLevel::Hot1
            } else if count >= p25 {
                HeatLevel::Heat1
            } else {
                HeatLevel::Heat0
            };
            HeatCell {
                number: (i + 1) as u8,
                count,
                level,
            }
        })
        .collect()
}

fn percentile(sorted: &[u32], p: f64) -> u32 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[idx]
}

fn slices(distribution: &[crate::stats::RatioCount], periods: u32) -> Vec<RatioSlice> {
    distribution
        .iter()
        .map(|r| RatioSlice {
            label: r.ratio.clone(),
            count: r.count,
            percentage: round2(r.count as f64 / periods as f64 * 100.0),
        })
        .collect()
}

// ── Analyse de numéros fixés ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberStatus {
    Hot,
    Normal,
    Cold,
}

impl std::fmt::Display for NumberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberStatus::Hot => write!(f, "CHAUD"),
            NumberStatus::Normal => write!(f, "NORMAL"),
            NumberStatus::Cold => write!(f, "FROID"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FixedNumberStat {
    pub number: u8,
    pub zone: String,
    pub count: u32,
    pub frequency: f64,
    pub missing: u32,
    pub status: NumberStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub odd_even_ratio: String,
    pub odd_even_score: u8,
    pub big_small_ratio: String,
    pub big_small_score: u8,
    pub total_score: u8,
    pub max_score: u8,
    pub rating: String,
    pub need_primary: usize,
    pub need_secondary: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixedReport {
    pub game: Game,
    pub generated_at: String,
    pub primary: Vec<u8>,
    pub secondary: Vec<u8>,
    pub stats: Vec<FixedNumberStat>,
    pub evaluation: Evaluation,
}

/// Analyse l'historique et l'équilibre de numéros fixés par l'utilisateur.
/// Sélection vide ou invalide → erreur utilisateur, rien d'autre ne change.
pub fn analyze_fixed(snapshot: &StatSnapshot, fixed: &FixedSelection) -> Result<FixedReport> {
    let game = snapshot.game;

    if fixed.is_empty() {
        bail!("Veuillez saisir au moins un numéro");
    }
    validate_selection(game, Zone::Primary, &fixed.primary)?;
    validate_selection(game, Zone::Secondary, &fixed.secondary)?;

    let periods = snapshot.periods as f64;
    let mut stats = Vec::with_capacity(fixed.primary.len() + fixed.secondary.len());

    for &n in &fixed.primary {
        let idx = (n - 1) as usize;
        let count = snapshot.primary_counts[idx];
        // Seuils d'origine : chaud > 15 % des périodes, normal > 8 %
        let status = if count as f64 > periods * 0.15 {
            NumberStatus::Hot
        } else if count as f64 > periods * 0.08 {
            NumberStatus::Normal
        } else {
            NumberStatus::Cold
        };
        stats.push(FixedNumberStat {
            number: n,
            zone: game.zone_label(Zone::Primary).to_string(),
            count,
            frequency: frequency(count, periods),
            missing: snapshot.primary_missing[idx],
            status,
        });
    }

    for &n in &fixed.secondary {
        let idx = (n - 1) as usize;
        let count = snapshot.secondary_counts[idx];
        let status = if count as f64 > periods * 0.10 {
            NumberStatus::Hot
        } else {
            NumberStatus::Normal
        };
        stats.push(FixedNumberStat {
            number: n,
            zone: game.zone_label(Zone::Secondary).to_string(),
            count,
            frequency: frequency(count, periods),
            missing: snapshot.secondary_missing[idx],
            status,
        });
    }

    let (odd, even) = crate::stats::parity_ratio(&fixed.primary);
    let (big, small) = crate::stats::size_ratio(&fixed.primary, game.big_boundary());

    let odd_even_score = balance_score(odd, even);
    let big_small_score = balance_score(big, small);
    let total_score = odd_even_score + big_small_score;

    let evaluation = Evaluation {
        odd_even_ratio: format!("{}:{}", odd, even),
        odd_even_score,
        big_small_ratio: format!("{}:{}", big, small),
        big_small_score,
        total_score,
        max_score: 4,
        rating: "⭐".repeat(total_score as usize + 1),
        need_primary: game.pick_count(Zone::Primary) - fixed.primary.len(),
        need_secondary: game.pick_count(Zone::Secondary) - fixed.secondary.len(),
    };

    Ok(FixedReport {
        game,
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        primary: fixed.primary.clone(),
        secondary: fixed.secondary.clone(),
        stats,
        evaluation,
    })
}

fn frequency(count: u32, periods: f64) -> f64 {
    if periods > 0.0 {
        round2(count as f64 / periods * 100.0)
    } else {
        0.0
    }
}

/// 2 points quand la répartition est équilibrée (écart <= 1), sinon 1.
fn balance_score(a: usize, b: usize) -> u8 {
    if a.abs_diff(b) <= 1 {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Draw;
    use crate::stats::compute_snapshot;

    fn draw(issue: &str, primary: &[u8], secondary: &[u8]) -> Draw {
        Draw {
            issue: issue.to_string(),
            date: "2026-02-03".to_string(),
            primary: primary.to_vec(),
            secondary: secondary.to_vec(),
        }
    }

    fn sample_snapshot() -> StatSnapshot {
        let draws = vec![
            draw("005", &[1, 2, 3, 4, 5, 6], &[7]),
            draw("004", &[1, 2, 3, 10, 20, 30], &[7]),
            draw("003", &[1, 2, 15, 16, 25, 33], &[8]),
            draw("002", &[1, 12, 13, 22, 28, 31], &[16]),
            draw("001", &[5, 9, 17, 18, 29, 32], &[1]),
        ];
        compute_snapshot(Game::Ssq, &draws, 100)
    }

    #[test]
    fn test_missing_severity_thresholds() {
        assert_eq!(missing_severity(16), Severity::High);
        assert_eq!(missing_severity(15), Severity::Medium);
        assert_eq!(missing_severity(11), Severity::Medium);
        assert_eq!(missing_severity(10), Severity::Low);
        assert_eq!(missing_severity(0), Severity::Low);
    }

    #[test]
    fn test_render_hot_and_cold_ranking() {
        let view = render_analysis(&sample_snapshot());

        assert_eq!(view.hot.len(), 10);
        assert_eq!(view.hot[0].number, 1); // sorti 4 fois sur 5
        assert_eq!(view.hot[0].count, 4);
        assert!((view.hot[0].percentage - 80.0).abs() < 1e-9);
        assert_eq!(view.hot[1].number, 2); // sorti 3 fois

        // Les comptes du froid sont croissants
        assert_eq!(view.cold.len(), 10);
        for pair in view.cold.windows(2) {
            assert!(pair[0].count <= pair[1].count);
        }
        // Les numéros jamais sortis apparaissent dans le froid
        assert_eq!(view.cold[0].count, 0);
    }

    #[test]
    fn test_render_hot_excludes_unseen_numbers() {
        let draws = vec![draw("001", &[2, 9, 13, 22, 24, 31], &[10])];
        let snapshot = compute_snapshot(Game::Ssq, &draws, 1);
        let view = render_analysis(&snapshot);

        // Fenêtre d'un seul tirage : seuls les 6 numéros sortis sont chauds
        assert_eq!(view.hot.len(), 6);
        assert!(view.hot.iter().all(|n| n.count > 0));
        assert_eq!(view.secondary_hot.len(), 1);
        assert_eq!(view.secondary_hot[0].number, 10);
        // Le froid garde les numéros jamais sortis
        assert_eq!(view.cold.len(), 10);
        assert_eq!(view.cold[0].count, 0);
    }

    #[test]
    fn test_render_secondary_hot() {
        let view = render_analysis(&sample_snapshot());
        assert_eq!(view.secondary_hot.len(), 5);
        assert_eq!(view.secondary_hot[0].number, 7);
        assert_eq!(view.secondary_hot[0].count, 2);
    }

    #[test]
    fn test_render_missing_entries() {
        let view = render_analysis(&sample_snapshot());
        assert_eq!(view.missing_primary.len(), 10);
        // Numéro jamais sorti : retard = taille de la fenêtre
        assert_eq!(view.missing_primary[0].missing, 5);
        assert_eq!(view.missing_primary[0].severity, Severity::Low);
        for pair in view.missing_primary.windows(2) {
            assert!(pair[0].missing >= pair[1].missing);
        }
        assert_eq!(view.missing_secondary.len(), 5);
    }

    #[test]
    fn test_render_heatmap_levels() {
        let view = render_analysis(&sample_snapshot());
        assert_eq!(view.heatmap.len(), 33);

        let by_number = |n: u8| &view.heatmap[(n - 1) as usize];
        assert_eq!(by_number(1).level, HeatLevel::Hot3); // compte maximal
        // Un numéro jamais sorti est froid
        let unseen = view.heatmap.iter().find(|c| c.count == 0).unwrap();
        assert_eq!(unseen.level, HeatLevel::Cold);
    }

    #[test]
    fn test_render_ratio_slices() {
        let view = render_analysis(&sample_snapshot());
        let total: u32 = view.odd_even.iter().map(|s| s.count).sum();
        assert_eq!(total, 5);
        let pct: f64 = view.odd_even.iter().map(|s| s.percentage).sum();
        assert!((pct - 100.0).abs() < 0.1);
        assert!(!view.big_small.is_empty());
    }

    #[test]
    fn test_render_overview() {
        let view = render_analysis(&sample_snapshot());
        let overview = view.overview.expect("fenêtre non vide");
        assert_eq!(overview.sum.min, 21); // 1+2+3+4+5+6
        assert_eq!(overview.band_means.len(), 3);
        assert!(overview.most_common_run.is_some());
    }

    #[test]
    fn test_placeholder_view() {
        let view = placeholder(Game::Dlt);
        assert!(view.placeholder);
        assert_eq!(view.periods, 0);
        assert!(view.hot.is_empty());
        assert!(view.cold.is_empty());
        assert!(view.heatmap.is_empty());
        assert!(view.odd_even.is_empty());
        assert!(view.overview.is_none());
    }

    #[test]
    fn test_analyze_fixed_empty_rejected() {
        let snapshot = sample_snapshot();
        let result = analyze_fixed(&snapshot, &FixedSelection::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_fixed_out_of_range_rejected() {
        let snapshot = sample_snapshot();
        let fixed = FixedSelection {
            primary: vec![34],
            secondary: vec![],
        };
        assert!(analyze_fixed(&snapshot, &fixed).is_err());

        let fixed = FixedSelection {
            primary: vec![],
            secondary: vec![17],
        };
        assert!(analyze_fixed(&snapshot, &fixed).is_err());
    }

    #[test]
    fn test_analyze_fixed_report() {
        let snapshot = sample_snapshot();
        let fixed = FixedSelection {
            primary: vec![1, 9, 22],
            secondary: vec![7],
        };
        let report = analyze_fixed(&snapshot, &fixed).unwrap();

        assert_eq!(report.stats.len(), 4);
        let n1 = &report.stats[0];
        assert_eq!(n1.number, 1);
        assert_eq!(n1.count, 4);
        assert_eq!(n1.status, NumberStatus::Hot); // 4 > 5 * 0.15
        assert!((n1.frequency - 80.0).abs() < 1e-9);

        let blue = report.stats.last().unwrap();
        assert_eq!(blue.zone, "Bleus");
        assert_eq!(blue.status, NumberStatus::Hot); // 2 > 5 * 0.10

        // 1, 9 impairs, 22 pair → 2:1 équilibré ; 22 grand → 1:2 équilibré
        assert_eq!(report.evaluation.odd_even_ratio, "2:1");
        assert_eq!(report.evaluation.odd_even_score, 2);
        assert_eq!(report.evaluation.big_small_ratio, "1:2");
        assert_eq!(report.evaluation.total_score, 4);
        assert_eq!(report.evaluation.rating, "⭐⭐⭐⭐⭐");
        assert_eq!(report.evaluation.need_primary, 3);
        assert_eq!(report.evaluation.need_secondary, 0);
    }

    #[test]
    fn test_analyze_fixed_unbalanced_score() {
        let snapshot = sample_snapshot();
        let fixed = FixedSelection {
            primary: vec![1, 3, 5, 7, 9],
            secondary: vec![],
        };
        let report = analyze_fixed(&snapshot, &fixed).unwrap();
        // 5 impairs, 0 pair : déséquilibré ; 0 grand, 5 petits : déséquilibré
        assert_eq!(report.evaluation.odd_even_score, 1);
        assert_eq!(report.evaluation.big_small_score, 1);
        assert_eq!(report.evaluation.total_score, 2);
        assert_eq!(report.evaluation.rating, "⭐⭐⭐");
    }

    #[test]
    fn test_heat_level_serialization() {
        let cell = HeatCell {
            number: 9,
            count: 27,
            level: HeatLevel::Hot3,
        };
        let json = serde_json::to_string(&cell).unwrap();
        assert!(json.contains("\"hot-3\""));
    }
}
