use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Draw, Game, Zone};

/// Ratio pairs/impairs : un numéro est impair si n % 2 == 1.
/// Entrée vide → (0, 0).
pub fn parity_ratio(numbers: &[u8]) -> (usize, usize) {
    let odd = numbers.iter().filter(|&&n| n % 2 == 1).count();
    (odd, numbers.len() - odd)
}

/// Ratio grands/petits : un numéro >= frontière compte comme « grand ».
pub fn size_ratio(numbers: &[u8], boundary: u8) -> (usize, usize) {
    let big = numbers.iter().filter(|&&n| n >= boundary).count();
    (big, numbers.len() - big)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioCount {
    pub ratio: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsecutiveStats {
    /// Nombre de suites (longueur >= 2) observées sur la fenêtre.
    pub runs: u32,
    /// Suites pour 100 périodes, arrondi à 2 décimales.
    pub rate: f64,
    pub top_patterns: Vec<(String, u32)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SumStats {
    pub min: u32,
    pub max: u32,
    pub average: f64,
    pub median: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpanStats {
    pub min: u8,
    pub max: u8,
    pub average: f64,
}

/// Agrégat en lecture seule d'une fenêtre de tirages pour un jeu.
/// Les vecteurs de comptage sont indexés par numéro - 1.
#[derive(Debug, Clone, Serialize)]
pub struct StatSnapshot {
    pub game: Game,
    pub periods: u32,
    pub primary_counts: Vec<u32>,
    pub secondary_counts: Vec<u32>,
    pub primary_missing: Vec<u32>,
    pub secondary_missing: Vec<u32>,
    pub odd_even: Vec<RatioCount>,
    pub big_small: Vec<RatioCount>,
    pub consecutive: ConsecutiveStats,
    pub sum: Option<SumStats>,
    pub span: Option<SpanStats>,
    pub band_means: Vec<f64>,
}

impl StatSnapshot {
    pub fn counts(&self, zone: Zone) -> &[u32] {
        match zone {
            Zone::Primary => &self.primary_counts,
            Zone::Secondary => &self.secondary_counts,
        }
    }

    pub fn missing(&self, zone: Zone) -> &[u32] {
        match zone {
            Zone::Primary => &self.primary_missing,
            Zone::Secondary => &self.secondary_missing,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.periods == 0
    }

    /// Les `n` numéros les plus fréquents d'une zone (comptes > 0),
    /// par fréquence décroissante puis numéro croissant.
    pub fn top_numbers(&self, zone: Zone, n: usize) -> Vec<u8> {
        let counts = self.counts(zone);
        let mut ranked: Vec<(u8, u32)> = counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(i, &c)| ((i + 1) as u8, c))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.into_iter().take(n).map(|(num, _)| num).collect()
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Agrège les `periods` tirages les plus récents (draws[0] = le plus récent).
/// Fenêtre vide → agrégat vide, jamais une erreur.
pub fn compute_snapshot(game: Game, draws: &[Draw], periods: u32) -> StatSnapshot {
    let window = &draws[..draws.len().min(periods as usize)];
    let window_len = window.len() as u32;

    let (primary_counts, primary_missing) = zone_counts(game, window, Zone::Primary);
    let (secondary_counts, secondary_missing) = zone_counts(game, window, Zone::Secondary);

    let boundary = game.big_boundary();
    let mut odd_even: HashMap<String, u32> = HashMap::new();
    let mut big_small: HashMap<String, u32> = HashMap::new();
    let mut runs_total = 0u32;
    let mut patterns: HashMap<String, u32> = HashMap::new();
    let mut sums: Vec<u32> = Vec::with_capacity(window.len());
    let mut spans: Vec<u8> = Vec::with_capacity(window.len());

    for draw in window {
        let numbers = &draw.primary;

        let (odd, even) = parity_ratio(numbers);
        *odd_even.entry(format!("{}:{}", odd, even)).or_insert(0) += 1;

        let (big, small) = size_ratio(numbers, boundary);
        *big_small.entry(format!("{}:{}", big, small)).or_insert(0) += 1;

        for (lo, hi) in consecutive_runs(numbers) {
            runs_total += 1;
            *patterns.entry(format!("{}-{}", lo, hi)).or_insert(0) += 1;
        }

        sums.push(numbers.iter().map(|&n| n as u32).sum());
        if let (Some(&lo), Some(&hi)) = (numbers.iter().min(), numbers.iter().max()) {
            spans.push(hi - lo);
        }
    }

    let mut top_patterns: Vec<(String, u32)> = patterns.into_iter().collect();
    top_patterns.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_patterns.truncate(5);

    let rate = if window_len > 0 {
        round2(runs_total as f64 / window_len as f64 * 100.0)
    } else {
        0.0
    };

    let band_means = game
        .band_partition()
        .iter()
        .map(|&(lo, hi)| {
            if window.is_empty() {
                return 0.0;
            }
            let total: u32 = window
                .iter()
                .map(|d| d.primary.iter().filter(|&&n| n >= lo && n <= hi).count() as u32)
                .sum();
            round2(total as f64 / window_len as f64)
        })
        .collect();

    StatSnapshot {
        game,
        periods: window_len,
        primary_counts,
        secondary_counts,
        primary_missing,
        secondary_missing,
        odd_even: sorted_distribution(odd_even),
        big_small: sorted_distribution(big_small),
        consecutive: ConsecutiveStats {
            runs: runs_total,
            rate,
            top_patterns,
        },
        sum: sum_stats(&sums),
        span: span_stats(&spans),
        band_means,
    }
}

/// Comptage d'occurrences et retard courant par numéro d'une zone.
/// Le retard d'un numéro absent de la fenêtre vaut la taille de la fenêtre.
fn zone_counts(game: Game, window: &[Draw], zone: Zone) -> (Vec<u32>, Vec<u32>) {
    let pool = game.pool_size(zone) as usize;
    let window_len = window.len() as u32;
    let mut counts = vec![0u32; pool];
    let mut missing = vec![window_len; pool];

    for (i, draw) in window.iter().enumerate() {
        for &n in draw.numbers(zone) {
            if n == 0 {
                continue;
            }
            let idx = (n - 1) as usize;
            if idx < pool {
                counts[idx] += 1;
                if missing[idx] == window_len {
                    missing[idx] = i as u32;
                }
            }
        }
    }

    (counts, missing)
}

/// Suites de numéros consécutifs (longueur >= 2) dans un tirage, sous forme
/// de bornes (début, fin).
pub fn consecutive_runs(numbers: &[u8]) -> Vec<(u8, u8)> {
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();

    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=sorted.len() {
        if i == sorted.len() || sorted[i] != sorted[i - 1] + 1 {
            if i - start >= 2 {
                runs.push((sorted[start], sorted[i - 1]));
            }
            start = i;
        }
    }
    runs
}

fn sorted_distribution(map: HashMap<String, u32>) -> Vec<RatioCount> {
    let mut dist: Vec<RatioCount> = map
        .into_iter()
        .map(|(ratio, count)| RatioCount { ratio, count })
        .collect();
    dist.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.ratio.cmp(&b.ratio)));
    dist
}

fn sum_stats(sums: &[u32]) -> Option<SumStats> {
    if sums.is_empty() {
        return None;
    }
    let mut sorted = sums.to_vec();
    sorted.sort_unstable();
    Some(SumStats {
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        average: round2(sums.iter().map(|&s| s as f64).sum::<f64>() / sums.len() as f64),
        median: sorted[sorted.len() / 2],
    })
}

fn span_stats(spans: &[u8]) -> Option<SpanStats> {
    let min = *spans.iter().min()?;
    let max = *spans.iter().max()?;
    Some(SpanStats {
        min,
        max,
        average: round2(spans.iter().map(|&s| s as f64).sum::<f64>() / spans.len() as f64),
    })
}
