use anyhow::Result;
use rand::SeedableRng;
use rand::distr::weighted::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::models::{validate_selection, Combination, Game, Zone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    /// Tirage uniforme.
    #[default]
    Random,
    /// Les numéros chauds de la zone principale pèsent 1.5, les autres 1.0.
    Weighted,
}

/// Numéros imposés par l'utilisateur, complétés par le tirage aléatoire.
#[derive(Debug, Clone, Default)]
pub struct FixedSelection {
    pub primary: Vec<u8>,
    pub secondary: Vec<u8>,
}

impl FixedSelection {
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }
}

/// Génère `count` combinaisons valides pour le jeu donné. Les numéros fixés
/// sont conservés tels quels, le reste de chaque zone est tiré sans remise
/// parmi les numéros restants, puis chaque zone est triée.
///
/// Non déterministe sans graine ; avec `seed`, la sortie est reproductible
/// pour une même version de `rand`. À but récréatif uniquement : les
/// appelants doivent afficher [`crate::models::DISCLAIMER`].
pub fn generate_combinations(
    game: Game,
    fixed: &FixedSelection,
    hot_primary: &[u8],
    count: usize,
    mode: SamplingMode,
    seed: Option<u64>,
) -> Result<Vec<Combination>> {
    validate_selection(game, Zone::Primary, &fixed.primary)?;
    validate_selection(game, Zone::Secondary, &fixed.secondary)?;

    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut combinations = Vec::with_capacity(count);
    for _ in 0..count {
        let primary = draw_zone(game, Zone::Primary, &fixed.primary, hot_primary, mode, &mut rng)?;
        let secondary = draw_zone(game, Zone::Secondary, &fixed.secondary, &[], mode, &mut rng)?;
        combinations.push(Combination { primary, secondary });
    }

    Ok(combinations)
}

fn draw_zone(
    game: Game,
    zone: Zone,
    fixed: &[u8],
    hot: &[u8],
    mode: SamplingMode,
    rng: &mut StdRng,
) -> Result<Vec<u8>> {
    let need = game.pick_count(zone) - fixed.len();
    let mut available: Vec<u8> = (1..=game.pool_size(zone))
        .filter(|n| !fixed.contains(n))
        .collect();

    let mut selected = fixed.to_vec();
    for _ in 0..need {
        let weights: Vec<f64> = available
            .iter()
            .map(|n| {
                if mode == SamplingMode::Weighted && hot.contains(n) {
                    1.5
                } else {
                    1.0
                }
            })
            .collect();
        let dist = WeightedIndex::new(&weights)?;
        let idx = dist.sample(rng);
        selected.push(available.remove(idx));
    }

    selected.sort_unstable();
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validate_combination;

    #[test]
    fn test_generated_combinations_are_valid() {
        for game in [Game::Ssq, Game::Dlt] {
            let combos = generate_combinations(
                game,
                &FixedSelection::default(),
                &[],
                20,
                SamplingMode::Random,
                Some(42),
            )
            .unwrap();
            assert_eq!(combos.len(), 20);
            for combo in &combos {
                validate_combination(game, &combo.primary, &combo.secondary).unwrap();
                let mut sorted = combo.primary.clone();
                sorted.sort_unstable();
                assert_eq!(combo.primary, sorted);
            }
        }
    }

    #[test]
    fn test_seed_reproducibility() {
        let a = generate_combinations(
            Game::Ssq,
            &FixedSelection::default(),
            &[],
            5,
            SamplingMode::Random,
            Some(7),
        )
        .unwrap();
        let b = generate_combinations(
            Game::Ssq,
            &FixedSelection::default(),
            &[],
            5,
            SamplingMode::Random,
            Some(7),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_numbers_are_kept() {
        let fixed = FixedSelection {
            primary: vec![7, 18, 25],
            secondary: vec![14],
        };
        let combos =
            generate_combinations(Game::Ssq, &fixed, &[], 10, SamplingMode::Random, Some(1))
                .unwrap();
        for combo in &combos {
            for n in &fixed.primary {
                assert!(combo.primary.contains(n));
            }
            assert_eq!(combo.secondary, vec![14]);
            validate_combination(Game::Ssq, &combo.primary, &combo.secondary).unwrap();
        }
    }

    #[test]
    fn test_weighted_mode_stays_valid() {
        let hot = vec![9, 2, 13, 3, 24, 8, 4, 5, 10, 19];
        let combos = generate_combinations(
            Game::Ssq,
            &FixedSelection::default(),
            &hot,
            20,
            SamplingMode::Weighted,
            Some(99),
        )
        .unwrap();
        for combo in &combos {
            validate_combination(Game::Ssq, &combo.primary, &combo.secondary).unwrap();
        }
    }

    #[test]
    fn test_invalid_fixed_rejected() {
        let fixed = FixedSelection {
            primary: vec![34],
            secondary: vec![],
        };
        assert!(
            generate_combinations(Game::Ssq, &fixed, &[], 1, SamplingMode::Random, None).is_err()
        );

        let fixed = FixedSelection {
            primary: vec![3, 3],
            secondary: vec![],
        };
        assert!(
            generate_combinations(Game::Ssq, &fixed, &[], 1, SamplingMode::Random, None).is_err()
        );
    }

    #[test]
    fn test_dlt_zone_sizes() {
        let combos = generate_combinations(
            Game::Dlt,
            &FixedSelection::default(),
            &[],
            5,
            SamplingMode::Random,
            Some(3),
        )
        .unwrap();
        for combo in &combos {
            assert_eq!(combo.primary.len(), 5);
            assert_eq!(combo.secondary.len(), 2);
            assert!(combo.primary.iter().all(|&n| (1..=35).contains(&n)));
            assert!(combo.secondary.iter().all(|&n| (1..=12).contains(&n)));
        }
    }
}
