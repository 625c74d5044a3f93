use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Les combinaisons générées n'ont aucune valeur prédictive : chaque appelant
/// qui les affiche doit reproduire cet avertissement tel quel.
pub const DISCLAIMER: &str =
    "⚠️ Combinaisons générées à titre récréatif uniquement. Chaque tirage est un \
événement aléatoire indépendant : l'historique n'a aucune valeur prédictive.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    /// Double couleur : 6 rouges (1-33) + 1 bleu (1-16)
    Ssq,
    /// Super loto : 5 avant (1-35) + 2 arrière (1-12)
    Dlt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Primary,
    Secondary,
}

impl Game {
    pub fn name(&self) -> &'static str {
        match self {
            Game::Ssq => "Double couleur",
            Game::Dlt => "Super loto",
        }
    }

    /// Plus grand numéro valide de la zone (les numéros partent de 1).
    pub fn pool_size(&self, zone: Zone) -> u8 {
        match (self, zone) {
            (Game::Ssq, Zone::Primary) => 33,
            (Game::Ssq, Zone::Secondary) => 16,
            (Game::Dlt, Zone::Primary) => 35,
            (Game::Dlt, Zone::Secondary) => 12,
        }
    }

    pub fn pick_count(&self, zone: Zone) -> usize {
        match (self, zone) {
            (Game::Ssq, Zone::Primary) => 6,
            (Game::Ssq, Zone::Secondary) => 1,
            (Game::Dlt, Zone::Primary) => 5,
            (Game::Dlt, Zone::Secondary) => 2,
        }
    }

    /// Frontière grand/petit : un numéro >= frontière compte comme « grand ».
    pub fn big_boundary(&self) -> u8 {
        match self {
            Game::Ssq => 17,
            Game::Dlt => 18,
        }
    }

    /// Découpage en tranches de la zone principale, bornes incluses.
    pub fn band_partition(&self) -> &'static [(u8, u8)] {
        match self {
            Game::Ssq => &[(1, 11), (12, 22), (23, 33)],
            Game::Dlt => &[(1, 7), (8, 14), (15, 21), (22, 28), (29, 35)],
        }
    }

    pub fn zone_label(&self, zone: Zone) -> &'static str {
        match (self, zone) {
            (Game::Ssq, Zone::Primary) => "Rouges",
            (Game::Ssq, Zone::Secondary) => "Bleus",
            (Game::Dlt, Zone::Primary) => "Avant",
            (Game::Dlt, Zone::Secondary) => "Arrière",
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Un tirage historique, zones triées par ordre croissant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub issue: String,
    pub date: String,
    pub primary: Vec<u8>,
    pub secondary: Vec<u8>,
}

impl Draw {
    pub fn numbers(&self, zone: Zone) -> &[u8] {
        match zone {
            Zone::Primary => &self.primary,
            Zone::Secondary => &self.secondary,
        }
    }
}

/// Une combinaison jouable ou générée, zones triées par ordre croissant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub primary: Vec<u8>,
    pub secondary: Vec<u8>,
}

impl Combination {
    pub fn numbers(&self, zone: Zone) -> &[u8] {
        match zone {
            Zone::Primary => &self.primary,
            Zone::Secondary => &self.secondary,
        }
    }
}

/// Valide une sélection partielle d'une zone : numéros dans la plage du jeu,
/// sans doublon, au plus le nombre de numéros tirés par la zone.
pub fn validate_selection(game: Game, zone: Zone, numbers: &[u8]) -> Result<()> {
    let label = game.zone_label(zone);
    let max = game.pool_size(zone);
    let pick = game.pick_count(zone);

    if numbers.len() > pick {
        bail!("{} : au plus {} numéro(s), {} fournis", label, pick, numbers.len());
    }
    for &n in numbers {
        if n < 1 || n > max {
            bail!("{} : numéro {} hors limites (1-{})", label, n, max);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("{} : numéro en double : {}", label, numbers[i]);
            }
        }
    }
    Ok(())
}

/// Valide une combinaison complète pour un jeu donné.
pub fn validate_combination(game: Game, primary: &[u8], secondary: &[u8]) -> Result<()> {
    validate_selection(game, Zone::Primary, primary)?;
    validate_selection(game, Zone::Secondary, secondary)?;

    if primary.len() != game.pick_count(Zone::Primary) {
        bail!(
            "{} : {} numéro(s) attendus, {} fournis",
            game.zone_label(Zone::Primary),
            game.pick_count(Zone::Primary),
            primary.len()
        );
    }
    if secondary.len() != game.pick_count(Zone::Secondary) {
        bail!(
            "{} : {} numéro(s) attendus, {} fournis",
            game.zone_label(Zone::Secondary),
            game.pick_count(Zone::Secondary),
            secondary.len()
        );
    }
    Ok(())
}
