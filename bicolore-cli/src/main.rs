mod display;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use bicolore_core::dataset::sample_draws;
use bicolore_core::models::{Game, Zone};
use bicolore_core::render::{analyze_fixed, render_analysis};
use bicolore_core::sampler::{generate_combinations, FixedSelection, SamplingMode};
use bicolore_core::stats::compute_snapshot;

use crate::display::{display_analysis, display_combinations, display_fixed_report};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum GameArg {
    /// Double couleur : 6 rouges (1-33) + 1 bleu (1-16)
    #[default]
    Ssq,
    /// Super loto : 5 avant (1-35) + 2 arrière (1-12)
    Dlt,
}

impl From<GameArg> for Game {
    fn from(arg: GameArg) -> Self {
        match arg {
            GameArg::Ssq => Game::Ssq,
            GameArg::Dlt => Game::Dlt,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum ModeArg {
    #[default]
    Random,
    Weighted,
}

impl From<ModeArg> for SamplingMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Random => SamplingMode::Random,
            ModeArg::Weighted => SamplingMode::Weighted,
        }
    }
}

/// Section de l'analyse à afficher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Metric {
    #[default]
    All,
    HotCold,
    Missing,
    Heatmap,
    OddEven,
    BigSmall,
    Overview,
}

#[derive(Parser)]
#[command(name = "bicolore", about = "Analyseur statistique Double couleur / Super loto")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Statistiques sur l'historique embarqué
    Stats {
        /// Jeu analysé
        #[arg(short = 't', long, value_enum, default_value = "ssq")]
        game: GameArg,

        /// Fenêtre d'analyse (nombre de tirages)
        #[arg(short, long, default_value = "100")]
        periods: u32,

        /// Section à afficher
        #[arg(short, long, value_enum, default_value = "all")]
        metric: Metric,

        /// Sortie JSON pour une couche graphique
        #[arg(long)]
        json: bool,
    },

    /// Analyser des numéros fixés par l'utilisateur
    Fixed {
        /// Jeu analysé
        #[arg(short = 't', long, value_enum, default_value = "ssq")]
        game: GameArg,

        /// Numéros rouges/avant, séparés par des virgules (ex: 7,18,25)
        #[arg(long)]
        primary: Option<String>,

        /// Numéros bleus/arrière, séparés par des virgules (ex: 14 ou 3,9)
        #[arg(long)]
        secondary: Option<String>,

        /// Fenêtre d'analyse (nombre de tirages)
        #[arg(short, long, default_value = "100")]
        periods: u32,

        /// Générer aussi des combinaisons complétant les numéros fixés
        #[arg(short, long)]
        generate: bool,

        /// Nombre de combinaisons à générer
        #[arg(short, long, default_value = "3")]
        count: usize,

        /// Mode de génération
        #[arg(short, long, value_enum, default_value = "random")]
        mode: ModeArg,

        /// Graine pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Sortie JSON
        #[arg(long)]
        json: bool,
    },

    /// Générer des combinaisons aléatoires
    Generate {
        /// Jeu ciblé
        #[arg(short = 't', long, value_enum, default_value = "ssq")]
        game: GameArg,

        /// Nombre de combinaisons
        #[arg(short, long, default_value = "3")]
        count: usize,

        /// Mode de génération
        #[arg(short, long, value_enum, default_value = "random")]
        mode: ModeArg,

        /// Graine pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Sortie JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Stats {
            game,
            periods,
            metric,
            json,
        } => cmd_stats(game.into(), periods, metric, json),
        Command::Fixed {
            game,
            primary,
            secondary,
            periods,
            generate,
            count,
            mode,
            seed,
            json,
        } => cmd_fixed(
            game.into(),
            primary,
            secondary,
            periods,
            generate,
            count,
            mode.into(),
            seed,
            json,
        ),
        Command::Generate {
            game,
            count,
            mode,
            seed,
            json,
        } => cmd_generate(game.into(), count, mode.into(), seed, json),
    }
}

fn cmd_stats(game: Game, periods: u32, metric: Metric, json: bool) -> Result<()> {
    let draws = sample_draws(game);
    let snapshot = compute_snapshot(game, &draws, periods);
    let view = render_analysis(&snapshot);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.placeholder {
        println!("Aucune donnée disponible pour {} : rien à afficher.", game.name());
        return Ok(());
    }

    display_analysis(&view, metric);
    Ok(())
}

fn cmd_fixed(
    game: Game,
    primary: Option<String>,
    secondary: Option<String>,
    periods: u32,
    generate: bool,
    count: usize,
    mode: SamplingMode,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let fixed = FixedSelection {
        primary: parse_numbers(primary.as_deref())?,
        secondary: parse_numbers(secondary.as_deref())?,
    };

    let draws = sample_draws(game);
    let snapshot = compute_snapshot(game, &draws, periods);
    let report = analyze_fixed(&snapshot, &fixed)?;

    let combinations = if generate {
        let hot = snapshot.top_numbers(Zone::Primary, 10);
        Some(generate_combinations(game, &fixed, &hot, count, mode, seed)?)
    } else {
        None
    };

    if json {
        let payload = fixed_payload(&report, &combinations);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    display_fixed_report(&report, game);
    if let Some(combos) = &combinations {
        display_combinations(combos, game);
    }
    Ok(())
}

/// Charge utile JSON de l'analyse de numéros fixés. Toute sortie contenant
/// des combinaisons générées doit porter l'avertissement.
fn fixed_payload(
    report: &bicolore_core::render::FixedReport,
    combinations: &Option<Vec<bicolore_core::models::Combination>>,
) -> serde_json::Value {
    serde_json::json!({
        "report": report,
        "combinations": combinations,
        "disclaimer": combinations
            .as_ref()
            .map(|_| bicolore_core::models::DISCLAIMER),
    })
}

fn cmd_generate(
    game: Game,
    count: usize,
    mode: SamplingMode,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let draws = sample_draws(game);
    let snapshot = compute_snapshot(game, &draws, 100);
    let hot = snapshot.top_numbers(Zone::Primary, 10);

    let combinations =
        generate_combinations(game, &FixedSelection::default(), &hot, count, mode, seed)?;

    if json {
        let payload = serde_json::json!({
            "game": game,
            "combinations": combinations,
            "disclaimer": bicolore_core::models::DISCLAIMER,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    display_combinations(&combinations, game);
    Ok(())
}

/// Parse une liste de numéros séparés par des virgules ("7,18,25").
fn parse_numbers(input: Option<&str>) -> Result<Vec<u8>> {
    let Some(input) = input else {
        return Ok(Vec::new());
    };
    input
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u8>()
                .with_context(|| format!("Numéro invalide : '{}'", s))
        })
        .collect()
}
