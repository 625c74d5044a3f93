use crate::models::{Draw, Game};

fn d(issue: &str, date: &str, primary: &[u8], secondary: &[u8]) -> Draw {
    Draw {
        issue: issue.to_string(),
        date: date.to_string(),
        primary: primary.to_vec(),
        secondary: secondary.to_vec(),
    }
}

/// Historique d'exemple embarqué, tirage le plus récent en premier.
/// Remplace l'ingestion réelle, hors périmètre : la même forme de données
/// viendrait d'une source externe dans un déploiement réel.
pub fn sample_draws(game: Game) -> Vec<Draw> {
    match game {
        Game::Ssq => vec![
            d("2026020", "2026-02-26", &[2, 9, 13, 22, 24, 31], &[10]),
            d("2026019", "2026-02-24", &[3, 4, 9, 17, 24, 33], &[5]),
            d("2026018", "2026-02-21", &[1, 8, 9, 13, 19, 26], &[10]),
            d("2026017", "2026-02-19", &[5, 6, 10, 19, 23, 28], &[8]),
            d("2026016", "2026-02-17", &[2, 9, 12, 13, 25, 30], &[15]),
            d("2026015", "2026-02-14", &[7, 8, 18, 20, 24, 32], &[16]),
            d("2026014", "2026-02-12", &[3, 5, 10, 14, 21, 27], &[5]),
            d("2026013", "2026-02-10", &[2, 4, 8, 16, 19, 24], &[10]),
            d("2026012", "2026-02-07", &[6, 9, 15, 17, 18, 33], &[1]),
            d("2026011", "2026-02-05", &[1, 3, 12, 13, 26, 31], &[8]),
            d("2026010", "2026-02-03", &[5, 10, 11, 20, 23, 29], &[12]),
            d("2026009", "2026-01-31", &[2, 7, 9, 16, 25, 30], &[5]),
            d("2026008", "2026-01-29", &[4, 8, 14, 19, 22, 28], &[10]),
            d("2026007", "2026-01-27", &[3, 6, 13, 17, 24, 32], &[16]),
            d("2026006", "2026-01-24", &[1, 2, 15, 18, 27, 33], &[7]),
            d("2026005", "2026-01-22", &[5, 9, 12, 21, 23, 30], &[3]),
            d("2026004", "2026-01-20", &[8, 10, 13, 19, 25, 31], &[15]),
            d("2026003", "2026-01-17", &[2, 6, 11, 16, 20, 29], &[10]),
            d("2026002", "2026-01-15", &[4, 9, 14, 22, 24, 28], &[5]),
            d("2026001", "2026-01-13", &[3, 7, 12, 17, 26, 32], &[8]),
        ],
        Game::Dlt => vec![
            d("26020", "2026-02-25", &[4, 11, 19, 27, 34], &[3, 9]),
            d("26019", "2026-02-23", &[2, 8, 15, 22, 35], &[5, 12]),
            d("26018", "2026-02-20", &[6, 13, 20, 28, 33], &[1, 7]),
            d("26017", "2026-02-18", &[1, 9, 16, 24, 31], &[6, 10]),
            d("26016", "2026-02-16", &[5, 12, 18, 25, 34], &[2, 9]),
            d("26015", "2026-02-13", &[3, 10, 21, 26, 35], &[4, 11]),
            d("26014", "2026-02-11", &[7, 14, 17, 23, 30], &[3, 8]),
            d("26013", "2026-02-09", &[2, 11, 19, 29, 32], &[5, 9]),
            d("26012", "2026-02-06", &[4, 8, 16, 27, 33], &[1, 12]),
            d("26011", "2026-02-04", &[6, 12, 20, 24, 35], &[7, 10]),
            d("26010", "2026-02-02", &[1, 15, 18, 26, 31], &[2, 6]),
            d("26009", "2026-01-30", &[5, 9, 22, 28, 34], &[3, 11]),
            d("26008", "2026-01-28", &[3, 13, 17, 25, 30], &[8, 9]),
            d("26007", "2026-01-26", &[7, 10, 21, 29, 33], &[4, 12]),
            d("26006", "2026-01-23", &[2, 14, 19, 23, 32], &[1, 5]),
            d("26005", "2026-01-21", &[6, 11, 16, 27, 35], &[6, 9]),
            d("26004", "2026-01-19", &[4, 12, 20, 26, 31], &[2, 10]),
            d("26003", "2026-01-16", &[1, 8, 18, 24, 30], &[3, 7]),
            d("26002", "2026-01-14", &[5, 15, 22, 28, 33], &[5, 11]),
            d("26001", "2026-01-12", &[3, 9, 13, 25, 34], &[4, 8]),
        ],
    }
}
