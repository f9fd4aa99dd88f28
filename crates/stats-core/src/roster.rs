use models::LeaderboardRow;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::level::{classify, thresholds_of, Level};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub person_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub th: f64,
    pub level: Option<Level>,
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelCount {
    pub level: Level,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelDistribution {
    pub levels: Vec<LevelCount>,
    pub unclassified: usize,
}

/// Rank rows by capacity, highest first. Equal capacities keep input order.
pub fn rank(rows: &[LeaderboardRow]) -> Vec<RankedRow> {
    let mut sorted = rows.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|row| std::cmp::Reverse(OrderedFloat(row.th)));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let level = classify(row.th);
            RankedRow {
                rank: i + 1,
                person_id: row.person_id.clone(),
                name: row.name.clone(),
                th: row.th,
                level,
                progress: level.map_or(0.0, |l| thresholds_of(l).progress(row.th)),
            }
        })
        .collect()
}

/// Rows at exactly `level`, ranks preserved from the full leaderboard.
pub fn filter_by_level(ranked: &[RankedRow], level: Level) -> Vec<RankedRow> {
    ranked
        .iter()
        .filter(|row| row.level == Some(level))
        .cloned()
        .collect()
}

pub fn level_distribution(rows: &[LeaderboardRow]) -> LevelDistribution {
    let mut levels = Level::all()
        .map(|level| LevelCount { level, count: 0 })
        .collect::<Vec<_>>();
    let mut unclassified = 0;

    for row in rows {
        match classify(row.th) {
            Some(level) => levels[level.index() as usize].count += 1,
            None => unclassified += 1,
        }
    }

    LevelDistribution {
        levels,
        unclassified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, th: f64) -> LeaderboardRow {
        LeaderboardRow {
            person_id: id.to_string(),
            name: None,
            th,
        }
    }

    #[test]
    fn ranks_descending_with_stable_ties() {
        let rows = vec![
            row("a", 500.0),
            row("b", 10_000.0),
            row("c", 500.0),
            row("d", 100.0),
        ];
        let ranked = rank(&rows);
        let ids = ranked.iter().map(|r| r.person_id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["b", "a", "c", "d"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[3].rank, 4);
        assert_eq!(ranked[0].level, Level::new(2));
        assert_eq!(ranked[3].level, None);
        assert_eq!(ranked[3].progress, 0.0);
    }

    #[test]
    fn filter_keeps_global_rank() {
        let rows = vec![row("a", 300.0), row("b", 1_000.0), row("c", 900.0)];
        let ranked = rank(&rows);
        let level0 = filter_by_level(&ranked, Level::new(0).unwrap());
        assert_eq!(level0.len(), 2);
        assert_eq!(level0[0].person_id, "c");
        assert_eq!(level0[0].rank, 2);
        assert_eq!(level0[1].rank, 3);
    }

    #[test]
    fn distribution_covers_every_level() {
        let rows = vec![
            row("a", 10.0),
            row("b", 234.0),
            row("c", 935.0),
            row("d", 8_000_000.0),
        ];
        let dist = level_distribution(&rows);
        assert_eq!(dist.levels.len(), 11);
        assert_eq!(dist.unclassified, 1);
        assert_eq!(dist.levels[0].count, 2);
        assert_eq!(dist.levels[10].count, 1);
        let total = dist.levels.iter().map(|l| l.count).sum::<usize>() + dist.unclassified;
        assert_eq!(total, rows.len());
    }
}
