use std::collections::HashMap;

use history_stats_core::{
    Query,
    Ranking,
    StatsReport,
    SKIP_MIN_PLAYS,
    TOP_N,
};

use crate::{
    History,
    PlayedView,
    RawView,
};


/// Builds the stats report for an already filtered history
pub fn report(history: &History, query: &Query) -> StatsReport {
    let played = history.played();
    let (most_skipped, least_skipped) = skip_rankings(history.raw());

    StatsReport {
        timeframe: query.timeframe.clone(),
        artist_filter: query.artist().map(str::to_owned),
        amount_of_tracks: played.iter().filter(|ev| ev.track_name.is_some()).count() as u64,
        total_listening_hours: round2(total_minutes(&played) / 60.0),
        avg_track_duration: round2(avg_minutes(&played)),
        top_10_artists: top_n(played.iter().filter_map(|ev| ev.artist_name())),
        top_10_songs: top_n(played.iter().filter_map(|ev| ev.track_name())),
        most_skipped,
        least_skipped,
    }
}

pub fn total_minutes(played: &PlayedView) -> f64 { played.iter().map(|ev| ev.minutes_played).sum() }

/// Mean minutes per listen, 0 when there are none
pub fn avg_minutes(played: &PlayedView) -> f64 {
    match played.len() {
        0 => 0.0,
        n => total_minutes(played) / n as f64,
    }
}

/// Most frequent names, descending by count
pub fn top_n<'a>(names: impl Iterator<Item = &'a str>) -> Ranking {
    let mut counts = count_by_name(names);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    to_ranking(counts)
}

/// Skip counts for tracks played at least [`SKIP_MIN_PLAYS`] times, as `(most, least)`
///
/// Both rankings draw from the same tracks: those with at least one skip.
pub fn skip_rankings(raw: RawView) -> (Ranking, Ranking) {
    let plays: HashMap<&str, u64> = count_by_name(raw.iter().filter_map(|ev| ev.track_name())).into_iter().collect();
    let skips: Vec<(&str, u64)> = count_by_name(
        raw.iter()
            .filter(|ev| ev.is_skip())
            .filter_map(|ev| ev.track_name())
            .filter(|name| plays.get(name).copied().unwrap_or_default() >= SKIP_MIN_PLAYS as u64),
    );

    let mut most = skips.clone();
    most.sort_by(|a, b| b.1.cmp(&a.1));
    let mut least = skips;
    least.sort_by(|a, b| a.1.cmp(&b.1));

    (to_ranking(most), to_ranking(least))
}

/// Counts occurrences, keeping first-seen order so stable sorts break ties by it
fn count_by_name<'a>(names: impl Iterator<Item = &'a str>) -> Vec<(&'a str, u64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, u64)> = Vec::new();
    for name in names {
        let idx = *index.entry(name).or_insert_with(|| {
            counts.push((name, 0));
            counts.len() - 1
        });
        counts[idx].1 += 1;
    }
    counts
}

fn to_ranking(counts: Vec<(&str, u64)>) -> Ranking {
    counts.into_iter().take(TOP_N).map(|(name, count)| (name.to_owned(), count)).collect()
}

#[inline]
fn round2(val: f64) -> f64 { (val * 100.0).round() / 100.0 }
