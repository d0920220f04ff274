use history_stats_core::{
    Error,
    Query,
    Result,
    Timeframe,
};
use time::PrimitiveDateTime;
use tracing::debug;

use crate::History;

/// Keeps events between the window's cutoff and `now`, both inclusive
///
/// Bounded windows drop events whose timestamp could not be parsed.
pub fn window(history: History, timeframe: Timeframe, now: PrimitiveDateTime) -> History {
    match timeframe.cutoff(now) {
        Some(cutoff) => history.retain(|ev| ev.timestamp.map(|ts| cutoff <= ts && ts <= now).unwrap_or(false)),
        None => history,
    }
}

/// Keeps events whose artist name contains `needle`, ignoring case
pub fn artist(history: History, needle: &str) -> History {
    let needle = needle.to_lowercase();
    history.retain(|ev| ev.artist_name().map(|a| a.to_lowercase().contains(&needle)).unwrap_or(false))
}

/// Applies the query's window and artist filter
///
/// # Errors
///
/// Returns [`Error::EmptyResult`] if no listens survive either step.
pub fn apply(history: History, query: &Query) -> Result<History> {
    let timeframe = query.window();
    let history = window(history, timeframe, query.now);
    debug!(%timeframe, events = history.len(), "Applied time window");
    if history.played().is_empty() {
        return Err(Error::empty_timeframe());
    }

    let Some(name) = query.artist() else {
        return Ok(history);
    };
    let history = artist(history, name);
    debug!(artist = name, events = history.len(), "Applied artist filter");
    if history.played().is_empty() {
        return Err(Error::empty_artist(name));
    }
    Ok(history)
}
