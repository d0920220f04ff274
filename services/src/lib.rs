use std::{
    io::Read,
    path::Path,
};

pub use history_stats_core::*;
use tracing::info;

pub mod archive;
pub mod chart;
pub mod de;
pub mod filter;
mod history;
pub mod service;
pub mod stats;

pub use archive::ArchiveLoader;
pub use history::*;
use service::SpotifyListen;


/// Filters `history` by `query` and produces the requested output
///
/// # Errors
///
/// Returns [`Error::EmptyResult`] if no listens survive the query's filters.
pub fn analyze(history: History, query: &Query) -> Result<Analysis> {
    let history = filter::apply(history, query)?;
    Ok(match query.output {
        OutputShape::Stats => Analysis::Stats(stats::report(&history, query)),
        OutputShape::MonthlyTrend => Analysis::Trend(chart::monthly_trend(&history.played())),
        OutputShape::DayHourHeatmap => Analysis::Heatmap(chart::day_hour_matrix(&history.played())),
    })
}

/// Runs the whole pipeline on one uploaded spotify archive
///
/// # Errors
///
/// Returns [`Error::BadInput`] if the upload can't be loaded, see [`ArchiveLoader::load`],
/// and [`Error::EmptyResult`] as for [`analyze`].
pub fn analyze_archive(loader: &ArchiveLoader, file_name: &str, data: impl Read, query: &Query) -> Result<Analysis> {
    let files: Vec<Vec<SpotifyListen>> = loader.load(file_name, data)?;
    analyze(normalize(files), query)
}

/// Same as [`analyze_archive`], reading the upload from `path`
pub fn analyze_path(loader: &ArchiveLoader, path: &Path, query: &Query) -> Result<Analysis> {
    let files: Vec<Vec<SpotifyListen>> = loader.load_path(path)?;
    analyze(normalize(files), query)
}

fn normalize(files: Vec<Vec<SpotifyListen>>) -> History {
    let history = History::normalize(files);
    info!(events = history.len(), played = history.played().len(), "Normalized history");
    history
}
