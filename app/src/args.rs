use std::path::PathBuf;

use clap::Parser;
use history_stats_services::{
    de,
    OutputShape,
};
use time::PrimitiveDateTime;

/// Compute listening statistics from a spotify streaming history export
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Relative window to analyze: 30_days | 6_months | 1_year | lifetime
    ///
    /// Unrecognized values are treated as lifetime.
    #[arg(short, long, env = "HISTORY_STATS_TIMEFRAME", default_value = "lifetime")]
    pub timeframe: String,

    /// Only count plays whose artist name contains this, ignoring case
    #[arg(short, long)]
    pub artist: Option<String>,

    /// What to compute: stats | trend | heatmap
    #[arg(short, long, default_value = "stats", value_parser = parse_output)]
    pub output: OutputShape,

    /// End of the window, plays after it are ignored. Defaults to the current UTC time
    #[arg(long, value_parser = parse_datetime)]
    pub now: Option<PrimitiveDateTime>,

    /// Directory for temporary upload and extraction files
    #[arg(long, env = "HISTORY_STATS_TMPDIR")]
    pub temp_dir: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pub pretty: bool,

    /// Log pipeline progress to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Zip archive of the export, as downloaded from spotify
    pub archive: PathBuf,
}


fn parse_output(val: &str) -> Result<OutputShape, String> { val.parse() }

fn parse_datetime(dt: &str) -> Result<PrimitiveDateTime, String> {
    de::parse_datetime(dt).ok_or_else(|| format!("Unrecognized date/time '{dt}'"))
}


#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["history-stats", "export.zip"]).unwrap();
        assert_eq!(args.timeframe, "lifetime");
        assert_eq!(args.output, OutputShape::Stats);
        assert_eq!(args.artist, None);
        assert_eq!(args.now, None);
        assert_eq!(args.archive, PathBuf::from("export.zip"));
    }

    #[test]
    fn all_options() {
        let args = Args::try_parse_from([
            "history-stats",
            "-t",
            "30_days",
            "-a",
            "eminem",
            "-o",
            "heatmap",
            "--now",
            "2024-07-01 12:00",
            "export.zip",
        ])
        .unwrap();
        assert_eq!(args.timeframe, "30_days");
        assert_eq!(args.artist.as_deref(), Some("eminem"));
        assert_eq!(args.output, OutputShape::DayHourHeatmap);
        assert_eq!(args.now, Some(datetime!(2024-07-01 12:00)));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Args::try_parse_from(["history-stats", "-o", "pie", "export.zip"]).is_err());
        assert!(Args::try_parse_from(["history-stats", "--now", "soon", "export.zip"]).is_err());
        assert!(Args::try_parse_from(["history-stats"]).is_err());
    }
}
