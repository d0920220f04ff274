use history_stats_core::PlayEvent;
use serde::Deserialize;
use serde_with::{
    serde_as,
    DefaultOnError,
};
use time::PrimitiveDateTime;

use crate::de::{
    lenient_datetime,
    lenient_ms,
};


/// Represents a single entry from a spotify history dump
///
/// Covers both the "extended streaming history" (`ts`, `master_metadata_*`) and the
/// "account data" (`endTime`, `trackName`, ...) export formats. Every field is optional
/// and falls back to a default instead of failing the record.
#[serde_as]
#[cfg_attr(test, derive(PartialEq, Eq))]
#[derive(Debug, Default, Deserialize)]
pub struct SpotifyListen {
    #[serde(rename = "ts", alias = "endTime", default, deserialize_with = "lenient_datetime")]
    pub time: Option<PrimitiveDateTime>,

    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "master_metadata_track_name", alias = "trackName", default)]
    pub track: Option<String>,

    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "master_metadata_album_artist_name", alias = "artistName", default)]
    pub artist: Option<String>,

    #[serde(alias = "msPlayed", default, deserialize_with = "lenient_ms")]
    pub ms_played: Option<u64>,
}

impl From<SpotifyListen> for PlayEvent {
    fn from(val: SpotifyListen) -> Self { PlayEvent::new(val.time, val.ms_played.unwrap_or(0), val.track, val.artist) }
}
