use time::{
    PrimitiveDateTime,
    Weekday,
};

/// Plays shorter than this are not counted as listens
pub const MIN_PLAYED_MINUTES: f64 = 0.25;

/// Plays shorter than this are treated as the user skipping the track
pub const SKIP_THRESHOLD_MINUTES: f64 = 15.0 / 60.0;

/// A track needs at least this many plays before its skips are ranked
pub const SKIP_MIN_PLAYS: usize = 3;

/// Length of every top-N ranking
pub const TOP_N: usize = 10;

pub const MS_PER_MINUTE: f64 = 60_000.0;


/// One normalized entry of a listening history
#[derive(Debug, Clone, PartialEq)]
pub struct PlayEvent {
    /// Timezone-naive play time, `None` if the source value could not be parsed
    pub timestamp: Option<PrimitiveDateTime>,
    pub minutes_played: f64,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub hour_of_day: Option<u8>,
    pub day_of_week: Option<Weekday>,
}

impl PlayEvent {
    pub fn new(
        timestamp: Option<PrimitiveDateTime>,
        ms_played: u64,
        track_name: Option<String>,
        artist_name: Option<String>,
    ) -> Self {
        Self {
            timestamp,
            minutes_played: ms_played as f64 / MS_PER_MINUTE,
            track_name,
            artist_name,
            hour_of_day: timestamp.map(|ts| ts.hour()),
            day_of_week: timestamp.map(|ts| ts.weekday()),
        }
    }

    /// Long enough to count as a listen
    #[inline]
    pub fn is_played(&self) -> bool { self.minutes_played >= MIN_PLAYED_MINUTES }

    #[inline]
    pub fn is_skip(&self) -> bool { self.minutes_played < SKIP_THRESHOLD_MINUTES }

    #[inline]
    pub fn track_name(&self) -> Option<&str> { self.track_name.as_deref() }

    #[inline]
    pub fn artist_name(&self) -> Option<&str> { self.artist_name.as_deref() }
}
