use std::{
    fmt,
    str::FromStr,
};

use time::{
    Duration,
    PrimitiveDateTime,
};

/// Relative window selected by a client-supplied token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    Days30,
    Months6,
    Year1,
    #[default]
    Lifetime,
}

impl Timeframe {
    /// Unknown tokens fall back to [`Timeframe::Lifetime`]
    pub fn from_token(token: &str) -> Self {
        match token {
            "30_days" => Self::Days30,
            "6_months" => Self::Months6,
            "1_year" => Self::Year1,
            _ => Self::Lifetime,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Days30 => "30_days",
            Self::Months6 => "6_months",
            Self::Year1 => "1_year",
            Self::Lifetime => "lifetime",
        }
    }

    pub fn days(self) -> Option<i64> {
        match self {
            Self::Days30 => Some(30),
            Self::Months6 => Some(180),
            Self::Year1 => Some(365),
            Self::Lifetime => None,
        }
    }

    /// Earliest instant still inside the window, `None` when unbounded
    pub fn cutoff(self, now: PrimitiveDateTime) -> Option<PrimitiveDateTime> {
        self.days().and_then(|d| now.checked_sub(Duration::days(d)))
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.token()) }
}

/// What a pipeline run should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputShape {
    #[default]
    Stats,
    MonthlyTrend,
    DayHourHeatmap,
}

impl FromStr for OutputShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stats" => Ok(Self::Stats),
            "trend" | "listening_trend" => Ok(Self::MonthlyTrend),
            "heatmap" | "common_day_time" => Ok(Self::DayHourHeatmap),
            other => Err(format!("Unknown output '{other}', expected one of: stats, trend, heatmap")),
        }
    }
}

/// Parameters for one pipeline run
#[derive(Debug, Clone)]
pub struct Query {
    /// Timeframe token as supplied, echoed back in reports
    pub timeframe: String,
    pub artist: Option<String>,
    pub output: OutputShape,
    /// Reference point for relative windows
    pub now: PrimitiveDateTime,
}

impl Query {
    pub fn new(timeframe: impl Into<String>, now: PrimitiveDateTime) -> Self {
        Self {
            timeframe: timeframe.into(),
            artist: None,
            output: OutputShape::default(),
            now,
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_output(mut self, output: OutputShape) -> Self {
        self.output = output;
        self
    }

    #[inline]
    pub fn window(&self) -> Timeframe { Timeframe::from_token(&self.timeframe) }

    /// Artist filter, ignoring empty strings
    pub fn artist(&self) -> Option<&str> { self.artist.as_deref().filter(|a| !a.is_empty()) }
}


#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn tokens() {
        assert_eq!(Timeframe::from_token("30_days"), Timeframe::Days30);
        assert_eq!(Timeframe::from_token("6_months"), Timeframe::Months6);
        assert_eq!(Timeframe::from_token("1_year"), Timeframe::Year1);
        assert_eq!(Timeframe::from_token("lifetime"), Timeframe::Lifetime);
        assert_eq!(Timeframe::from_token("medium_term"), Timeframe::Lifetime);
    }

    #[test]
    fn cutoffs() {
        let now = datetime!(2024-07-01 12:00);
        assert_eq!(Timeframe::Days30.cutoff(now), Some(datetime!(2024-06-01 12:00)));
        assert_eq!(Timeframe::Months6.cutoff(now), Some(datetime!(2024-01-03 12:00)));
        assert_eq!(Timeframe::Year1.cutoff(now), Some(datetime!(2023-07-02 12:00)));
        assert_eq!(Timeframe::Lifetime.cutoff(now), None);
    }

    #[test]
    fn empty_artist_is_no_filter() {
        let q = Query::new("lifetime", datetime!(2024-07-01 12:00)).with_artist("");
        assert_eq!(q.artist(), None);
        assert_eq!(q.with_artist("X").artist(), Some("X"));
    }

    #[test]
    fn output_names() {
        assert_eq!("stats".parse(), Ok(OutputShape::Stats));
        assert_eq!("trend".parse(), Ok(OutputShape::MonthlyTrend));
        assert_eq!("common_day_time".parse(), Ok(OutputShape::DayHourHeatmap));
        assert!("pie".parse::<OutputShape>().is_err());
    }
}
