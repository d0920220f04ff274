use serde::{
    ser::{
        SerializeMap,
        SerializeStruct,
    },
    Serialize,
    Serializer,
};
use time::Weekday;

/// Ordered `name -> count` list, serialized as a JSON object in ranking order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking(Vec<(String, u64)>);

impl Ranking {
    #[inline]
    pub fn entries(&self) -> &[(String, u64)] { &self.0 }

    #[inline]
    pub fn len(&self) -> usize { self.0.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn get(&self, name: &str) -> Option<u64> { self.0.iter().find(|(n, _)| n == name).map(|&(_, c)| c) }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.0.iter().map(|(n, _)| n.as_str()) }

    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ { self.0.iter().map(|&(_, c)| c) }
}

impl FromIterator<(String, u64)> for Ranking {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self { Self(iter.into_iter().collect()) }
}

impl Serialize for Ranking {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        self.0.iter().try_for_each(|(name, count)| map.serialize_entry(name, count))?;
        map.end()
    }
}


/// Aggregate statistics for one filtered history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub timeframe: String,
    pub artist_filter: Option<String>,
    pub amount_of_tracks: u64,
    pub total_listening_hours: f64,
    pub avg_track_duration: f64,
    pub top_10_artists: Ranking,
    pub top_10_songs: Ranking,
    pub most_skipped: Ranking,
    pub least_skipped: Ranking,
}

/// Total listening time for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyMinutes {
    /// `YYYY-MM`
    pub month: String,
    pub minutes_played: f64,
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

/// Play counts by day of week (Monday first) and hour of day
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayHourMatrix {
    counts: [[u64; 24]; 7],
}

impl DayHourMatrix {
    pub fn record(&mut self, day: Weekday, hour: u8) {
        if let Some(cell) = self.counts[day.number_days_from_monday() as usize].get_mut(hour as usize) {
            *cell += 1;
        }
    }

    pub fn get(&self, day: Weekday, hour: u8) -> u64 {
        self.counts[day.number_days_from_monday() as usize].get(hour as usize).copied().unwrap_or_default()
    }

    #[inline]
    pub fn rows(&self) -> &[[u64; 24]; 7] { &self.counts }

    pub fn total(&self) -> u64 { self.counts.iter().flatten().sum() }
}

impl Serialize for DayHourMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let days: Vec<String> = WEEKDAYS.iter().map(ToString::to_string).collect();
        let hours: Vec<u8> = (0..24).collect();

        let mut state = serializer.serialize_struct("DayHourMatrix", 3)?;
        state.serialize_field("days", &days)?;
        state.serialize_field("hours", &hours)?;
        state.serialize_field("counts", &self.counts)?;
        state.end()
    }
}

/// Result of a pipeline run, shaped by [`crate::OutputShape`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Analysis {
    Stats(StatsReport),
    Trend(Vec<MonthlyMinutes>),
    Heatmap(DayHourMatrix),
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ranking_keeps_order_when_serialized() {
        let ranking: Ranking = [("b".to_owned(), 5), ("a".to_owned(), 2)].into_iter().collect();
        let out = serde_json::to_string(&ranking).unwrap();
        assert_eq!(out, r#"{"b":5,"a":2}"#);
        assert_eq!(ranking.get("a"), Some(2));
        assert_eq!(ranking.get("c"), None);
    }

    #[test]
    fn matrix_rows_are_monday_first() {
        let mut matrix = DayHourMatrix::default();
        matrix.record(Weekday::Monday, 0);
        matrix.record(Weekday::Sunday, 23);
        matrix.record(Weekday::Sunday, 23);

        assert_eq!(matrix.rows()[0][0], 1);
        assert_eq!(matrix.rows()[6][23], 2);
        assert_eq!(matrix.get(Weekday::Sunday, 23), 2);
        assert_eq!(matrix.total(), 3);

        let value = serde_json::to_value(&matrix).unwrap();
        assert_eq!(value["days"][0], json!("Monday"));
        assert_eq!(value["days"][6], json!("Sunday"));
        assert_eq!(value["hours"].as_array().map(Vec::len), Some(24));
        assert_eq!(value["counts"][6][23], json!(2));
    }

    #[test]
    fn report_field_order() {
        let report = StatsReport {
            timeframe: "lifetime".to_owned(),
            artist_filter: None,
            amount_of_tracks: 1,
            total_listening_hours: 0.06,
            avg_track_duration: 3.33,
            top_10_artists: Ranking::default(),
            top_10_songs: Ranking::default(),
            most_skipped: Ranking::default(),
            least_skipped: Ranking::default(),
        };
        let out = serde_json::to_string(&report).unwrap();
        assert!(out.starts_with(r#"{"timeframe":"lifetime","artist_filter":null,"amount_of_tracks":1"#));
        assert!(out.ends_with(r#""most_skipped":{},"least_skipped":{}}"#));
    }
}
