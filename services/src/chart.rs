//! Data series for the chart renderers. Events without a timestamp are left out.

use std::collections::BTreeMap;

use history_stats_core::{
    DayHourMatrix,
    MonthlyMinutes,
};

use crate::PlayedView;

/// Minutes listened per calendar month, oldest first
pub fn monthly_trend(played: &PlayedView) -> Vec<MonthlyMinutes> {
    let mut months: BTreeMap<(i32, u8), f64> = BTreeMap::new();
    for ev in played.iter() {
        if let Some(ts) = ev.timestamp {
            *months.entry((ts.year(), ts.month() as u8)).or_default() += ev.minutes_played;
        }
    }

    months
        .into_iter()
        .map(|((year, month), minutes_played)| MonthlyMinutes {
            month: format!("{year:04}-{month:02}"),
            minutes_played,
        })
        .collect()
}

/// Listen counts per weekday and hour
pub fn day_hour_matrix(played: &PlayedView) -> DayHourMatrix {
    let mut matrix = DayHourMatrix::default();
    for ev in played.iter() {
        if let (Some(day), Some(hour)) = (ev.day_of_week, ev.hour_of_day) {
            matrix.record(day, hour);
        }
    }
    matrix
}
