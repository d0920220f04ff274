use history_stats_core::PlayEvent;

/// Every normalized event of one archive, in arrival order
///
/// Aggregates read [`History::played`], skip detection reads [`History::raw`]. The admission
/// floor is never applied to the collection itself, so both views stay available after
/// filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    events: Vec<PlayEvent>,
}

impl History {
    /// Concatenates per-file record lists, file order first, then in-file order
    pub fn normalize<I, R>(files: I) -> Self
    where
        I: IntoIterator<Item = Vec<R>>,
        R: Into<PlayEvent>,
    {
        files.into_iter().flatten().map(Into::<PlayEvent>::into).collect()
    }

    #[inline]
    pub fn events(&self) -> &[PlayEvent] { &self.events }

    #[inline]
    pub fn len(&self) -> usize { self.events.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.events.is_empty() }

    /// Events long enough to count as listens
    pub fn played(&self) -> PlayedView<'_> {
        PlayedView {
            events: self.events.iter().filter(|ev| ev.is_played()).collect(),
        }
    }

    /// All events, including the ones below the admission floor
    #[inline]
    pub fn raw(&self) -> RawView<'_> { RawView { events: &self.events } }

    pub fn retain<F>(mut self, f: F) -> Self
    where
        F: FnMut(&PlayEvent) -> bool,
    {
        self.events.retain(f);
        self
    }
}

impl FromIterator<PlayEvent> for History {
    fn from_iter<T: IntoIterator<Item = PlayEvent>>(iter: T) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

/// Events with at least [`history_stats_core::MIN_PLAYED_MINUTES`] played
#[derive(Debug, Clone)]
pub struct PlayedView<'h> {
    events: Vec<&'h PlayEvent>,
}

impl<'h> PlayedView<'h> {
    pub fn iter(&self) -> impl Iterator<Item = &'h PlayEvent> + '_ { self.events.iter().copied() }

    #[inline]
    pub fn len(&self) -> usize { self.events.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.events.is_empty() }
}

/// Unfloored events, only used for skip detection
#[derive(Debug, Clone, Copy)]
pub struct RawView<'h> {
    events: &'h [PlayEvent],
}

impl<'h> RawView<'h> {
    pub fn iter(&self) -> impl Iterator<Item = &'h PlayEvent> { self.events.iter() }

    #[inline]
    pub fn len(&self) -> usize { self.events.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.events.is_empty() }
}


#[cfg(test)]
mod tests {
    use history_stats_core::MIN_PLAYED_MINUTES;
    use proptest::prelude::*;

    use super::*;

    fn ev(ms: u64) -> PlayEvent { PlayEvent::new(None, ms, None, None) }

    #[test]
    fn keeps_arrival_order() {
        let history = History::normalize(vec![vec![ev(1), ev(2)], vec![], vec![ev(3)]]);
        let ms: Vec<f64> = history.events().iter().map(|e| e.minutes_played * 60_000.0).collect();
        assert_eq!(ms.len(), 3);
        assert!(ms.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn views_split_on_floor() {
        let history = History::normalize(vec![vec![ev(200_000), ev(5_000), ev(15_000), ev(14_999)]]);
        assert_eq!(history.raw().len(), 4);
        assert_eq!(history.played().len(), 2);
    }

    #[test]
    fn empty_played_view_is_not_an_error() {
        let history = History::normalize(vec![vec![ev(0), ev(1_000)]]);
        assert!(!history.is_empty());
        assert!(history.played().is_empty());
    }

    proptest! {
        #[test]
        fn played_view_respects_floor(files in prop::collection::vec(prop::collection::vec(0u64..400_000, 0..20), 0..5)) {
            let total: usize = files.iter().map(Vec::len).sum();
            let history = History::normalize(files.into_iter().map(|f| f.into_iter().map(ev).collect::<Vec<_>>()));
            let played = history.played();

            prop_assert_eq!(history.raw().len(), total);
            prop_assert!(played.len() <= total);
            prop_assert!(played.iter().all(|e| e.minutes_played >= MIN_PLAYED_MINUTES));
        }
    }
}
