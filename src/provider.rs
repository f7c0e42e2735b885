use std::iter::successors;
use thiserror::Error;
use time::{Date, Month};

/// Number of day entries handed to the host per timeline request.
pub(crate) const TIMELINE_DAYS: usize = 7;

/// One calendar day to render.  A civil date carries no time-of-day, so an
/// entry is start-of-day by construction.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct DayEntry {
    pub(crate) date: Date,
}

impl DayEntry {
    pub(crate) fn new(date: Date) -> DayEntry {
        DayEntry { date }
    }

    /// Builds an entry from explicit calendar components.  Nonexistent dates
    /// (month 13, February 29th of a common year) are an error; callers that
    /// want a fallback must pick one themselves.
    pub(crate) fn from_components(
        year: i32,
        month: u8,
        day: u8,
    ) -> Result<DayEntry, InvalidDateError> {
        let month = Month::try_from(month)?;
        let date = Date::from_calendar_date(year, month, day)?;
        Ok(DayEntry { date })
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("not a valid calendar date")]
pub(crate) struct InvalidDateError(#[from] time::error::ComponentRange);

/// When the host should throw the current timeline away and ask for a new
/// one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RefreshPolicy {
    /// Replace once the final entry has become current.
    AtEnd,
    /// Keep displaying the timeline as-is; used for pinned previews.
    Never,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Timeline {
    pub(crate) entries: Vec<DayEntry>,
    pub(crate) policy: RefreshPolicy,
}

impl Timeline {
    /// Index of the entry covering `date`: the latest entry not after it.
    pub(crate) fn position_of(&self, date: Date) -> Option<usize> {
        self.entries.iter().rposition(|e| e.date <= date)
    }

    pub(crate) fn last_date(&self) -> Option<Date> {
        self.entries.last().map(|e| e.date)
    }

    pub(crate) fn needs_refresh(&self, today: Date) -> bool {
        match self.policy {
            RefreshPolicy::AtEnd => match self.last_date() {
                Some(last) => today >= last,
                None => true,
            },
            RefreshPolicy::Never => false,
        }
    }
}

/// The three entry points a widget host drives.  All are pure functions of
/// the day the caller has resolved as "today".
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Provider;

impl Provider {
    /// Entry for low-fidelity slots shown before real content is ready.
    pub(crate) fn placeholder(today: Date) -> DayEntry {
        DayEntry::new(today)
    }

    /// Entry for a single immediate preview.
    pub(crate) fn snapshot(today: Date) -> DayEntry {
        DayEntry::new(today)
    }

    /// A week of consecutive day entries starting today.  Successor
    /// arithmetic is calendar-aware, so month, year, and leap boundaries
    /// come out right; only at the very end of the supported range does the
    /// sequence run short.
    pub(crate) fn timeline(today: Date) -> Timeline {
        let entries = successors(Some(today), |&d| d.next_day())
            .take(TIMELINE_DAYS)
            .map(DayEntry::new)
            .collect();
        Timeline {
            entries,
            policy: RefreshPolicy::AtEnd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn week_from_mid_january() {
        let tl = Provider::timeline(date!(2024 - 01 - 15));
        assert_eq!(tl.entries.len(), TIMELINE_DAYS);
        assert_eq!(tl.entries.first().map(|e| e.date), Some(date!(2024 - 01 - 15)));
        assert_eq!(tl.entries.get(1).map(|e| e.date), Some(date!(2024 - 01 - 16)));
        assert_eq!(tl.last_date(), Some(date!(2024 - 01 - 21)));
        assert_eq!(tl.policy, RefreshPolicy::AtEnd);
    }

    #[test]
    fn entries_step_by_exactly_one_day() {
        let tl = Provider::timeline(date!(2024 - 02 - 28));
        for (a, b) in std::iter::zip(&tl.entries, tl.entries.iter().skip(1)) {
            assert_eq!(Some(b.date), a.date.next_day());
        }
    }

    #[test]
    fn week_crosses_leap_february() {
        let tl = Provider::timeline(date!(2024 - 02 - 28));
        let dates = tl.entries.iter().map(|e| e.date).collect::<Vec<_>>();
        assert_eq!(
            dates,
            vec![
                date!(2024 - 02 - 28),
                date!(2024 - 02 - 29),
                date!(2024 - 03 - 01),
                date!(2024 - 03 - 02),
                date!(2024 - 03 - 03),
                date!(2024 - 03 - 04),
                date!(2024 - 03 - 05),
            ]
        );
    }

    #[test]
    fn week_crosses_year_end() {
        let tl = Provider::timeline(date!(2024 - 12 - 29));
        assert_eq!(tl.last_date(), Some(date!(2025 - 01 - 04)));
    }

    #[test]
    fn placeholder_and_snapshot_are_today() {
        let today = date!(2024 - 01 - 15);
        assert_eq!(Provider::placeholder(today).date, today);
        assert_eq!(Provider::snapshot(today).date, today);
    }

    #[test]
    fn components_must_name_a_real_date() {
        assert!(DayEntry::from_components(2023, 2, 29).is_err());
        assert!(DayEntry::from_components(2024, 13, 1).is_err());
        assert!(DayEntry::from_components(2024, 4, 31).is_err());
        assert_eq!(
            DayEntry::from_components(2024, 2, 29).map(|e| e.date),
            Ok(date!(2024 - 02 - 29))
        );
    }

    #[test]
    fn at_end_refresh_fires_on_the_final_day() {
        let tl = Provider::timeline(date!(2024 - 01 - 15));
        assert!(!tl.needs_refresh(date!(2024 - 01 - 20)));
        assert!(tl.needs_refresh(date!(2024 - 01 - 21)));
        assert!(tl.needs_refresh(date!(2024 - 02 - 01)));
    }

    #[test]
    fn never_policy_never_fires() {
        let tl = Timeline {
            entries: vec![DayEntry::new(date!(2024 - 01 - 15))],
            policy: RefreshPolicy::Never,
        };
        assert!(!tl.needs_refresh(date!(2024 - 01 - 16)));
        assert!(!tl.needs_refresh(date!(2030 - 01 - 01)));
    }

    #[test]
    fn position_tracks_the_covering_entry() {
        let tl = Provider::timeline(date!(2024 - 01 - 15));
        assert_eq!(tl.position_of(date!(2024 - 01 - 15)), Some(0));
        assert_eq!(tl.position_of(date!(2024 - 01 - 18)), Some(3));
        assert_eq!(tl.position_of(date!(2024 - 01 - 30)), Some(6));
        assert_eq!(tl.position_of(date!(2024 - 01 - 14)), None);
    }
}
