use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::{AppError, AppResult};

/// A single calendar entry as the backend stores it.
///
/// `time` is opaque here: the index never parses it, it only rides along for
/// display. `date` is the partition key and is always a plain calendar date,
/// never a UTC instant, so two events on the same local day always share a
/// bucket regardless of time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    pub title: String,
    pub time: String,
    pub location: String,
    pub date: NaiveDate,
}

/// Wire shape of an event as submitted by the creation form, `date` still a
/// raw string. Validated into an [`Event`] before anything touches the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventPayload {
    pub title: String,
    pub time: String,
    pub location: String,
    pub date: String,
}

impl EventPayload {
    /// Validate the payload into an [`Event`].
    ///
    /// Rejects an empty title and an unparseable date instead of letting a
    /// degenerate day-key slip into the index.
    pub fn into_event(self) -> AppResult<Event> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::new(
                "EVENT/TITLE_REQUIRED",
                "Event title is required",
            ));
        }

        let date: NaiveDate = self.date.trim().parse().map_err(|err| {
            AppError::new("EVENT/INVALID_DATE", "Event date is not a valid calendar date")
                .with_context("date", self.date.clone())
                .with_cause(AppError::from(err))
        })?;

        Ok(Event {
            title,
            time: self.time,
            location: self.location,
            date,
        })
    }
}

/// The month dropdown's selection: every month, or one calendar month
/// (0-indexed, January = 0) irrespective of year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthFilter {
    #[default]
    All,
    Month(u32),
}

impl MonthFilter {
    /// A single-month filter. `month` is 0-indexed, so valid values are 0-11.
    pub fn month(month: u32) -> AppResult<Self> {
        if month > 11 {
            return Err(AppError::new(
                "CALENDAR/MONTH_RANGE",
                "Month filter must be 0-11 or \"all\"",
            )
            .with_context("month", month.to_string()));
        }
        Ok(MonthFilter::Month(month))
    }

    fn matches(self, day: NaiveDate) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(month) => day.month0() == month,
        }
    }
}

impl FromStr for MonthFilter {
    type Err = AppError;

    /// Parses the raw dropdown value: `"all"` or `"0"` through `"11"`.
    fn from_str(value: &str) -> AppResult<Self> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        let month: u32 = trimmed.parse().map_err(|_| {
            AppError::new(
                "CALENDAR/MONTH_RANGE",
                "Month filter must be 0-11 or \"all\"",
            )
            .with_context("value", trimmed.to_string())
        })?;
        MonthFilter::month(month)
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => write!(f, "all"),
            MonthFilter::Month(month) => write!(f, "{month}"),
        }
    }
}

/// In-memory index of events bucketed by calendar day, with a derived view
/// restricted to the active month filter.
///
/// The index is value-like: `build` constructs it, and every mutation
/// consumes the index and returns the next one. The hosting view stores the
/// returned value and re-renders from it; nothing here is shared or locked.
///
/// The filtered view is always recomputed from `by_day` in full rather than
/// patched incrementally. At this data scale an O(n) rebuild per change is
/// the simpler contract to keep correct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventIndex {
    by_day: BTreeMap<NaiveDate, Vec<Event>>,
    active_month: MonthFilter,
    filtered: BTreeMap<NaiveDate, Vec<Event>>,
}

impl EventIndex {
    /// Build an index from a backend snapshot.
    ///
    /// Events land in their day's bucket in encounter order, i.e. the order
    /// the backend returned them. This intentionally differs from
    /// [`EventIndex::insert`], which prepends: a fresh fetch reads in
    /// retrieval order, while a user's own addition surfaces first.
    ///
    /// The filter starts at [`MonthFilter::All`], so the filtered view is
    /// initially identical to the full index.
    pub fn build(events: impl IntoIterator<Item = Event>) -> Self {
        let mut by_day: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();
        let mut total = 0usize;
        for event in events {
            by_day.entry(event.date).or_default().push(event);
            total += 1;
        }

        debug!(
            target: "clubledger",
            event = "event_index_built",
            events = total,
            days = by_day.len()
        );

        let filtered = by_day.clone();
        EventIndex {
            by_day,
            active_month: MonthFilter::All,
            filtered,
        }
    }

    /// Whether `day` has at least one event under the active filter.
    ///
    /// Reads the filtered view, not the full index, so calendar-cell markers
    /// always agree with the month dropdown.
    pub fn has_events(&self, day: NaiveDate) -> bool {
        self.filtered
            .get(&day)
            .is_some_and(|bucket| !bucket.is_empty())
    }

    /// The events on `day` under the active filter, or an empty slice.
    pub fn events_on(&self, day: NaiveDate) -> &[Event] {
        self.filtered
            .get(&day)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Add one event after the remote write was acknowledged.
    ///
    /// The event is prepended to its day's bucket so the user's own addition
    /// shows first; existing entries keep their relative order. The filtered
    /// view is rebuilt against the unchanged active filter.
    pub fn insert(mut self, event: Event) -> Self {
        debug!(
            target: "clubledger",
            event = "event_index_insert",
            day = %event.date,
            title = %event.title
        );
        self.by_day.entry(event.date).or_default().insert(0, event);
        self.refilter();
        self
    }

    /// Switch the active month filter and rebuild the filtered view.
    ///
    /// `by_day` is untouched, so the operation is idempotent and fully
    /// reversible by filtering back to [`MonthFilter::All`].
    pub fn set_month_filter(mut self, filter: MonthFilter) -> Self {
        self.active_month = filter;
        self.refilter();
        debug!(
            target: "clubledger",
            event = "event_index_filtered",
            filter = %self.active_month,
            days = self.filtered.len()
        );
        self
    }

    /// Day-keys of the filtered view, latest first, for the
    /// reverse-chronological "all events" listing.
    pub fn sorted_day_keys_descending(&self) -> Vec<NaiveDate> {
        self.filtered.keys().rev().copied().collect()
    }

    /// The currently active month filter.
    pub fn active_month(&self) -> MonthFilter {
        self.active_month
    }

    /// Total number of indexed events, ignoring the filter.
    pub fn event_count(&self) -> usize {
        self.by_day.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty()
    }

    fn refilter(&mut self) {
        self.filtered = self
            .by_day
            .iter()
            .filter(|(day, _)| self.active_month.matches(**day))
            .map(|(day, bucket)| (*day, bucket.clone()))
            .collect();
    }
}
