// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Multi-predicate search over lectures and events.

use serde::{Deserialize, Serialize};

use crate::event::EventRecord;
use crate::lecture::LectureRecord;
use crate::slot::{DaySchedule, TimeSlot, Weekday, ranges_intersect};

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// An item the search filters can inspect.
///
/// Optional fields return `None` when the item has no such field; a filter
/// that constrains a missing field rejects the item.
pub trait Searchable {
    /// Identifier, matched by the text query.
    fn id(&self) -> &str;

    /// Title, matched by the text query.
    fn title(&self) -> &str;

    /// Whether the item matches an already lowercased, non-empty query.
    fn matches_query(&self, query: &str) -> bool {
        self.title().to_lowercase().contains(query) || self.id().to_lowercase().contains(query)
    }

    /// School year.
    fn grade(&self) -> Option<u8> {
        None
    }

    /// Major.
    fn major(&self) -> Option<&str> {
        None
    }

    /// Credit string.
    fn credits(&self) -> Option<&str> {
        None
    }

    /// Day schedules, empty when the item has none.
    fn schedules(&self) -> Vec<DaySchedule> {
        Vec::new()
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn title(&self) -> &str {
        (**self).title()
    }

    fn matches_query(&self, query: &str) -> bool {
        (**self).matches_query(query)
    }

    fn grade(&self) -> Option<u8> {
        (**self).grade()
    }

    fn major(&self) -> Option<&str> {
        (**self).major()
    }

    fn credits(&self) -> Option<&str> {
        (**self).credits()
    }

    fn schedules(&self) -> Vec<DaySchedule> {
        (**self).schedules()
    }
}

impl Searchable for LectureRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn grade(&self) -> Option<u8> {
        Some(self.grade)
    }

    fn major(&self) -> Option<&str> {
        Some(&self.major)
    }

    fn credits(&self) -> Option<&str> {
        Some(&self.credits)
    }

    fn schedules(&self) -> Vec<DaySchedule> {
        LectureRecord::schedules(self)
    }
}

impl Searchable for EventRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn matches_query(&self, query: &str) -> bool {
        [&self.title, &self.id, &self.description, &self.location]
            .iter()
            .any(|field| field.to_lowercase().contains(query))
    }

    /// The weekday of the base date and the periods the event overlaps.
    fn schedules(&self) -> Vec<DaySchedule> {
        let slots =
            TimeSlot::all().filter(|s| s.start() < self.end_time && self.start_time < s.end());
        DaySchedule::new(self.date.weekday().into(), slots)
            .into_iter()
            .collect()
    }
}

/// Search filters; every empty field matches everything and fields combine with AND.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Case-insensitive substring of the title or the id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Accepted school years.
    pub grades: Vec<u8>,

    /// Accepted weekdays; any schedule on one of them matches.
    pub days: Vec<Weekday>,

    /// Accepted periods; any schedule containing one of them matches.
    pub times: Vec<TimeSlot>,

    /// Accepted majors.
    pub majors: Vec<String>,

    /// Credit count the credit string must start with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<u8>,
}

impl SearchOptions {
    /// Options pre-filled from a timetable cell.
    pub fn for_cell(day: Weekday, slot: TimeSlot) -> Self {
        Self {
            days: vec![day],
            times: vec![slot],
            ..Default::default()
        }
    }

    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self.query.as_deref().is_none_or(str::is_empty)
            && self.grades.is_empty()
            && self.days.is_empty()
            && self.times.is_empty()
            && self.majors.is_empty()
            && self.credits.is_none_or(|c| c == 0)
    }
}

/// Keeps the items matching every filter, in their original order.
pub fn filter<'a, T: Searchable>(items: &'a [T], options: &SearchOptions) -> Vec<&'a T> {
    let query = lowercase_query(options);
    items
        .iter()
        .filter(|item| matches(*item, query.as_deref(), options))
        .collect()
}

/// The first `page * page_size` items; pages start at 1.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let n = page.max(1).saturating_mul(page_size);
    items.get(..n).unwrap_or(items)
}

fn lowercase_query(options: &SearchOptions) -> Option<String> {
    options
        .query
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase)
}

fn matches<T: Searchable>(item: &T, query: Option<&str>, options: &SearchOptions) -> bool {
    if query.is_some_and(|q| !item.matches_query(q)) {
        return false;
    }

    if !options.grades.is_empty() && !item.grade().is_some_and(|g| options.grades.contains(&g)) {
        return false;
    }

    if !options.majors.is_empty()
        && !item
            .major()
            .is_some_and(|m| options.majors.iter().any(|a| a == m))
    {
        return false;
    }

    // zero credits means no credit filter
    if let Some(credits) = options.credits.filter(|&c| c > 0) {
        let prefix = credits.to_string();
        if !item.credits().is_some_and(|c| c.starts_with(&prefix)) {
            return false;
        }
    }

    if options.days.is_empty() && options.times.is_empty() {
        return true;
    }

    // parse once for both schedule filters
    let schedules = item.schedules();
    let day_ok =
        options.days.is_empty() || schedules.iter().any(|s| options.days.contains(&s.day));
    let time_ok = options.times.is_empty() || {
        let mut picked = options.times.clone();
        picked.sort_unstable();
        picked.dedup();
        schedules.iter().any(|s| ranges_intersect(s.range(), &picked))
    };
    day_ok && time_ok
}

/// A memoized search over an owned collection, with incremental paging.
#[derive(Debug, Clone)]
pub struct SearchSession<T> {
    items: Vec<T>,
    options: SearchOptions,
    results: Vec<usize>,
    page: usize,
    page_size: usize,
}

impl<T: Searchable> SearchSession<T> {
    /// Creates a session with no filters set.
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        let mut session = Self {
            items,
            options: SearchOptions::default(),
            results: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
        };
        session.recompute();
        session
    }

    /// Replaces the collection, keeping the options and resetting the page.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.page = 1;
        self.recompute();
    }

    /// Applies new options; returns whether they differed from the current ones.
    ///
    /// Equal options keep both the memoized result and the page.
    pub fn set_options(&mut self, options: SearchOptions) -> bool {
        if options == self.options {
            return false;
        }

        self.options = options;
        self.page = 1;
        self.recompute();
        true
    }

    /// Edits the current options in place, see [`SearchSession::set_options`].
    pub fn update(&mut self, f: impl FnOnce(&mut SearchOptions)) -> bool {
        let mut options = self.options.clone();
        f(&mut options);
        self.set_options(options)
    }

    /// Current options.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Number of matching items.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing matches.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Current page, starting at 1.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages; zero when nothing matches.
    pub fn last_page(&self) -> usize {
        self.results.len().div_ceil(self.page_size)
    }

    /// Advances one page, stopping at the last one, and returns the new page.
    pub fn next_page(&mut self) -> usize {
        self.page = (self.page + 1).min(self.last_page().max(1));
        self.page
    }

    /// Matching items up to the end of the current page.
    pub fn visible(&self) -> Vec<&T> {
        paginate(&self.results, self.page, self.page_size)
            .iter()
            .filter_map(|&i| self.items.get(i))
            .collect()
    }

    /// All matching items.
    pub fn results(&self) -> impl Iterator<Item = &T> {
        self.results.iter().filter_map(|&i| self.items.get(i))
    }

    /// Distinct majors over the whole collection, in first-seen order.
    pub fn majors(&self) -> Vec<&str> {
        let mut majors: Vec<&str> = Vec::new();
        for major in self.items.iter().filter_map(Searchable::major) {
            if !majors.contains(&major) {
                majors.push(major);
            }
        }
        majors
    }

    fn recompute(&mut self) {
        let query = lowercase_query(&self.options);
        self.results = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| matches(*item, query.as_deref(), &self.options))
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(matched = self.results.len(), total = self.items.len(), "search recomputed");
    }
}
