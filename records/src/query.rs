//! Collection view pipeline shared by every dashboard table.
//!
//! DESIGN
//! ======
//! Each table runs the same stages over an in-memory slice:
//! search → facet filters → sort → paginate. The stages are pure so page
//! state only has to remember *what* the user picked ([`ViewState`]) and
//! re-derive the visible rows on every render.
//!
//! Filter changes always send the user back to page 1; a page request past
//! the end is clamped to the last page rather than rendering an empty table.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// Sentinel select value that disables a facet filter.
pub const ALL_SENTINEL: &str = "ALL";

/// Page sizes offered by every table.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [12, 24, 48, 96];

pub const DEFAULT_PAGE_SIZE: usize = PAGE_SIZE_OPTIONS[0];

// =============================================================================
// RECORD TRAITS
// =============================================================================

/// A row that can flow through the view pipeline.
pub trait Record {
    /// Columns this record can be sorted by.
    type SortKey: Copy + PartialEq + fmt::Debug;

    fn id(&self) -> Uuid;

    /// Text fields consulted by free-text search.
    fn search_fields(&self) -> Vec<&str>;

    /// Ascending comparison on one sort column.
    fn compare_by(&self, other: &Self, key: Self::SortKey) -> Ordering;
}

/// The facet predicates a table applies after search.
pub trait FilterSet<T> {
    fn matches(&self, record: &T) -> bool;
}

impl<T> FilterSet<T> for () {
    fn matches(&self, _record: &T) -> bool {
        true
    }
}

/// A closed enum usable as a select option and facet value.
pub trait Choice: Copy + PartialEq + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// Stable wire value, e.g. `"PENDING"`.
    fn as_str(self) -> &'static str;

    /// Human label, e.g. `"Pending"`.
    fn label(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(raw))
    }
}

// =============================================================================
// PREDICATES
// =============================================================================

/// Case-insensitive substring search across a record's text fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Search {
    raw: String,
    needle: String,
}

impl Search {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self { raw: raw.to_owned(), needle: raw.trim().to_lowercase() }
    }

    /// The text as typed, for binding back into the input.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Empty or whitespace-only queries match everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    #[must_use]
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        if self.is_empty() {
            return true;
        }
        record
            .search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Equality filter on one enum column; `All` disables it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facet<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Facet<T> {
    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: Choice> Facet<T> {
    /// Parse a select value. The sentinel and anything unrecognised become `All`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case(ALL_SENTINEL) {
            return Self::All;
        }
        T::parse(raw).map_or(Self::All, Self::Only)
    }

    /// The select value representing this facet.
    #[must_use]
    pub fn value(&self) -> &'static str {
        match self {
            Self::All => ALL_SENTINEL,
            Self::Only(v) => v.as_str(),
        }
    }
}

/// Inclusive date range; either bound may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl DateRange {
    #[must_use]
    pub fn new(from: Option<Date>, to: Option<Date>) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

// =============================================================================
// SORT
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec<K> {
    pub key: K,
    pub order: SortOrder,
}

impl<K> SortSpec<K> {
    #[must_use]
    pub fn asc(key: K) -> Self {
        Self { key, order: SortOrder::Asc }
    }

    #[must_use]
    pub fn desc(key: K) -> Self {
        Self { key, order: SortOrder::Desc }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// 1-based page cursor plus page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    items_per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { current_page: 1, items_per_page: DEFAULT_PAGE_SIZE }
    }
}

impl Pagination {
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Change the page size. Sizes outside [`PAGE_SIZE_OPTIONS`] are ignored.
    /// Returns whether the size was accepted.
    pub fn set_items_per_page(&mut self, size: usize) -> bool {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return false;
        }
        self.items_per_page = size;
        self.current_page = 1;
        true
    }

    #[must_use]
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.items_per_page).max(1)
    }

    /// Resolve the slice of `total` rows shown on the current page.
    #[must_use]
    pub fn window(&self, total: usize) -> PageWindow {
        let total_pages = self.total_pages(total);
        let page = self.current_page.clamp(1, total_pages);
        let start = ((page - 1) * self.items_per_page).min(total);
        let len = self.items_per_page.min(total - start);
        PageWindow { page, total_pages, start, len, total }
    }
}

/// The resolved position of one page within a filtered collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub total_pages: usize,
    pub start: usize,
    pub len: usize,
    pub total: usize,
}

/// One button in a pager: a page number or an elided run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Gap,
}

impl PageWindow {
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// "Showing X–Y of N".
    #[must_use]
    pub fn label(&self) -> String {
        if self.len == 0 {
            return format!("Showing 0–0 of {}", self.total);
        }
        format!("Showing {}–{} of {}", self.start + 1, self.start + self.len, self.total)
    }

    /// Page buttons around the current page, always including the first and
    /// last page, with gaps where pages are skipped.
    #[must_use]
    pub fn links(&self, radius: usize) -> Vec<PageLink> {
        let lo = self.page.saturating_sub(radius).max(1);
        let hi = (self.page + radius).min(self.total_pages);
        let mut out = Vec::new();
        if lo > 1 {
            out.push(PageLink::Page(1));
            if lo > 2 {
                out.push(PageLink::Gap);
            }
        }
        out.extend((lo..=hi).map(PageLink::Page));
        if hi < self.total_pages {
            if hi + 1 < self.total_pages {
                out.push(PageLink::Gap);
            }
            out.push(PageLink::Page(self.total_pages));
        }
        out
    }
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Result of running the pipeline over one source collection.
#[derive(Debug)]
pub struct View<'a, T> {
    /// Every row that passed search and filters, in sorted order.
    pub matched: Vec<&'a T>,
    pub window: PageWindow,
    /// Size of the unfiltered source.
    pub total_count: usize,
}

impl<'a, T> View<'a, T> {
    /// Rows on the current page.
    #[must_use]
    pub fn page(&self) -> &[&'a T] {
        &self.matched[self.window.range()]
    }

    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.matched.len()
    }
}

/// Run search, filters, sort, and pagination over `source`.
///
/// Sorting is stable: rows that compare equal keep their source order in
/// both directions.
pub fn run<'a, T, F>(
    source: &'a [T],
    search: &Search,
    filters: &F,
    sort: Option<SortSpec<T::SortKey>>,
    pagination: Pagination,
) -> View<'a, T>
where
    T: Record,
    F: FilterSet<T>,
{
    let mut matched: Vec<&T> = source
        .iter()
        .filter(|record| search.matches(*record) && filters.matches(*record))
        .collect();

    if let Some(SortSpec { key, order }) = sort {
        match order {
            SortOrder::Asc => matched.sort_by(|a, b| a.compare_by(b, key)),
            SortOrder::Desc => matched.sort_by(|a, b| b.compare_by(a, key)),
        }
    }

    let window = pagination.window(matched.len());
    View { matched, window, total_count: source.len() }
}

// =============================================================================
// VIEW STATE
// =============================================================================

/// What the user has selected for one table: search text, facets, sort and
/// page. Every selection change except paging returns to page 1.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState<F, K> {
    search: Search,
    filters: F,
    default_sort: Option<SortSpec<K>>,
    sort: Option<SortSpec<K>>,
    pagination: Pagination,
}

impl<F: Default, K: Copy + PartialEq> ViewState<F, K> {
    #[must_use]
    pub fn new(sort: Option<SortSpec<K>>) -> Self {
        Self {
            search: Search::default(),
            filters: F::default(),
            default_sort: sort,
            sort,
            pagination: Pagination::default(),
        }
    }

    #[must_use]
    pub fn search(&self) -> &Search {
        &self.search
    }

    #[must_use]
    pub fn filters(&self) -> &F {
        &self.filters
    }

    #[must_use]
    pub fn sort(&self) -> Option<SortSpec<K>> {
        self.sort
    }

    #[must_use]
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn set_search(&mut self, raw: &str) {
        self.search = Search::new(raw);
        self.pagination.reset();
    }

    pub fn update_filters(&mut self, f: impl FnOnce(&mut F)) {
        f(&mut self.filters);
        self.pagination.reset();
    }

    pub fn set_sort(&mut self, sort: SortSpec<K>) {
        self.sort = Some(sort);
        self.pagination.reset();
    }

    /// Column-header click: same column flips direction, a new column starts
    /// ascending.
    pub fn toggle_sort(&mut self, key: K) {
        let next = match self.sort {
            Some(current) if current.key == key => SortSpec { key, order: current.order.flipped() },
            _ => SortSpec::asc(key),
        };
        self.set_sort(next);
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
    }

    pub fn set_items_per_page(&mut self, size: usize) -> bool {
        self.pagination.set_items_per_page(size)
    }

    /// Clear search and filters and restore the initial sort.
    pub fn reset(&mut self) {
        self.search = Search::default();
        self.filters = F::default();
        self.sort = self.default_sort;
        self.pagination.reset();
    }

    /// Whether any search text or facet narrows the table.
    #[must_use]
    pub fn is_filtered(&self) -> bool
    where
        F: PartialEq,
    {
        !self.search.is_empty() || self.filters != F::default()
    }

    #[must_use]
    pub fn view<'a, T>(&self, source: &'a [T]) -> View<'a, T>
    where
        T: Record<SortKey = K>,
        F: FilterSet<T>,
    {
        run(source, &self.search, &self.filters, self.sort, self.pagination)
    }
}
