use super::*;
use time::macros::date;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    Warm,
    Cool,
}

impl Choice for Tone {
    const ALL: &'static [Self] = &[Self::Warm, Self::Cool];

    fn as_str(self) -> &'static str {
        match self {
            Self::Warm => "WARM",
            Self::Cool => "COOL",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Warm => "Warm",
            Self::Cool => "Cool",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Key {
    Name,
    Day,
}

#[derive(Debug)]
struct Row {
    id: Uuid,
    name: String,
    note: String,
    tone: Tone,
    day: Date,
}

impl Record for Row {
    type SortKey = Key;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.note]
    }

    fn compare_by(&self, other: &Self, key: Key) -> Ordering {
        match key {
            Key::Name => self.name.cmp(&other.name),
            Key::Day => self.day.cmp(&other.day),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct RowFilters {
    tone: Facet<Tone>,
    days: DateRange,
}

impl FilterSet<Row> for RowFilters {
    fn matches(&self, row: &Row) -> bool {
        self.tone.matches(&row.tone) && self.days.contains(row.day)
    }
}

fn row(n: u128, name: &str, tone: Tone, day: Date) -> Row {
    Row { id: Uuid::from_u128(n), name: name.to_owned(), note: format!("note for {name}"), tone, day }
}

fn ids(view: &View<'_, Row>) -> Vec<u128> {
    view.matched.iter().map(|r| r.id.as_u128()).collect()
}

fn rows(count: u128) -> Vec<Row> {
    (0..count)
        .map(|n| {
            let tone = if n % 2 == 0 { Tone::Warm } else { Tone::Cool };
            let day = date!(2025 - 01 - 01) + time::Duration::days(i64::try_from(n % 10).unwrap_or(0));
            row(n, &format!("row-{n:03}"), tone, day)
        })
        .collect()
}

// =============================================================
// Search
// =============================================================

#[test]
fn empty_search_returns_everything() {
    let source = rows(5);
    for raw in ["", "   "] {
        let view = run(&source, &Search::new(raw), &(), None, Pagination::default());
        assert_eq!(view.filtered_count(), 5);
    }
}

#[test]
fn search_is_case_insensitive_across_fields() {
    let source = vec![row(1, "Alice", Tone::Warm, date!(2025 - 01 - 01)), row(2, "Bob", Tone::Cool, date!(2025 - 01 - 01))];
    let by_name = run(&source, &Search::new("ALI"), &(), None, Pagination::default());
    assert_eq!(by_name.matched.iter().map(|r| r.id).collect::<Vec<_>>(), vec![Uuid::from_u128(1)]);

    let by_note = run(&source, &Search::new("note for b"), &(), None, Pagination::default());
    assert_eq!(by_note.matched.len(), 1);
    assert_eq!(by_note.matched[0].name, "Bob");
}

// =============================================================
// Facets
// =============================================================

#[test]
fn facet_sentinel_and_unknown_values_disable_filter() {
    assert_eq!(Facet::<Tone>::parse("ALL"), Facet::All);
    assert_eq!(Facet::<Tone>::parse("all"), Facet::All);
    assert_eq!(Facet::<Tone>::parse("PURPLE"), Facet::All);
    assert_eq!(Facet::<Tone>::parse("cool"), Facet::Only(Tone::Cool));
    assert_eq!(Facet::Only(Tone::Warm).value(), "WARM");
    assert_eq!(Facet::<Tone>::All.value(), ALL_SENTINEL);
}

#[test]
fn facet_and_date_range_narrow_results() {
    let source = rows(20);
    let filters = RowFilters {
        tone: Facet::Only(Tone::Warm),
        days: DateRange::new(Some(date!(2025 - 01 - 03)), Some(date!(2025 - 01 - 05))),
    };
    let view = run(&source, &Search::default(), &filters, None, Pagination::default());
    assert!(view.filtered_count() <= view.total_count);
    assert!(view.matched.iter().all(|r| r.tone == Tone::Warm));
    assert!(
        view.matched
            .iter()
            .all(|r| r.day >= date!(2025 - 01 - 03) && r.day <= date!(2025 - 01 - 05))
    );
    // n in {2, 4, 12, 14}
    assert_eq!(view.filtered_count(), 4);
}

#[test]
fn open_date_range_bounds_are_unbounded() {
    let range = DateRange::new(None, Some(date!(2025 - 02 - 01)));
    assert!(range.contains(date!(1999 - 01 - 01)));
    assert!(range.contains(date!(2025 - 02 - 01)));
    assert!(!range.contains(date!(2025 - 02 - 02)));
    assert!(DateRange::default().contains(date!(2025 - 02 - 02)));
}

// =============================================================
// Sort
// =============================================================

#[test]
fn date_sort_desc_is_non_increasing_and_asc_non_decreasing() {
    let source = rows(30);
    let desc = run(&source, &Search::default(), &(), Some(SortSpec::desc(Key::Day)), Pagination::default());
    assert!(desc.matched.windows(2).all(|w| w[0].day >= w[1].day));

    let asc = run(&source, &Search::default(), &(), Some(SortSpec::asc(Key::Day)), Pagination::default());
    assert!(asc.matched.windows(2).all(|w| w[0].day <= w[1].day));
}

#[test]
fn sort_ties_keep_source_order_in_both_directions() {
    let same_day = date!(2025 - 03 - 01);
    let source = vec![
        row(1, "a", Tone::Warm, same_day),
        row(2, "b", Tone::Warm, same_day),
        row(3, "c", Tone::Warm, date!(2025 - 03 - 02)),
        row(4, "d", Tone::Warm, same_day),
    ];
    let asc = run(&source, &Search::default(), &(), Some(SortSpec::asc(Key::Day)), Pagination::default());
    assert_eq!(ids(&asc), vec![1, 2, 4, 3]);

    let desc = run(&source, &Search::default(), &(), Some(SortSpec::desc(Key::Day)), Pagination::default());
    assert_eq!(ids(&desc), vec![3, 1, 2, 4]);
}

// =============================================================
// Pagination
// =============================================================

#[test]
fn page_slice_matches_window_label() {
    let source = rows(30);
    let mut pagination = Pagination::default();
    pagination.set_page(3);
    let view = run(&source, &Search::default(), &(), None, pagination);
    assert_eq!(view.page().len(), 6);
    assert_eq!(view.window.label(), "Showing 25–30 of 30");
    assert_eq!(view.page()[0].name, "row-024");
}

#[test]
fn empty_result_reports_zero_window() {
    let source = rows(3);
    let view = run(&source, &Search::new("nothing matches"), &(), None, Pagination::default());
    assert!(view.page().is_empty());
    assert_eq!(view.window.label(), "Showing 0–0 of 0");
    assert_eq!(view.window.total_pages, 1);
}

#[test]
fn page_past_the_end_clamps_to_last_page() {
    let mut pagination = Pagination::default();
    pagination.set_page(99);
    let window = pagination.window(13);
    assert_eq!(window.page, 2);
    assert_eq!(window.range(), 12..13);
}

#[test]
fn page_size_accepts_only_fixed_options() {
    let mut pagination = Pagination::default();
    pagination.set_page(4);
    assert!(!pagination.set_items_per_page(10));
    assert_eq!(pagination.items_per_page(), DEFAULT_PAGE_SIZE);
    assert_eq!(pagination.current_page(), 4);

    assert!(pagination.set_items_per_page(48));
    assert_eq!(pagination.items_per_page(), 48);
    assert_eq!(pagination.current_page(), 1);
}

#[test]
fn window_links_elide_distant_pages() {
    let mut pagination = Pagination::default();
    pagination.set_page(5);
    let window = pagination.window(12 * 10);
    assert_eq!(
        window.links(1),
        vec![
            PageLink::Page(1),
            PageLink::Gap,
            PageLink::Page(4),
            PageLink::Page(5),
            PageLink::Page(6),
            PageLink::Gap,
            PageLink::Page(10),
        ]
    );
    assert!(window.has_prev());
    assert!(window.has_next());
}

// =============================================================
// ViewState
// =============================================================

fn state_on_page_three() -> ViewState<RowFilters, Key> {
    let mut state = ViewState::new(Some(SortSpec::asc(Key::Name)));
    state.set_page(3);
    assert_eq!(state.pagination().current_page(), 3);
    state
}

#[test]
fn every_filter_change_resets_to_first_page() {
    let mut state = state_on_page_three();
    state.set_search("row");
    assert_eq!(state.pagination().current_page(), 1);

    let mut state = state_on_page_three();
    state.update_filters(|f| f.tone = Facet::Only(Tone::Cool));
    assert_eq!(state.pagination().current_page(), 1);

    let mut state = state_on_page_three();
    state.update_filters(|f| f.days = DateRange::new(Some(date!(2025 - 01 - 02)), None));
    assert_eq!(state.pagination().current_page(), 1);

    let mut state = state_on_page_three();
    state.toggle_sort(Key::Day);
    assert_eq!(state.pagination().current_page(), 1);

    let mut state = state_on_page_three();
    assert!(state.set_items_per_page(24));
    assert_eq!(state.pagination().current_page(), 1);
}

#[test]
fn toggle_sort_flips_same_column_and_restarts_new_column() {
    let mut state: ViewState<RowFilters, Key> = ViewState::new(Some(SortSpec::asc(Key::Name)));
    state.toggle_sort(Key::Name);
    assert_eq!(state.sort(), Some(SortSpec::desc(Key::Name)));
    state.toggle_sort(Key::Day);
    assert_eq!(state.sort(), Some(SortSpec::asc(Key::Day)));
}

#[test]
fn reset_restores_defaults() {
    let mut state: ViewState<RowFilters, Key> = ViewState::new(Some(SortSpec::desc(Key::Day)));
    state.set_search("x");
    state.update_filters(|f| f.tone = Facet::Only(Tone::Warm));
    state.toggle_sort(Key::Name);
    assert!(state.is_filtered());

    state.reset();
    assert!(!state.is_filtered());
    assert_eq!(state.sort(), Some(SortSpec::desc(Key::Day)));
}

#[test]
fn filtered_count_never_exceeds_total_for_any_combination() {
    let source = rows(40);
    let searches = ["", "row-01", "note", "zzz"];
    let tones = [Facet::All, Facet::Only(Tone::Warm), Facet::Only(Tone::Cool)];
    let sorts = [None, Some(SortSpec::asc(Key::Name)), Some(SortSpec::desc(Key::Day))];

    for search in searches {
        for tone in tones {
            for sort in sorts {
                for page in 1..=5 {
                    let mut state: ViewState<RowFilters, Key> = ViewState::new(sort);
                    state.set_search(search);
                    state.update_filters(|f| f.tone = tone);
                    state.set_page(page);
                    let view = state.view(&source);
                    assert!(view.filtered_count() <= view.total_count);
                    assert_eq!(view.window.total, view.filtered_count());
                    assert_eq!(view.page().len(), view.window.len);
                }
            }
        }
    }
}
