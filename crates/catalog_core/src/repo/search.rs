//! Search request/response values and the in-process search pipeline.
//!
//! # Responsibility
//! - Normalize loosely typed page requests into `SearchParams`.
//! - Provide filter, sort and paginate stages as free functions.
//!
//! # Invariants
//! - `page` and `per_page` are always >= 1.
//! - The filter stage never touches its input when no filter is set.
//! - Sorting is stable; direction reverses the comparison result only.
//! - Pagination never fails; out-of-range pages are empty.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Comparison used by the sort stage.
pub type Comparator<E> = fn(&E, &E) -> Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Case-insensitive parse; anything other than `desc` is `Asc`.
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Orients an ascending comparison result. `Equal` stays `Equal`.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Filter values that can be blank.
pub trait FilterValue: Send + Sync {
    fn is_blank(&self) -> bool;
}

impl FilterValue for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

/// Loosely typed page request, e.g. decoded from a query string.
///
/// `page` and `per_page` accept numbers, numeric strings or anything else;
/// invalid values fall back to defaults in [`SearchParams::from_input`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchInput {
    #[serde(default)]
    pub page: Option<Value>,
    #[serde(default)]
    pub per_page: Option<Value>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub sort_dir: Option<String>,
    #[serde(default)]
    pub filter: Option<String>,
}

/// Normalized page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams<F = String> {
    page: u32,
    per_page: u32,
    sort: Option<String>,
    sort_dir: SortDirection,
    filter: Option<F>,
}

impl<F> Default for SearchParams<F> {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            sort_dir: SortDirection::Asc,
            filter: None,
        }
    }
}

impl<F> SearchParams<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-positive values normalize to page 1.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = positive_or(page, DEFAULT_PAGE);
        self
    }

    /// Non-positive values normalize to 15.
    pub fn with_per_page(mut self, per_page: i64) -> Self {
        self.per_page = positive_or(per_page, DEFAULT_PER_PAGE);
        self
    }

    /// Blank field names clear the sort.
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        let sort = sort.into();
        self.sort = if sort.trim().is_empty() {
            None
        } else {
            Some(sort)
        };
        self
    }

    pub fn with_sort_dir(mut self, sort_dir: SortDirection) -> Self {
        self.sort_dir = sort_dir;
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> SortDirection {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&F> {
        self.filter.as_ref()
    }
}

impl<F: FilterValue> SearchParams<F> {
    /// Blank filters are stored as `None`.
    pub fn with_filter(mut self, filter: Option<F>) -> Self {
        self.filter = filter.filter(|value| !value.is_blank());
        self
    }
}

impl SearchParams<String> {
    /// Normalizes a loosely typed request.
    ///
    /// `default_per_page` replaces the built-in default when `per_page` is
    /// absent or invalid.
    pub fn from_input(input: SearchInput, default_per_page: u32) -> Self {
        let default_per_page = default_per_page.max(1);
        let mut params = Self {
            page: normalize_positive(input.page.as_ref(), DEFAULT_PAGE),
            per_page: normalize_positive(input.per_page.as_ref(), default_per_page),
            ..Self::default()
        };
        if let Some(sort) = input.sort {
            params = params.with_sort(sort);
        }
        if let Some(sort_dir) = input.sort_dir.as_deref() {
            params.sort_dir = SortDirection::parse_lenient(sort_dir);
        }
        params.with_filter(input.filter)
    }
}

/// One page of search output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult<E> {
    items: Vec<E>,
    total: usize,
    current_page: u32,
    per_page: u32,
    last_page: u32,
}

impl<E> SearchResult<E> {
    /// `last_page` is derived as `ceil(total / per_page)`.
    pub fn new(items: Vec<E>, total: usize, current_page: u32, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        let last_page = total.div_ceil(per_page as usize);
        Self {
            items,
            total,
            current_page,
            per_page,
            last_page: u32::try_from(last_page).unwrap_or(u32::MAX),
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn into_items(self) -> Vec<E> {
        self.items
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn last_page(&self) -> u32 {
        self.last_page
    }

    /// Converts every item while keeping pagination metadata.
    pub fn map<T>(self, f: impl FnMut(E) -> T) -> SearchResult<T> {
        SearchResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            per_page: self.per_page,
            last_page: self.last_page,
        }
    }
}

/// Keeps items accepted by `predicate`, preserving their order.
///
/// With no filter the input is returned as-is and `predicate` is never
/// called.
pub fn apply_filter<E, F: ?Sized>(
    items: Vec<E>,
    filter: Option<&F>,
    predicate: impl Fn(&E, &F) -> bool,
) -> Vec<E> {
    let Some(filter) = filter else {
        return items;
    };
    items
        .into_iter()
        .filter(|item| predicate(item, filter))
        .collect()
}

/// Stable sort by an ascending comparator oriented by `direction`.
pub fn apply_sort<E>(
    mut items: Vec<E>,
    compare: impl Fn(&E, &E) -> Ordering,
    direction: SortDirection,
) -> Vec<E> {
    items.sort_by(|a, b| direction.apply(compare(a, b)));
    items
}

/// Returns the `[ (page-1)*per_page, page*per_page )` slice.
pub fn apply_pagination<E>(items: Vec<E>, page: u32, per_page: u32) -> Vec<E> {
    let per_page = per_page.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(per_page);
    items.into_iter().skip(start).take(per_page).collect()
}

/// Picks the comparator for `sort` when it is allow-listed, else `fallback`.
pub fn resolve_sort<E>(
    sort: Option<&str>,
    direction: SortDirection,
    sortable_fields: &[&str],
    comparator: impl Fn(&str) -> Option<Comparator<E>>,
    fallback: (Comparator<E>, SortDirection),
) -> (Comparator<E>, SortDirection) {
    sort.filter(|field| sortable_fields.contains(field))
        .and_then(|field| comparator(field))
        .map_or(fallback, |compare| (compare, direction))
}

/// Reference text predicate.
///
/// Matches when `text` contains `filter` case-insensitively, or when `number`
/// equals the numeric value of `filter`.
pub fn text_or_number_matches(text: &str, number: Option<f64>, filter: &str) -> bool {
    if text.to_lowercase().contains(&filter.to_lowercase()) {
        return true;
    }
    match (number, filter.trim().parse::<f64>()) {
        (Some(number), Ok(parsed)) => number == parsed,
        _ => false,
    }
}

fn positive_or(value: i64, default: u32) -> u32 {
    if value <= 0 {
        return default;
    }
    u32::try_from(value).unwrap_or(default)
}

fn normalize_positive(value: Option<&Value>, default: u32) -> u32 {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(Value::Bool(true)) => Some(1.0),
        _ => None,
    };
    match parsed {
        Some(number) if number >= 1.0 && number.fract() == 0.0 && number <= f64::from(u32::MAX) => {
            number as u32
        }
        _ => default,
    }
}
