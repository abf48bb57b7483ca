//! Client-side processing of a fetched price report: stable sort by price,
//! fixed-size pagination and the windowed page list for the pagination bar.

use crate::{FlowError, FlowResult};
use eolmadak_types::ResultItem;

/// Sort order for the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Cheapest first, by minimum price.
    #[default]
    PriceAsc,
    /// Most expensive first, by the price ceiling.
    PriceDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = FlowError;

    fn from_str(s: &str) -> FlowResult<Self> {
        match s {
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            other => Err(FlowError::InvalidConfig(format!(
                "unknown sort key '{other}' (expected price-asc or price-desc)"
            ))),
        }
    }
}

/// One page of processed results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPage {
    pub page_items: Vec<ResultItem>,
    pub total_pages: usize,
}

/// Sort and slice `items` for display.
///
/// The sort is stable: ties keep their arrival order, which preserves the
/// backend's (opaque) ranking among equally priced entries. Pages are
/// 1-based; the caller guards the page range on its prev/next controls, so
/// an out-of-range page here simply yields an empty slice.
pub fn process(
    items: &[ResultItem],
    sort_key: SortKey,
    page: usize,
    page_size: usize,
) -> ResultPage {
    let mut sorted = items.to_vec();
    match sort_key {
        SortKey::PriceAsc => sorted.sort_by_key(|item| item.min_price),
        SortKey::PriceDesc => sorted.sort_by_key(|item| std::cmp::Reverse(item.price_ceiling())),
    }

    let total_pages = sorted.len().div_ceil(page_size);
    let start = page.saturating_sub(1) * page_size;
    let page_items = if start < sorted.len() {
        let end = (start + page_size).min(sorted.len());
        sorted[start..end].to_vec()
    } else {
        Vec::new()
    };

    ResultPage {
        page_items,
        total_pages,
    }
}

/// Sort/page state over one fetched result list.
#[derive(Debug, Clone)]
pub struct Paginator {
    items: Vec<ResultItem>,
    sort_key: SortKey,
    page: usize,
    page_size: usize,
}

impl Paginator {
    pub fn new(items: Vec<ResultItem>, page_size: usize) -> Self {
        Self {
            items,
            sort_key: SortKey::default(),
            page: 1,
            page_size,
        }
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Change the sort order. A different key resets to page 1.
    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        if self.sort_key != sort_key {
            self.sort_key = sort_key;
            self.page = 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.page < self.total_pages() {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn go_to_page(&mut self, page: usize) {
        if (1..=self.total_pages()).contains(&page) {
            self.page = page;
        }
    }

    /// The currently visible page.
    pub fn page(&self) -> ResultPage {
        process(&self.items, self.sort_key, self.page, self.page_size)
    }
}

/// An entry in the rendered pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Page(usize),
    Ellipsis,
}

/// The windowed page list for the pagination bar.
///
/// All pages are shown while `total <= 5`. Beyond that: the first four
/// pages plus the last while the current page is near the start, the first
/// plus the last four near the end, and first + current±1 + last with
/// ellipses on both sides in the middle.
pub fn page_window(current: usize, total: usize) -> Vec<PageEntry> {
    use PageEntry::{Ellipsis, Page};

    if total <= 5 {
        return (1..=total).map(Page).collect();
    }

    if current <= 3 {
        let mut entries: Vec<PageEntry> = (1..=4).map(Page).collect();
        entries.push(Ellipsis);
        entries.push(Page(total));
        return entries;
    }

    if current >= total - 2 {
        let mut entries = vec![Page(1), Ellipsis];
        entries.extend((total - 3..=total).map(Page));
        return entries;
    }

    vec![
        Page(1),
        Ellipsis,
        Page(current - 1),
        Page(current),
        Page(current + 1),
        Ellipsis,
        Page(total),
    ]
}
