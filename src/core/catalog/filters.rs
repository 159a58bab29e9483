//! Filter inputs and server-side query resolution.
//!
//! Four server-side modes exist and are never combined in one request. When
//! several preconditions hold at once, the first in this order wins:
//!
//! 1. `DateRange`    - both dates set
//! 2. `Period`       - a minimum or maximum duration set
//! 3. `PriceSegment` - a minimum or maximum price set
//! 4. `TextSearch`   - non-blank search text
//! 5. `Listing`      - nothing set

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default page size when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Client-side sort applied after narrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

/// Pagination carried by every server query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Raw search form state.
///
/// Use the `set_*` methods to activate a server-side mode: each one clears
/// the inputs of the other two numeric/date modes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterInputs {
    pub search_text: String,
    pub destination: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub min_days: Option<u32>,
    pub max_days: Option<u32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_slots: Option<u32>,
    pub max_slots: Option<u32>,
    pub sort: Option<SortOrder>,
    pub page: Page,
}

impl FilterInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.clear_period();
        self.clear_price_segment();
        self.date_from = from;
        self.date_to = to;
    }

    pub fn set_period(&mut self, min_days: Option<u32>, max_days: Option<u32>) {
        self.clear_date_range();
        self.clear_price_segment();
        self.min_days = min_days;
        self.max_days = max_days;
    }

    pub fn set_price_segment(&mut self, min_price: Option<f64>, max_price: Option<f64>) {
        self.clear_date_range();
        self.clear_period();
        self.min_price = min_price;
        self.max_price = max_price;
    }

    /// Reset every filter but keep the page size.
    pub fn clear(&mut self) {
        let limit = self.page.limit;
        *self = Self::default();
        self.page.limit = limit;
    }

    fn clear_date_range(&mut self) {
        self.date_from = None;
        self.date_to = None;
    }

    fn clear_period(&mut self) {
        self.min_days = None;
        self.max_days = None;
    }

    fn clear_price_segment(&mut self) {
        self.min_price = None;
        self.max_price = None;
    }
}

/// Exactly one server call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FilterQuery {
    DateRange {
        from: NaiveDate,
        to: NaiveDate,
        page: Page,
    },
    Period {
        min_days: Option<u32>,
        max_days: Option<u32>,
        page: Page,
    },
    PriceSegment {
        min_price: Option<f64>,
        max_price: Option<f64>,
        page: Page,
    },
    TextSearch {
        keyword: String,
        page: Page,
    },
    Listing {
        page: Page,
    },
}

impl FilterQuery {
    pub fn page(&self) -> Page {
        match self {
            Self::DateRange { page, .. }
            | Self::Period { page, .. }
            | Self::PriceSegment { page, .. }
            | Self::TextSearch { page, .. }
            | Self::Listing { page } => *page,
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self {
            Self::DateRange { .. } => "date_range",
            Self::Period { .. } => "period",
            Self::PriceSegment { .. } => "price_segment",
            Self::TextSearch { .. } => "text_search",
            Self::Listing { .. } => "listing",
        }
    }
}

/// Pick the single server query for `inputs`. First satisfied mode wins.
pub fn resolve(inputs: &FilterInputs) -> FilterQuery {
    let page = inputs.page;

    if let (Some(from), Some(to)) = (inputs.date_from, inputs.date_to) {
        return FilterQuery::DateRange { from, to, page };
    }

    if inputs.min_days.is_some() || inputs.max_days.is_some() {
        return FilterQuery::Period {
            min_days: inputs.min_days,
            max_days: inputs.max_days,
            page,
        };
    }

    if inputs.min_price.is_some() || inputs.max_price.is_some() {
        return FilterQuery::PriceSegment {
            min_price: inputs.min_price,
            max_price: inputs.max_price,
            page,
        };
    }

    let keyword = inputs.search_text.trim();
    if !keyword.is_empty() {
        return FilterQuery::TextSearch {
            keyword: keyword.to_string(),
            page,
        };
    }

    FilterQuery::Listing { page }
}
