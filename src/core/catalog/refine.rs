//! Client-side narrowing and sort, applied after the server call.

use std::cmp::Ordering;

use super::filters::{FilterInputs, SortOrder};
use super::types::Tour;

/// Narrow `items` by text, destination and slot range, then sort.
///
/// Runs regardless of which server mode produced `items`.
pub fn refine(items: Vec<Tour>, inputs: &FilterInputs) -> Vec<Tour> {
    let text = inputs.search_text.trim().to_lowercase();
    let destination = inputs.destination.trim().to_lowercase();

    let mut kept: Vec<Tour> = items
        .into_iter()
        .filter(|tour| matches_text(tour, &text))
        .filter(|tour| destination.is_empty() || tour.destination.to_lowercase().contains(&destination))
        .filter(|tour| within_slots(tour, inputs.min_slots, inputs.max_slots))
        .collect();

    if let Some(order) = inputs.sort {
        sort_tours(&mut kept, order);
    }
    kept
}

/// Stable sort: ties keep their incoming order.
pub fn sort_tours(tours: &mut [Tour], order: SortOrder) {
    tours.sort_by(|a, b| compare(a, b, order));
}

fn compare(a: &Tour, b: &Tour, order: SortOrder) -> Ordering {
    match order {
        SortOrder::PriceAsc => a.price.total_cmp(&b.price),
        SortOrder::PriceDesc => b.price.total_cmp(&a.price),
        SortOrder::RatingDesc => b.rating.total_cmp(&a.rating),
    }
}

fn matches_text(tour: &Tour, needle: &str) -> bool {
    needle.is_empty()
        || tour.name.to_lowercase().contains(needle)
        || tour.destination.to_lowercase().contains(needle)
}

fn within_slots(tour: &Tour, min: Option<u32>, max: Option<u32>) -> bool {
    min.map_or(true, |min| tour.available_slots >= min)
        && max.map_or(true, |max| tour.available_slots <= max)
}
