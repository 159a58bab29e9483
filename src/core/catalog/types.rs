use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::gallery::RemoteUrl;

/// A bookable tour as returned by the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: String,
    pub name: String,
    pub destination: String,
    pub price: f64,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub available_slots: u32,
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub images: Vec<RemoteUrl>,
}

/// One page of catalog results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub items: Vec<Tour>,
    #[serde(default)]
    pub total: u64,
}
