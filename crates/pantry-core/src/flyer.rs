use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A product and its advertised price, as read off a flyer page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyerItem {
    pub name: String,
    pub price: f64,
}

/// Flyer items keyed by store name.
pub type Groceries = BTreeMap<String, Vec<FlyerItem>>;
