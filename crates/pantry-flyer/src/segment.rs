use std::sync::LazyLock;

use pantry_core::FlyerItem;
use regex::Regex;

/// A run of name characters directly followed by a `$d.dd` price.
static ITEM_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z\s&-]+)\$(\d+\.\d{2})").expect("valid item/price regex")
});

/// Pull `name $price` pairs out of OCR text.
///
/// This is a heuristic: anything that is not a letter, whitespace, `&` or
/// `-` ends a name, so "Milk 2L $3.49" yields an item called "L".
pub fn extract_items(text: &str) -> Vec<FlyerItem> {
    ITEM_PRICE
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
            if !name.chars().any(|c| c.is_ascii_alphabetic()) {
                return None;
            }
            let price = caps[2].parse().ok()?;
            Some(FlyerItem { name, price })
        })
        .collect()
}
