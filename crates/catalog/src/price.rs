//! The "current price" rule.
//!
//! A price is current iff it has no expiry or its expiry is strictly after the
//! evaluation instant. A product may (by data error or by overlap during a
//! price change) have several current rows; exactly one is picked: the latest
//! `start_date`, then the highest `price_id`.

use chrono::{DateTime, Utc};

use coffeetek_core::ProductId;

use crate::model::Price;

/// Whether a price with the given expiry is current at `as_of`.
pub fn is_current(end_date: Option<DateTime<Utc>>, as_of: DateTime<Utc>) -> bool {
    match end_date {
        None => true,
        Some(end) => end > as_of,
    }
}

/// Pick the single current price of `product_id` out of `prices`.
pub fn select_current_price<'a, I>(
    prices: I,
    product_id: ProductId,
    as_of: DateTime<Utc>,
) -> Option<&'a Price>
where
    I: IntoIterator<Item = &'a Price>,
{
    prices
        .into_iter()
        .filter(|p| p.product_id == product_id && is_current(p.end_date, as_of))
        .max_by_key(|p| (p.start_date, p.price_id))
}
