//! Postal-code lookup and shipping estimates, both answered by the model.

mod estimate;
mod zip;

pub use estimate::{
    EstimateState, FALLBACK_CURRENCY, FALLBACK_SHIPPING_COST, ShippingEstimator, ShippingQuote,
    format_money,
};
pub use zip::{
    DEFAULT_ZIP_DEBOUNCE, Location, MAX_CANDIDATES, MIN_QUERY_LEN, ZipLookup, lookup_locations,
};
