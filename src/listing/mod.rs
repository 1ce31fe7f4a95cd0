mod listing;
mod selectors;

pub use listing::{page_url, ListingPage};
pub use selectors::ListingSelectors;
