mod extract;
mod price;
mod product;

pub use extract::{first_attr, safe_attr, safe_text};
pub use price::clean_price;
pub use product::{stock_label, ProductRecord};
