#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Debug, Clone, PartialEq, Eq)]
/// One product scraped from a listing page.
///
/// Every field is kept as text; a field that could not be found is an
/// empty string.
pub struct ProductRecord {
    /// Product name, from `data-ga-name`.
    #[cfg_attr(feature = "serde", serde(rename = "Name"))]
    pub name: String,
    /// Brand, from `data-ga-brand`.
    #[cfg_attr(feature = "serde", serde(rename = "Brand"))]
    pub brand: String,
    /// Sale price, normalized with [`clean_price`](crate::clean_price).
    #[cfg_attr(feature = "serde", serde(rename = "CurrentPrice"))]
    pub current_price: String,
    /// Crossed-out list price.
    #[cfg_attr(feature = "serde", serde(rename = "OldPrice"))]
    pub old_price: String,
    /// Price with the store card.
    #[cfg_attr(feature = "serde", serde(rename = "SpecialPrice"))]
    pub special_price: String,
    #[cfg_attr(feature = "serde", serde(rename = "SKU"))]
    pub sku: String,
    #[cfg_attr(feature = "serde", serde(rename = "Category"))]
    pub category: String,
    /// Absolute link to the product page.
    #[cfg_attr(feature = "serde", serde(rename = "Link"))]
    pub link: String,
    /// `"Yes"` or `"No"`, see [`stock_label`].
    #[cfg_attr(feature = "serde", serde(rename = "InStock"))]
    pub in_stock: String,
    #[cfg_attr(feature = "serde", serde(rename = "ImageURL"))]
    pub image_url: String,
}

impl ProductRecord {
    /// Column names of the exported file, in order.
    pub const HEADER: [&'static str; 10] = [
        "Name",
        "Brand",
        "CurrentPrice",
        "OldPrice",
        "SpecialPrice",
        "SKU",
        "Category",
        "Link",
        "InStock",
        "ImageURL",
    ];

    /// Field values in [`ProductRecord::HEADER`] order.
    pub fn to_row(&self) -> [&str; 10] {
        [
            &self.name,
            &self.brand,
            &self.current_price,
            &self.old_price,
            &self.special_price,
            &self.sku,
            &self.category,
            &self.link,
            &self.in_stock,
            &self.image_url,
        ]
    }
}

/// Maps the listing's `data-stock` attribute to the exported label.
pub fn stock_label(flag: Option<&str>) -> &'static str {
    if flag == Some("true") {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_follows_header_order() {
        let record = ProductRecord {
            name: "TV 55".into(),
            sku: "123".into(),
            image_url: "https://img".into(),
            ..Default::default()
        };
        let row = record.to_row();
        assert_eq!(row.len(), ProductRecord::HEADER.len());
        assert_eq!(row[0], "TV 55");
        assert_eq!(row[5], "123");
        assert_eq!(row[9], "https://img");
    }

    #[test]
    fn only_literal_true_is_in_stock() {
        assert_eq!(stock_label(Some("true")), "Yes");
        assert_eq!(stock_label(Some("TRUE")), "No");
        assert_eq!(stock_label(Some("false")), "No");
        assert_eq!(stock_label(None), "No");
    }
}
