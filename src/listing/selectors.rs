#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
/// CSS selectors used to read a listing page.
///
/// The defaults match the Plaza Vea showcase markup.
pub struct ListingSelectors {
    /// One match per product card.
    pub item: String,
    /// Sale price, relative to the card.
    pub current_price: String,
    /// Crossed-out price, relative to the card.
    pub old_price: String,
    /// Store-card price, relative to the card.
    pub special_price: String,
    /// Anchor carrying the product link.
    pub link: String,
    /// Product photo.
    pub image: String,
    /// Attributes of the photo tried in order; lazy loaders fill the later ones.
    pub image_attrs: Vec<String>,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            item: "div.HA.Showcase.Showcase--non-food.ga-product-item".into(),
            current_price: ".Showcase__salePrice .price".into(),
            old_price: ".Showcase__oldPrice .price".into(),
            special_price: ".Showcase__ohPrice .price".into(),
            link: ".Showcase__link".into(),
            image: ".Showcase__photo img".into(),
            image_attrs: vec!["src".into(), "data-src".into(), "data-lazy".into()],
        }
    }
}
