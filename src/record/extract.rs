use scraper::{ElementRef, Selector};

/// Text of the first descendant of `element` matching `css`.
///
/// Returns an empty string when the selector is invalid or matches nothing.
/// Whitespace runs are collapsed the way a browser renders them.
pub fn safe_text(element: ElementRef, css: &str) -> String {
    let Ok(selector) = Selector::parse(css) else {
        return String::new();
    };
    element
        .select(&selector)
        .next()
        .map(|found| found.text().collect::<String>())
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

/// Value of attribute `name` on `element`, or an empty string.
pub fn safe_attr(element: ElementRef, name: &str) -> String {
    element.value().attr(name).unwrap_or_default().trim().into()
}

/// First non-empty value among `names` on `element`, tried in order.
pub fn first_attr<S: AsRef<str>>(element: ElementRef, names: &[S]) -> String {
    names
        .iter()
        .map(|name| safe_attr(element, name.as_ref()))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}
