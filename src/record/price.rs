/// Normalizes a displayed price into a plain decimal string.
///
/// Everything but ASCII digits, `,` and `.` is dropped, `.` is treated as a
/// thousands separator and removed, and `,` becomes the decimal point.
///
/// ```rust
/// use plazavea_scraper::clean_price;
///
/// assert_eq!(clean_price("S/ 1.299,90"), "1299.90");
/// assert_eq!(clean_price(""), "");
/// ```
pub fn clean_price(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}
