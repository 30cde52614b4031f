//! Placeholder product imagery.

/// Background colors keyed by category; anything else uses [`DEFAULT_COLOR`].
const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("smartphones", "4A90E2"),
    ("laptops", "50E3C2"),
    ("audio", "B8E986"),
    ("other", "BD10E0"),
];

const DEFAULT_COLOR: &str = "AAAAAA";
const DEFAULT_LABEL: &str = "Item";

/// Build a placeholder image URL for a product card.
///
/// The image is tinted by category and labelled with the first word of the
/// product name.
///
/// ```
/// use vitrine_core::placeholder_image_url;
///
/// assert_eq!(
///     placeholder_image_url("audio", "Studio Monitor"),
///     "https://via.placeholder.com/300x200/B8E986/FFFFFF?text=Studio"
/// );
/// ```
#[must_use]
pub fn placeholder_image_url(category: &str, name: &str) -> String {
    let color = CATEGORY_COLORS
        .iter()
        .find(|(key, _)| *key == category)
        .map_or(DEFAULT_COLOR, |(_, color)| *color);

    let label = name.split_whitespace().next().unwrap_or(DEFAULT_LABEL);

    format!(
        "https://via.placeholder.com/300x200/{color}/FFFFFF?text={}",
        urlencoding::encode(label)
    )
}
