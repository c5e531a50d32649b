//! Document title selection.

use crate::model::TextSpan;

/// Pick the title from the spans of one page.
///
/// Returns the text, as extracted, of the first span with the strictly
/// largest font size, scanning in document order. Blank spans are ignored; a
/// page without text yields an empty string.
pub fn select_title(spans: &[TextSpan]) -> String {
    let mut max_size = 0.0_f32;
    let mut title = "";

    for span in spans {
        if !span.is_blank() && span.font_size > max_size {
            max_size = span.font_size;
            title = &span.text;
        }
    }

    title.to_string()
}
