use ratatui::style::Style;
use ratatui::text::Span;

use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Pad `spans` with `style` so the line fills `width` cells
pub(super) fn pad_to_width(spans: &mut Vec<Span<'_>>, width: usize, style: Style) {
    let used = spans_width(spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
}

/// Spans for an editable field of `width` cells with a block cursor.
///
/// The field scrolls horizontally so the cursor is always on screen.
pub(super) fn cursor_field_spans(
    text: &str,
    cursor: usize,
    width: usize,
    text_style: Style,
    cursor_style: Style,
) -> Vec<Span<'static>> {
    let cursor = cursor.min(text.len());
    let start = unicode::scroll_start_for_cursor(text, cursor, width);
    let before = &text[start..cursor];
    let after_budget = width.saturating_sub(unicode::display_width(before) + 1);
    let after = unicode::truncate_to_width(&text[cursor..], after_budget);

    vec![
        Span::styled(before.to_string(), text_style),
        Span::styled("\u{258C}", cursor_style), // ▌ cursor
        Span::styled(after, text_style),
    ]
}
