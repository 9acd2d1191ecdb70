use ratatui::prelude::*;
use unicode_width::UnicodeWidthStr;

pub mod constellation_details;
pub mod keymap;
pub mod shower_details;
pub mod shower_status;
pub mod sky;
pub mod timeline;

/// Converts window coordinates to area coordinates.
#[must_use]
fn window_to_area(global: Position, area: Rect) -> Option<Position> {
    if !area.contains(global) {
        return None;
    }
    Some(Position::new(global.x - area.x, global.y - area.y))
}

/// Returns a rectangle of the given size centred in `area`, clipped to it.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Breaks `text` into lines no wider than `width` columns, at whitespace.
///
/// A word wider than `width` gets a line of its own.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.width() + 1 + word.width() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_to_area_is_relative() {
        let area = Rect::new(10, 5, 20, 10);
        assert_eq!(
            window_to_area(Position::new(12, 6), area),
            Some(Position::new(2, 1))
        );
        assert_eq!(window_to_area(Position::new(9, 6), area), None);
        assert_eq!(window_to_area(Position::new(30, 6), area), None);
    }

    #[test]
    fn centered_rect_is_clipped() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect(20, 4, area), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_rect(60, 20, area), Rect::new(0, 0, 40, 10));
    }

    #[test]
    fn wrap_text_breaks_at_whitespace() {
        assert_eq!(
            wrap_text("the ram with  the golden fleece", 12),
            ["the ram with", "the golden", "fleece"]
        );
        assert_eq!(wrap_text("Zubeneschamali is green", 8), ["Zubeneschamali", "is green"]);
        assert!(wrap_text("   ", 8).is_empty());
    }
}
