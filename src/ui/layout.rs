use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

pub const PANEL_WIDTH: u16 = 45;
pub const PROGRESS_HEIGHT: u16 = 9;
pub const SETTINGS_HEIGHT: u16 = 14;

/// Fixed-size panel anchored at the top-left of `area`, clipped to it.
pub fn panel_rect(area: Rect, height: u16) -> Rect {
    Rect::new(area.x, area.y, PANEL_WIDTH, height).intersection(area)
}

/// Write `text` at panel-relative (`col`, `row`), dropping whatever falls outside `clip`.
pub fn put(buf: &mut Buffer, clip: Rect, col: u16, row: u16, text: &str, style: Style) -> u16 {
    let x = clip.x.saturating_add(col);
    let y = clip.y.saturating_add(row);
    if y >= clip.bottom() || x >= clip.right() {
        return x;
    }
    let max_width = (clip.right() - x) as usize;
    let (end_x, _) = buf.set_stringn(x, y, text, max_width, style);
    end_x
}

/// Draw the panel frame: `-` along the top and bottom edges between the
/// corners, `|` down both sides. Corners stay blank.
pub fn draw_box(buf: &mut Buffer, clip: Rect, width: u16, height: u16, style: Style) {
    for row in 0..height {
        for col in 0..width {
            let edge_row = row == 0 || row == height - 1;
            let edge_col = col == 0 || col == width - 1;
            let symbol = if edge_row {
                if edge_col {
                    continue;
                }
                "-"
            } else if edge_col {
                "|"
            } else {
                continue;
            };
            put(buf, clip, col, row, symbol, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn box_edges_and_blank_corners() {
        let area = Rect::new(0, 0, 6, 4);
        let mut buf = Buffer::empty(area);
        draw_box(&mut buf, area, 6, 4, Style::default());
        assert_eq!(row_text(&buf, 0), " ---- ");
        assert_eq!(row_text(&buf, 1), "|    |");
        assert_eq!(row_text(&buf, 2), "|    |");
        assert_eq!(row_text(&buf, 3), " ---- ");
    }

    #[test]
    fn box_larger_than_buffer_is_clipped() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        draw_box(&mut buf, area, PANEL_WIDTH, PROGRESS_HEIGHT, Style::default());
        assert_eq!(row_text(&buf, 0), " ---------");
        assert_eq!(row_text(&buf, 2), "|         ");
    }

    #[test]
    fn put_clips_at_right_edge() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        put(&mut buf, area, 2, 0, "abcdef", Style::default());
        assert_eq!(row_text(&buf, 0), "  abc");
        // Rows past the bottom are ignored rather than panicking.
        put(&mut buf, area, 0, 3, "zzz", Style::default());
    }

    #[test]
    fn panel_rect_shrinks_to_area() {
        assert_eq!(
            panel_rect(Rect::new(0, 0, 80, 24), PROGRESS_HEIGHT),
            Rect::new(0, 0, PANEL_WIDTH, PROGRESS_HEIGHT)
        );
        assert_eq!(
            panel_rect(Rect::new(0, 0, 30, 5), SETTINGS_HEIGHT),
            Rect::new(0, 0, 30, 5)
        );
    }
}
