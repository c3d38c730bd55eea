use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::model::{BAR_WIDTH, filled_cells};
use crate::ui::layout::put;
use crate::ui::theme::Theme;

/// One-row text bar: `[=====-----] 50.00%`.
pub struct ProgressBar<'a> {
    pub ratio: f64,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(ratio: f64, theme: &'a Theme) -> Self {
        Self { ratio, theme }
    }

    pub fn percent_label(&self) -> String {
        format!("{:.2}%", self.ratio * 100.0)
    }

    pub fn text(&self) -> String {
        let filled = filled_cells(self.ratio);
        format!(
            "[{}{}] {}",
            "=".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            self.percent_label()
        )
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let filled = filled_cells(self.ratio);
        let plain = Style::default().fg(colors.fg());

        let mut col = 0;
        for (segment, style) in [
            ("[".to_string(), plain),
            ("=".repeat(filled), Style::default().fg(colors.bar_filled())),
            ("-".repeat(BAR_WIDTH - filled), Style::default().fg(colors.bar_empty())),
            (format!("] {}", self.percent_label()), plain),
        ] {
            put(buf, area, col, 0, &segment, style);
            col += segment.chars().count() as u16;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_for_partial_progress() {
        let theme = Theme::default();
        let bar = ProgressBar::new(0.5, &theme);
        assert_eq!(
            bar.text(),
            format!("[{}{}] 50.00%", "=".repeat(15), "-".repeat(15))
        );
    }

    #[test]
    fn text_for_default_goal() {
        let theme = Theme::default();
        let bar = ProgressBar::new(150.0 / 230.0, &theme);
        assert_eq!(
            bar.text(),
            format!("[{}{}] 65.22%", "=".repeat(19), "-".repeat(11))
        );
    }

    #[test]
    fn negative_ratio_shows_negative_percent_and_empty_bar() {
        let theme = Theme::default();
        let bar = ProgressBar::new(-0.1, &theme);
        assert_eq!(bar.text(), format!("[{}] -10.00%", "-".repeat(30)));
    }

    #[test]
    fn render_matches_text() {
        let theme = Theme::default();
        let bar = ProgressBar::new(1.0, &theme);
        let expected = bar.text();
        let area = Rect::new(0, 0, 45, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        let rendered: String = (0..expected.len() as u16)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert_eq!(rendered, expected);
    }
}
