use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::ui::layout::put;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuLayout {
    /// Items on one row, each starting `spacing` columns after the previous.
    Horizontal { spacing: u16 },
    /// One item per row.
    Vertical,
}

#[derive(Clone, Debug)]
pub struct Menu {
    pub items: Vec<&'static str>,
    pub selected: usize,
    pub layout: MenuLayout,
}

impl Menu {
    pub fn new(items: &[&'static str], layout: MenuLayout) -> Self {
        Self {
            items: items.to_vec(),
            selected: 0,
            layout,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }
}

/// Draws a [`Menu`] with its top-left item at `area`'s origin.
pub struct MenuWidget<'a> {
    menu: &'a Menu,
    theme: &'a Theme,
}

impl<'a> MenuWidget<'a> {
    pub fn new(menu: &'a Menu, theme: &'a Theme) -> Self {
        Self { menu, theme }
    }
}

impl Widget for MenuWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let base = Style::default().fg(self.theme.colors.fg());
        for (i, item) in self.menu.items.iter().enumerate() {
            let (col, row) = match self.menu.layout {
                MenuLayout::Horizontal { spacing } => (i as u16 * spacing, 0),
                MenuLayout::Vertical => (0, i as u16),
            };
            let style = if i == self.menu.selected {
                base.add_modifier(Modifier::REVERSED)
            } else {
                base
            };
            put(buf, area, col, row, item, style);
        }
    }
}
