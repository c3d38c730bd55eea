use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::model::TrackerState;
use crate::ui::components::menu::{Menu, MenuWidget};
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::layout::{PANEL_WIDTH, PROGRESS_HEIGHT, draw_box, panel_rect, put};
use crate::ui::theme::Theme;

pub const TITLE: &str = "Simple Goal Tracker V1.1";

/// Main screen: the active goal, its bar and the horizontal menu.
pub struct ProgressView<'a> {
    state: &'a TrackerState,
    menu: &'a Menu,
    status: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> ProgressView<'a> {
    pub fn new(state: &'a TrackerState, menu: &'a Menu, theme: &'a Theme) -> Self {
        Self {
            state,
            menu,
            status: None,
            theme,
        }
    }

    pub fn status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }
}

impl Widget for ProgressView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let text = Style::default().fg(colors.fg());
        let panel = panel_rect(area, PROGRESS_HEIGHT);

        draw_box(
            buf,
            panel,
            PANEL_WIDTH,
            PROGRESS_HEIGHT,
            Style::default().fg(colors.border()),
        );

        let currency = &self.state.settings.currency;
        let goal = self.state.active_goal();

        put(
            buf,
            panel,
            2,
            0,
            TITLE,
            Style::default().fg(colors.title()).add_modifier(Modifier::BOLD),
        );
        put(buf, panel, 2, 2, &format!("Goal: {}", goal.name), text);
        put(
            buf,
            panel,
            2,
            3,
            &format!("Target: {currency} {:.2}", goal.target),
            text,
        );
        put(
            buf,
            panel,
            2,
            4,
            &format!("Current: {currency} {:.2}", goal.current),
            text,
        );

        if panel.height > 5 {
            let bar_area = Rect::new(panel.x + 2, panel.y + 5, panel.width.saturating_sub(2), 1);
            ProgressBar::new(goal.progress_ratio(), self.theme).render(bar_area, buf);
        }

        if panel.height > 7 {
            let menu_area = Rect::new(panel.x + 2, panel.y + 7, panel.width.saturating_sub(2), 1);
            MenuWidget::new(self.menu, self.theme).render(menu_area, buf);
        }

        if let Some(status) = self.status {
            let status_area = Rect::new(area.x, area.y, area.width, PROGRESS_HEIGHT + 1)
                .intersection(area);
            put(
                buf,
                status_area,
                2,
                PROGRESS_HEIGHT,
                status,
                Style::default().fg(colors.status()),
            );
        }
    }
}
