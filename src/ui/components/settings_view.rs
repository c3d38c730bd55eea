use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::app::FieldEdit;
use crate::model::TrackerState;
use crate::ui::components::menu::{Menu, MenuWidget};
use crate::ui::components::progress_view::TITLE;
use crate::ui::layout::{PANEL_WIDTH, SETTINGS_HEIGHT, draw_box, panel_rect, put};
use crate::ui::theme::Theme;

const PROMPT_ROW: u16 = 13;

/// Settings screen. Each editable line starts with its hotkey letter in bold.
pub struct SettingsView<'a> {
    state: &'a TrackerState,
    menu: &'a Menu,
    edit: Option<&'a FieldEdit>,
    status: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> SettingsView<'a> {
    pub fn new(state: &'a TrackerState, menu: &'a Menu, theme: &'a Theme) -> Self {
        Self {
            state,
            menu,
            edit: None,
            status: None,
            theme,
        }
    }

    pub fn edit(mut self, edit: Option<&'a FieldEdit>) -> Self {
        self.edit = edit;
        self
    }

    pub fn status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }
}

impl Widget for SettingsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let text = Style::default().fg(colors.fg());
        let bold = text.add_modifier(Modifier::BOLD);
        let heading = Style::default().fg(colors.title()).add_modifier(Modifier::BOLD);
        let panel = panel_rect(area, SETTINGS_HEIGHT);

        draw_box(
            buf,
            panel,
            PANEL_WIDTH,
            SETTINGS_HEIGHT,
            Style::default().fg(colors.border()),
        );

        let currency = &self.state.settings.currency;
        let goal = self.state.active_goal();

        put(buf, panel, 2, 0, &format!("{TITLE} - Settings"), heading);
        put(buf, panel, 2, 2, "[Goal Settings]", text);

        put(buf, panel, 2, 3, "G", bold);
        put(buf, panel, 3, 3, &format!("oal: {}", goal.name), text);
        put(buf, panel, 2, 4, "T", bold);
        put(
            buf,
            panel,
            3,
            4,
            &format!("arget: {currency} {:.2}", goal.target),
            text,
        );
        put(buf, panel, 2, 5, "C", bold);
        put(
            buf,
            panel,
            3,
            5,
            &format!("urrent: {currency} {:.2}", goal.current),
            text,
        );

        put(buf, panel, 2, 7, "[App Settings]", text);
        // The hotkey is `u`, so only the second letter is emphasised.
        put(buf, panel, 2, 8, "C", text);
        put(buf, panel, 3, 8, "u", bold);
        put(buf, panel, 4, 8, &format!("rrency: {currency}"), text);

        if panel.height > 10 {
            let menu_area = Rect::new(
                panel.x + 2,
                panel.y + 10,
                panel.width.saturating_sub(2),
                panel.height - 10,
            );
            MenuWidget::new(self.menu, self.theme).render(menu_area, buf);
        }

        if let Some(edit) = self.edit {
            let prompt_style = Style::default().fg(colors.prompt());
            let prompt = edit.field.prompt(currency);
            let mut col = put(buf, panel, 2, PROMPT_ROW, &prompt, prompt_style) - panel.x;

            let (before, cursor_ch, after) = edit.input.render_parts();
            col = put(buf, panel, col, PROMPT_ROW, before, text) - panel.x;
            let cursor_text = cursor_ch.map(String::from).unwrap_or_else(|| " ".to_string());
            col = put(
                buf,
                panel,
                col,
                PROMPT_ROW,
                &cursor_text,
                text.add_modifier(Modifier::REVERSED),
            ) - panel.x;
            put(buf, panel, col, PROMPT_ROW, after, text);
        }

        if let Some(status) = self.status {
            let status_area = Rect::new(area.x, area.y, area.width, SETTINGS_HEIGHT + 1)
                .intersection(area);
            put(
                buf,
                status_area,
                2,
                SETTINGS_HEIGHT,
                status,
                Style::default().fg(colors.status()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EditField;
    use crate::ui::components::menu::MenuLayout;
    use crate::ui::line_input::LineInput;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn menu() -> Menu {
        Menu::new(&["[Save]", "[Discard (Back)]"], MenuLayout::Vertical)
    }

    fn render(state: &TrackerState, menu: &Menu, edit: Option<&FieldEdit>) -> Buffer {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 50, 16);
        let mut buf = Buffer::empty(area);
        SettingsView::new(state, menu, &theme)
            .edit(edit)
            .render(area, &mut buf);
        buf
    }

    #[test]
    fn renders_fields_and_menu() {
        let state = TrackerState::default();
        let buf = render(&state, &menu(), None);

        assert!(row_text(&buf, 0).starts_with(" -Simple Goal Tracker V1.1 - Settings---"));
        assert!(row_text(&buf, 2).starts_with("| [Goal Settings]"));
        assert!(row_text(&buf, 3).starts_with("| Goal: Placeholder"));
        assert!(row_text(&buf, 4).starts_with("| Target: $ 230.00"));
        assert!(row_text(&buf, 5).starts_with("| Current: $ 150.00"));
        assert!(row_text(&buf, 7).starts_with("| [App Settings]"));
        assert!(row_text(&buf, 8).starts_with("| Currency: $"));
        assert!(row_text(&buf, 10).starts_with("| [Save]"));
        assert!(row_text(&buf, 11).starts_with("| [Discard (Back)]"));
        assert_eq!(row_text(&buf, 13), format!(" {}", "-".repeat(43)));
    }

    #[test]
    fn mnemonic_letters_are_bold() {
        let state = TrackerState::default();
        let buf = render(&state, &menu(), None);
        for row in [3, 4, 5] {
            assert!(buf[(2, row)].modifier.contains(Modifier::BOLD));
            assert!(!buf[(3, row)].modifier.contains(Modifier::BOLD));
        }
        assert!(!buf[(2, 8)].modifier.contains(Modifier::BOLD));
        assert!(buf[(3, 8)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn highlighted_menu_item_is_reversed() {
        let state = TrackerState::default();
        let mut m = menu();
        m.selected = 1;
        let buf = render(&state, &m, None);
        assert!(!buf[(3, 10)].modifier.contains(Modifier::REVERSED));
        assert!(buf[(3, 11)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn open_prompt_replaces_bottom_edge() {
        let state = TrackerState::default();
        let edit = FieldEdit {
            field: EditField::Target,
            input: LineInput::new("12"),
        };
        let buf = render(&state, &menu(), Some(&edit));
        assert!(row_text(&buf, 13).starts_with(" -New Target: $ 12"));
        // Cursor cell sits just past the typed text.
        assert!(buf[(18, 13)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn status_line_below_panel() {
        let state = TrackerState::default();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 50, 16);
        let mut buf = Buffer::empty(area);
        SettingsView::new(&state, &menu(), &theme)
            .status(Some("Not a number: \"abc\""))
            .render(area, &mut buf);
        assert_eq!(row_text(&buf, 14), "  Not a number: \"abc\"");
    }
}
