use crate::config::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Snapshot of theme colors for rendering.
/// Passed to views to avoid threading many individual parameters.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub keybind_hints: Color,
    pub keybind_labels: Color,
    pub controls_bg: Color,
    pub background: Color,
    pub surface: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_inverse: Color,
    pub dimmed: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub throbber: Color,
    pub pane_border: Color,
    pub pane_border_focused: Color,
    pub list_selected: Color,
    pub chart_title: Color,
    pub modal_border_active: Color,
    pub modal_border_error: Color,
}

impl RenderContext {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            keybind_hints: theme.get("keybind_hints"),
            keybind_labels: theme.get("keybind_labels"),
            controls_bg: theme.get("controls_bg"),
            background: theme.get("background"),
            surface: theme.get("surface"),
            text_primary: theme.get("text_primary"),
            text_secondary: theme.get("text_secondary"),
            text_inverse: theme.get("text_inverse"),
            dimmed: theme.get("dimmed"),
            success: theme.get("success"),
            warning: theme.get("warning"),
            error: theme.get("error"),
            throbber: theme.get("throbber"),
            pane_border: theme.get("pane_border"),
            pane_border_focused: theme.get("pane_border_focused"),
            list_selected: theme.get("list_selected"),
            chart_title: theme.get("chart_title"),
            modal_border_active: theme.get("modal_border_active"),
            modal_border_error: theme.get("modal_border_error"),
        }
    }

    /// Highlight style for the selected list row. `Reset` means "reversed".
    pub fn selected_style(&self) -> Style {
        if self.list_selected == Color::Reset {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
                .bg(self.list_selected)
                .fg(self.text_inverse)
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.pane_border_focused
        } else {
            self.pane_border
        })
    }
}
