use crate::render::context::RenderContext;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph, Widget},
};

pub const DEFAULT_CONTROLS: [(&str, &str); 9] = [
    ("o", "Open"),
    ("f", "Fetch"),
    ("a", "Add"),
    ("d", "Remove"),
    ("Tab", "Pane"),
    ("g", "Generate"),
    ("s", "Save"),
    ("Esc", "Dismiss"),
    ("q", "Quit"),
];

/// Bottom bar: key hints on the left, status text and a busy throbber on the right
pub struct Controls {
    pub status: Option<String>,
    pub controls: Vec<(&'static str, &'static str)>,
    pub bg_color: Color,
    pub key_color: Color,
    pub label_color: Color,
    pub throbber_color: Color,
    /// 8-dot braille spinner instead of |/-\
    pub use_unicode_throbber: bool,
    pub busy: bool,
    pub throbber_frame: u8,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            status: None,
            controls: DEFAULT_CONTROLS.to_vec(),
            bg_color: Color::Indexed(235),
            key_color: Color::Cyan,
            label_color: Color::White,
            throbber_color: Color::Cyan,
            use_unicode_throbber: false,
            busy: false,
            throbber_frame: 0,
        }
    }
}

impl Controls {
    pub fn from_context(ctx: &RenderContext) -> Self {
        Self {
            bg_color: ctx.controls_bg,
            key_color: ctx.keybind_hints,
            label_color: ctx.keybind_labels,
            throbber_color: ctx.throbber,
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_busy(mut self, busy: bool, throbber_frame: u8) -> Self {
        self.busy = busy;
        self.throbber_frame = throbber_frame;
        self
    }

    pub fn with_controls(mut self, controls: Vec<(&'static str, &'static str)>) -> Self {
        self.controls = controls;
        self
    }

    pub fn with_unicode_throbber(mut self, use_unicode: bool) -> Self {
        self.use_unicode_throbber = use_unicode;
        self
    }
}

const THROBBER_WIDTH: u16 = 3;
const STATUS_WIDTH: u16 = 28;
const THROBBER_ASCII: [char; 4] = ['|', '/', '-', '\\'];
const THROBBER_BRAILLE_EIGHT: [char; 8] = ['⣷', '⣯', '⣟', '⡿', '⢿', '⣻', '⣽', '⣾'];

impl Widget for &Controls {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let no_bg = self.bg_color == Color::Reset;
        let base = if no_bg {
            Style::default()
        } else {
            Style::default().bg(self.bg_color)
        };
        Block::default().style(base).render(area, buf);

        // Pairs are never shrunk: show as many whole pairs as fit
        let pair_width = |(key, action): &(&str, &str)| {
            key.chars().count() as u16 + action.chars().count() as u16 + 2
        };
        let mut available = area.width.saturating_sub(STATUS_WIDTH + THROBBER_WIDTH);
        let n_show = self
            .controls
            .iter()
            .take_while(|pair| {
                let need = pair_width(pair);
                let fits = available >= need;
                if fits {
                    available -= need;
                }
                fits
            })
            .count();

        let mut constraints: Vec<Constraint> = self
            .controls
            .iter()
            .take(n_show)
            .flat_map(|(key, action)| {
                [
                    Constraint::Length(key.chars().count() as u16 + 1),
                    Constraint::Length(action.chars().count() as u16 + 1),
                ]
            })
            .collect();
        constraints.push(Constraint::Fill(1));
        constraints.push(Constraint::Length(STATUS_WIDTH));
        constraints.push(Constraint::Length(THROBBER_WIDTH));
        let layout = Layout::new(Direction::Horizontal, constraints).split(area);

        let key_style = base.fg(self.key_color);
        let label_style = base.fg(self.label_color);
        for (i, (key, action)) in self.controls.iter().take(n_show).enumerate() {
            Paragraph::new(*key)
                .style(key_style)
                .render(layout[i * 2], buf);
            Paragraph::new(*action)
                .style(label_style)
                .render(layout[i * 2 + 1], buf);
        }

        let status_idx = n_show * 2 + 1;
        if let Some(status) = &self.status {
            Paragraph::new(status.as_str())
                .style(label_style)
                .right_aligned()
                .render(layout[status_idx], buf);
        }

        // Throbber slot keeps its width when idle so the layout never shifts
        let throbber = if !self.busy {
            ' '
        } else if self.use_unicode_throbber {
            THROBBER_BRAILLE_EIGHT[self.throbber_frame as usize % THROBBER_BRAILLE_EIGHT.len()]
        } else {
            THROBBER_ASCII[self.throbber_frame as usize % THROBBER_ASCII.len()]
        };
        Paragraph::new(throbber.to_string())
            .style(base.fg(self.throbber_color))
            .centered()
            .render(layout[status_idx + 1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, width: u16) -> String {
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_renders_hints_and_status() {
        let area = Rect::new(0, 0, 120, 1);
        let mut buf = Buffer::empty(area);
        Controls::default()
            .with_status("Composing")
            .render(area, &mut buf);
        let text = row_text(&buf, 120);
        assert!(text.starts_with("o Open f Fetch"));
        assert!(text.contains("Composing"));
    }

    #[test]
    fn test_throbber_only_when_busy() {
        let area = Rect::new(0, 0, 40, 1);
        let mut idle = Buffer::empty(area);
        Controls::default().render(area, &mut idle);
        assert!(!row_text(&idle, 40).contains('|'));

        let mut busy = Buffer::empty(area);
        Controls::default()
            .with_busy(true, 0)
            .render(area, &mut busy);
        assert!(row_text(&busy, 40).contains('|'));
    }
}
