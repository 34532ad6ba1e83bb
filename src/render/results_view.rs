use crate::render::context::RenderContext;
use crate::results::{DisplayUnit, NO_DATA_TEXT};
use chrono::{DateTime, Local};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap};

/// Results pane: one card per display unit, scrolled by whole lines.
pub struct ResultsView<'a> {
    pub units: &'a [DisplayUnit],
    pub generated_at: Option<DateTime<Local>>,
    pub scroll: u16,
    pub focused: bool,
}

/// Styled lines for a display unit, followed by a blank separator.
pub fn unit_lines<'a>(
    index: usize,
    unit: &'a DisplayUnit,
    ctx: &RenderContext,
) -> Vec<Line<'a>> {
    let mut lines = match unit {
        DisplayUnit::NoData => vec![Line::from(Span::styled(
            NO_DATA_TEXT,
            Style::default().fg(ctx.dimmed),
        ))],
        DisplayUnit::Chart(card) => vec![
            Line::from(vec![
                Span::styled(
                    format!("{}. ", index + 1),
                    Style::default().fg(ctx.text_secondary),
                ),
                Span::styled(
                    card.title.as_str(),
                    Style::default()
                        .fg(ctx.chart_title)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!("   {}", card.axis_text()),
                Style::default().fg(ctx.text_secondary),
            )),
            Line::from(vec![
                Span::styled("   ", Style::default()),
                Span::styled(
                    card.alt_text.as_str(),
                    Style::default().fg(ctx.text_primary),
                ),
                Span::styled(
                    format!(" [{}]", card.image.describe()),
                    Style::default().fg(ctx.dimmed),
                ),
            ]),
        ],
        DisplayUnit::Failed { message } => vec![Line::from(vec![
            Span::styled(
                format!("{}. ", index + 1),
                Style::default().fg(ctx.text_secondary),
            ),
            Span::styled(
                format!("Error: {}", message),
                Style::default().fg(ctx.error),
            ),
        ])],
    };
    lines.push(Line::default());
    lines
}

impl ResultsView<'_> {
    /// Draws the cards and returns the largest scroll offset that still fills the pane.
    /// `scroll` is clamped to that offset before drawing.
    pub fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext) -> u16 {
        let title = match self.generated_at {
            Some(at) => format!(" Results ({}) ", at.format("%H:%M:%S")),
            None => " Results ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title)
            .border_style(ctx.border_style(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .units
            .iter()
            .enumerate()
            .flat_map(|(i, unit)| unit_lines(i, unit, ctx))
            .collect();

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        let rows = wrapped_rows(&paragraph, inner.width);
        let max_scroll = rows.saturating_sub(inner.height);
        paragraph
            .scroll((self.scroll.min(max_scroll), 0))
            .render(inner, buf);
        max_scroll
    }
}

/// Rows `paragraph` occupies once wrapped to `width` columns.
fn wrapped_rows(paragraph: &Paragraph, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let rows = paragraph.line_count(width);
    u16::try_from(rows).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::results::ChartCard;

    fn failed(message: &str) -> DisplayUnit {
        DisplayUnit::Failed {
            message: message.to_string(),
        }
    }

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_max_scroll_counts_wrapped_rows() {
        let ctx = RenderContext::from_theme(&Theme::default());
        let units = vec![failed(&"x".repeat(200)), failed("tail")];
        let area = Rect::new(0, 0, 42, 6);
        let mut buf = Buffer::empty(area);
        let view = ResultsView {
            units: &units,
            generated_at: None,
            scroll: u16::MAX,
            focused: true,
        };
        // 40 inner columns: the first card alone wraps to 6 rows, 9 rows in total
        // against a 4-row viewport.
        assert!(view.render(area, &mut buf, &ctx) >= 5);
        assert!(buffer_text(&buf).contains("Error: tail"));
    }

    #[test]
    fn test_short_results_do_not_scroll() {
        let ctx = RenderContext::from_theme(&Theme::default());
        let units = vec![DisplayUnit::Chart(ChartCard {
            title: "Bar Chart".into(),
            x_axis: "Age".into(),
            y_axis: None,
            alt_text: "Bar Chart of Age".into(),
            image: crate::results::ImageSource::parse("http://charts/bar.png"),
        })];
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let view = ResultsView {
            units: &units,
            generated_at: None,
            scroll: 3,
            focused: false,
        };
        assert_eq!(view.render(area, &mut buf, &ctx), 0);
        assert!(buffer_text(&buf).contains("Bar Chart"));
    }
}
