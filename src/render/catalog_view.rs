use crate::catalog::CatalogEntry;
use crate::render::context::RenderContext;
use crate::session::Phase;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget,
};

/// Catalog pane: every label the server offered, with the cursor and the entry the
/// selected slot currently holds.
pub struct CatalogView<'a> {
    pub entries: &'a [CatalogEntry],
    pub cursor: usize,
    /// Entry the selected slot was decoded from, if any.
    pub current: Option<usize>,
    pub phase: Phase,
    pub focused: bool,
}

impl CatalogView<'_> {
    pub fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext) {
        let title = if self.entries.is_empty() {
            " Graph options ".to_string()
        } else {
            format!(" Graph options ({}) ", self.entries.len())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title)
            .border_style(ctx.border_style(self.focused));

        if self.entries.is_empty() {
            let hint = match self.phase {
                Phase::CatalogFetching => "Fetching graph options...",
                Phase::Idle => "Open a dataset (o), then fetch graph options (f).",
                _ => "The server offered no graphs for this dataset.",
            };
            Paragraph::new(hint)
                .style(Style::default().fg(ctx.dimmed))
                .block(block)
                .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let marker = if Some(i) == self.current { "● " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(ctx.success)),
                    Span::styled(entry.label(), Style::default().fg(ctx.text_primary)),
                ]))
            })
            .collect();

        let highlight = if self.focused {
            ctx.selected_style()
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        let selected = self.cursor.min(self.entries.len() - 1);
        let mut state = ListState::default().with_selected(Some(selected));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
