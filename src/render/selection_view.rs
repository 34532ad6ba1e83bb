use crate::render::context::RenderContext;
use crate::selection::SelectionList;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget,
};

pub struct SelectionView<'a> {
    pub selections: &'a SelectionList,
    pub cursor: usize,
    pub focused: bool,
}

impl SelectionView<'_> {
    pub fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" Selected graphs ({}) ", self.selections.len()))
            .border_style(ctx.border_style(self.focused));

        if self.selections.is_empty() {
            Paragraph::new("Press a to add a graph slot.")
                .style(Style::default().fg(ctx.dimmed))
                .block(block)
                .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .selections
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let style = if spec.is_empty() {
                    Style::default().fg(ctx.warning)
                } else {
                    Style::default().fg(ctx.text_primary)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>2}. ", i + 1),
                        Style::default().fg(ctx.text_secondary),
                    ),
                    Span::styled(spec.display_label(), style),
                ]))
            })
            .collect();

        let highlight = if self.focused {
            ctx.selected_style()
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        let selected = self.cursor.min(self.selections.len() - 1);
        let mut state = ListState::default().with_selected(Some(selected));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
