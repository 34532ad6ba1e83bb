//! Overlay rendering (dataset prompt, success/error modals, help).

use crate::render::context::RenderContext;
use crate::render::layout::{centered_rect, centered_rect_fixed};
use crate::widgets::text_input::TextInput;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Widget;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

fn render_message_modal(
    area: Rect,
    buf: &mut Buffer,
    title: &str,
    message: &str,
    border: Color,
    text: Color,
    ctx: &RenderContext,
) {
    let popup_area = centered_rect(area, 70, 40);
    Clear.render(popup_area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(ctx.surface));
    let inner_area = block.inner(popup_area);
    block.render(popup_area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(inner_area);

    Paragraph::new(message)
        .style(Style::default().fg(text))
        .wrap(Wrap { trim: true })
        .render(chunks[0], buf);

    Paragraph::new("OK")
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ctx.modal_border_active)),
        )
        .render(chunks[1], buf);
}

pub fn render_success_modal(
    area: Rect,
    buf: &mut Buffer,
    modal: &crate::SuccessModal,
    ctx: &RenderContext,
) {
    render_message_modal(
        area,
        buf,
        "Success",
        &modal.message,
        ctx.success,
        ctx.text_primary,
        ctx,
    );
}

pub fn render_error_modal(
    area: Rect,
    buf: &mut Buffer,
    modal: &crate::ErrorModal,
    ctx: &RenderContext,
) {
    render_message_modal(
        area,
        buf,
        "Error",
        &modal.message,
        ctx.modal_border_error,
        ctx.error,
        ctx,
    );
}

/// Single-line prompt for the dataset path, with the accepted formats as a hint.
pub fn render_dataset_prompt(
    area: Rect,
    buf: &mut Buffer,
    input: &TextInput,
    hint: &str,
    ctx: &RenderContext,
) {
    let popup_area = centered_rect_fixed(area, area.width.saturating_sub(8).min(90), 5);
    Clear.render(popup_area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("Open dataset")
        .border_style(Style::default().fg(ctx.modal_border_active))
        .style(Style::default().bg(ctx.surface));
    let inner = block.inner(popup_area);
    block.render(popup_area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(inner);
    input.render(rows[0], buf);
    Line::from(vec![
        Span::styled("Enter", Style::default().fg(ctx.keybind_hints)),
        Span::styled(" open  ", Style::default().fg(ctx.text_secondary)),
        Span::styled("↑↓", Style::default().fg(ctx.keybind_hints)),
        Span::styled(" history  ", Style::default().fg(ctx.text_secondary)),
        Span::styled("Esc", Style::default().fg(ctx.keybind_hints)),
        Span::styled(
            format!(" cancel   {}", hint),
            Style::default().fg(ctx.text_secondary),
        ),
    ])
    .render(rows[2], buf);
}

/// Help overlay; `scroll` is clamped so the caller can persist it.
pub fn render_help_overlay(
    area: Rect,
    buf: &mut Buffer,
    text: &str,
    scroll: &mut u16,
    ctx: &RenderContext,
) {
    let popup_area = centered_rect(area, 70, 70);
    Clear.render(popup_area, buf);
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ctx.modal_border_active))
        .style(Style::default().bg(ctx.surface));
    let inner = block.inner(popup_area);
    block.render(popup_area, buf);

    let total = text.lines().count() as u16;
    *scroll = (*scroll).min(total.saturating_sub(inner.height));
    Paragraph::new(text)
        .style(Style::default().fg(ctx.text_primary))
        .scroll((*scroll, 0))
        .render(inner, buf);
}
