//! Reusable UI widgets
//!
//! Contains common UI components used on both screens:
//! - Buttons
//! - Popup dialogs (confirmation, error)
//! - Flash message and status bar
//! - Layout helpers

use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render a bordered button with centered (possibly multi-line) label
pub fn render_button(
    frame: &mut Frame,
    label: &str,
    focused: bool,
    label_style: Option<Style>,
    theme: &Theme,
    area: Rect,
) {
    let (style, border_style) = if focused {
        (theme.button_focused(), theme.border_focused())
    } else {
        (theme.button(), theme.border())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .style(style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = label
        .lines()
        .map(|l| Line::styled(l.to_string(), label_style.unwrap_or(style)))
        .collect();

    // Vertically center the label inside the box
    let height = (lines.len() as u16).min(inner.height);
    let label_area = Rect {
        x: inner.x,
        y: inner.y + inner.height.saturating_sub(height) / 2,
        width: inner.width,
        height,
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(style);
    frame.render_widget(paragraph, label_area);
}

/// Render a centered popup dialog
pub fn render_popup(
    frame: &mut Frame,
    title: &str,
    content: Vec<Line>,
    buttons: &[(&str, char)], // (label, key)
    theme: &Theme,
    area: Rect,
) {
    // Calculate popup size
    let popup_width = 56.min(area.width.saturating_sub(4));
    let popup_height = (content.len() as u16 + 6).min(area.height.saturating_sub(2));

    let popup_area = centered_rect(popup_width, popup_height, area);
    if popup_area.width < 4 || popup_area.height < 3 {
        return;
    }

    // Clear the area behind the popup
    clear(frame, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_focused())
        .style(theme.text());

    frame.render_widget(block, popup_area);

    // Inner area for content
    let inner = Rect {
        x: popup_area.x + 2,
        y: popup_area.y + 1,
        width: popup_area.width.saturating_sub(4),
        height: popup_area.height.saturating_sub(4),
    };

    let content_widget = Paragraph::new(content)
        .style(theme.text())
        .wrap(Wrap { trim: false });
    frame.render_widget(content_widget, inner);

    // Render buttons at bottom
    if !buttons.is_empty() {
        let button_area = Rect {
            x: popup_area.x + 2,
            y: popup_area.y + popup_area.height.saturating_sub(2),
            width: popup_area.width.saturating_sub(4),
            height: 1,
        };

        let button_spans: Vec<Span> = buttons
            .iter()
            .enumerate()
            .flat_map(|(i, (label, key))| {
                let mut spans = vec![
                    Span::styled("[", theme.text_dim()),
                    Span::styled(
                        key.to_string(),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("] ", theme.text_dim()),
                    Span::styled(*label, theme.text()),
                ];
                if i < buttons.len() - 1 {
                    spans.push(Span::raw("    "));
                }
                spans
            })
            .collect();

        let buttons_widget = Paragraph::new(Line::from(button_spans))
            .alignment(Alignment::Center);
        frame.render_widget(buttons_widget, button_area);
    }
}

/// Render a confirmation popup
pub fn render_confirm_popup(
    frame: &mut Frame,
    title: &str,
    message: &str,
    confirm_label: &str,
    theme: &Theme,
    area: Rect,
) {
    let content = vec![
        Line::raw(""),
        Line::raw(message),
        Line::raw(""),
    ];

    render_popup(
        frame,
        title,
        content,
        &[(confirm_label, 'y'), ("Cancel", 'n')],
        theme,
        area,
    );
}

/// Render an error popup
pub fn render_error_popup(
    frame: &mut Frame,
    title: &str,
    message: &str,
    theme: &Theme,
    area: Rect,
) {
    let mut content = vec![Line::raw("")];
    content.extend(
        message
            .lines()
            .map(|l| Line::styled(l.to_string(), theme.error())),
    );
    content.push(Line::raw(""));

    render_popup(
        frame,
        title,
        content,
        &[("OK", 'o')],
        theme,
        area,
    );
}

/// Render a flash message just above the bottom line
pub fn render_flash_message(frame: &mut Frame, message: &str, theme: &Theme, area: Rect) {
    if area.height == 0 {
        return;
    }

    let style = theme.success();

    let flash_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(2),
        width: area.width,
        height: 1,
    };

    let flash = Paragraph::new(Line::from(vec![
        Span::styled("✓ ", style),
        Span::styled(message, style),
    ]))
    .alignment(Alignment::Center);

    clear(frame, flash_area);
    frame.render_widget(flash, flash_area);
}

/// Render status bar at bottom
pub fn render_status_bar(
    frame: &mut Frame,
    left_content: &str,
    right_content: &str,
    theme: &Theme,
    area: Rect,
) {
    if area.height == 0 {
        return;
    }

    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    // Clear the line first
    clear(frame, status_area);

    let left_widget = Paragraph::new(left_content)
        .style(theme.text_dim());

    let right_len = right_content.chars().count() as u16;
    let right_area = Rect {
        x: status_area.x + status_area.width.saturating_sub(right_len + 1),
        y: status_area.y,
        width: (right_len + 1).min(status_area.width),
        height: 1,
    };
    let right_widget = Paragraph::new(right_content)
        .style(theme.text_dim());

    frame.render_widget(left_widget, status_area);
    frame.render_widget(right_widget, right_area);
}

/// Helper: Clear `area`, clipped to the frame
pub fn clear(frame: &mut Frame, area: Rect) {
    let area = area.intersection(frame.area());
    if !area.is_empty() {
        frame.render_widget(Clear, area);
    }
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Helper: Split `area` into `count` equal-width cells, `columns` per row.
/// Rows that do not fit in `area` are dropped.
pub fn grid_cells(area: Rect, count: usize, columns: usize, row_height: u16) -> Vec<Rect> {
    let columns = columns.max(1);
    let cell_width = area.width / columns as u16;

    let mut cells = Vec::with_capacity(count);
    for index in 0..count {
        let row = (index / columns) as u16;
        let col = (index % columns) as u16;

        let y = area.y + row * row_height;
        if y + row_height > area.y + area.height {
            break;
        }

        cells.push(Rect {
            x: area.x + col * cell_width,
            y,
            width: cell_width,
            height: row_height,
        });
    }
    cells
}

/// Helper: Create vertical layout with given constraints
pub fn vertical_layout(area: Rect, constraints: Vec<Constraint>) -> Vec<Rect> {
    Layout::vertical(constraints).split(area).to_vec()
}
