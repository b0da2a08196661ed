//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Header with the current screen
//! - Start screen buttons or the Explore grid
//! - Popups and overlays
//! - Status bar

use crate::app::{App, MainButton, PopupState, EXPLORE_BACK_INDEX};
use crate::types::Screen;
use crate::ui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const BUTTON_HEIGHT: u16 = 3;
const GRID_ROW_HEIGHT: u16 = 4;
const MAX_CONTENT_WIDTH: u16 = 72;

/// Smallest terminal the full layout is drawn in
pub const MIN_WIDTH: u16 = 20;
pub const MIN_HEIGHT: u16 = 8;

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Block::default().style(app.theme.block_style()), area);

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, app, area);
        return;
    }

    // Main layout: header, content, status bar
    let layout = Layout::vertical([
        Constraint::Length(2),  // Header
        Constraint::Min(5),     // Content
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    render_header(frame, app, layout[0]);

    match app.screen {
        Screen::Main => render_main_screen(frame, app, layout[1]),
        Screen::Explore => render_explore_screen(frame, app, layout[1]),
    }

    render_status_bar(frame, app, layout[2]);

    render_popups(frame, app, area);
}

/// Placeholder shown instead of the layout in a tiny terminal
fn render_too_small(frame: &mut Frame, app: &App, area: Rect) {
    if area.is_empty() {
        return;
    }

    let message = Paragraph::new(Line::styled("Terminal too small", app.theme.text_dim()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(message, area);
}

/// Render header with the screen title
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let header = Block::default()
        .style(theme.block_style())
        .title(format!(" MeshMapper · {} ", app.screen.label()))
        .title_style(theme.title())
        .title_alignment(Alignment::Center)
        .borders(Borders::BOTTOM)
        .border_style(theme.border());

    frame.render_widget(header, area);
}

/// Label shown on a start-screen button
fn main_button_label(app: &App, button: MainButton) -> String {
    match button {
        MainButton::Home => "MeshMapper".into(),
        MainButton::Wardrive => "Wardrive".into(),
        MainButton::Explore => "Explore".into(),
        MainButton::Pinned => app
            .pinned_button()
            .map(|b| b.label)
            .unwrap_or_default(),
    }
}

/// Start screen: a centered column of buttons
fn render_main_screen(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let buttons = app.main_buttons();

    let width = MAX_CONTENT_WIDTH.min(area.width.saturating_sub(4));
    let height = (buttons.len() as u16 * (BUTTON_HEIGHT + 1)).min(area.height);
    let column = widgets::centered_rect(width, height, area);

    let constraints: Vec<Constraint> = buttons
        .iter()
        .map(|_| Constraint::Length(BUTTON_HEIGHT + 1))
        .collect();
    let rows = widgets::vertical_layout(column, constraints);

    for (i, (button, row)) in buttons.iter().zip(rows.iter()).enumerate() {
        let button_area = Rect {
            height: BUTTON_HEIGHT.min(row.height),
            ..*row
        };
        let label_style = (*button == MainButton::Pinned).then(|| theme.marker_pinned());

        widgets::render_button(
            frame,
            &main_button_label(app, *button),
            i == app.main_selected,
            label_style,
            theme,
            button_area,
        );
    }
}

/// Explore screen: destination grid followed by a Back button
fn render_explore_screen(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let grid = app.destination_grid();
    let columns = app.grid_columns();

    let width = MAX_CONTENT_WIDTH.min(area.width.saturating_sub(2));
    let column = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        width,
        ..area
    };

    let rows = grid.len().div_ceil(columns) as u16;
    let layout = Layout::vertical([
        Constraint::Length(2),                         // Hint
        Constraint::Length(rows * GRID_ROW_HEIGHT),    // Grid
        Constraint::Length(BUTTON_HEIGHT),             // Back
        Constraint::Min(0),
    ])
    .split(column);

    let hint = Paragraph::new(Line::styled(
        "Choose a region · hold [p] to pin it to the start screen",
        theme.text_dim(),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(hint, layout[0]);

    let cells = widgets::grid_cells(layout[1], grid.len(), columns, GRID_ROW_HEIGHT);
    for (i, (button, cell)) in grid.iter().zip(cells.iter()).enumerate() {
        let pinned = app
            .pinned
            .as_ref()
            .is_some_and(|p| p.code == button.code);
        let label_style = pinned.then(|| theme.marker_pinned());

        widgets::render_button(
            frame,
            &button.label,
            i == app.explore_selected,
            label_style,
            theme,
            *cell,
        );
    }

    widgets::render_button(
        frame,
        "Back",
        app.explore_selected == EXPLORE_BACK_INDEX,
        None,
        theme,
        layout[2],
    );
}

/// Render status bar with keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.screen {
        Screen::Main if app.pinned.is_some() => {
            " [↑↓] Move  [Enter] Open  [p] Remove pin  [t] Theme  [q] Quit"
        }
        Screen::Main => " [↑↓] Move  [Enter] Open  [t] Theme  [q] Quit",
        Screen::Explore => " [←↑↓→] Move  [Enter] Open  [p] Pin  [t] Theme  [Esc] Back",
    };

    widgets::render_status_bar(frame, hints, app.config.theme.as_str(), &app.theme, area);
}

/// Render popups if active
fn render_popups(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    match &app.popup {
        PopupState::None => {}

        PopupState::Confirm { title, message, confirm_label, .. } => {
            widgets::render_confirm_popup(frame, title, message, confirm_label, theme, area);
        }

        PopupState::Error { title, message } => {
            widgets::render_error_popup(frame, title, message, theme, area);
        }
    }

    // Flash message (success feedback)
    if let Some((msg, _)) = &app.flash_message {
        widgets::render_flash_message(frame, msg, theme, area);
    }
}
