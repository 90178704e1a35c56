//! Stateless UI rendering for the Simon board.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use strictly_simon::Signal;

use crate::BoardView;

/// Renders the pads, status line, leaderboard and, after a game over, the
/// name prompt.
pub fn draw(frame: &mut Frame, view: &BoardView, status: &str, name_input: &str) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Board + leaderboard
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new(format!("Strictly Simon    Score: {}", view.score()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(30)])
        .split(chunks[1]);
    draw_pads(frame, body[0], *view.active_signal());
    draw_leaderboard(frame, body[1], view);

    let status_text = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[2]);

    let help = Paragraph::new("g/r/y/b or 1-4: press   s: start   x: reset   q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);

    if view.awaiting_name().is_some() {
        draw_name_prompt(frame, area, name_input);
    }
}

fn draw_pads(frame: &mut Frame, area: Rect, lit: Option<Signal>) {
    let board = center_rect(area, 40, 10);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Length(5)])
        .split(board);

    for (row, pair) in rows.iter().zip(Signal::ALL.chunks(2)) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(20), Constraint::Length(20)])
            .split(*row);
        for (col, signal) in cols.iter().zip(pair) {
            draw_pad(frame, *col, *signal, lit == Some(*signal));
        }
    }
}

fn draw_pad(frame: &mut Frame, area: Rect, signal: Signal, lit: bool) {
    let (dim, bright) = pad_colors(signal);
    let style = if lit {
        Style::default().bg(bright).fg(Color::Black).add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(dim).fg(Color::Gray)
    };
    let key = signal.to_index() + 1;

    let pad = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("{} ({})", signal.label(), key), style)),
    ])
    .style(style)
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(pad, area);
}

fn pad_colors(signal: Signal) -> (Color, Color) {
    match signal {
        Signal::Green => (Color::Rgb(0, 70, 0), Color::LightGreen),
        Signal::Red => (Color::Rgb(80, 0, 0), Color::LightRed),
        Signal::Yellow => (Color::Rgb(90, 80, 0), Color::LightYellow),
        Signal::Blue => (Color::Rgb(0, 0, 90), Color::LightBlue),
    }
}

fn draw_leaderboard(frame: &mut Frame, area: Rect, view: &BoardView) {
    let items: Vec<ListItem> = if view.leaderboard().is_empty() {
        vec![ListItem::new(Span::styled(
            "No scores yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        view.leaderboard()
            .iter()
            .enumerate()
            .map(|(rank, result)| {
                ListItem::new(format!(
                    "{:>2}. {:<16} {:>3}",
                    rank + 1,
                    result.name(),
                    result.score()
                ))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .title("Leaderboard")
            .borders(Borders::ALL),
    );
    frame.render_widget(list, area);
}

fn draw_name_prompt(frame: &mut Frame, area: Rect, name_input: &str) {
    let popup = center_rect(area, 44, 5);
    let prompt = Paragraph::new(vec![
        Line::from(format!("Name: {}_", name_input)),
        Line::from(Span::styled(
            "Enter: save   Esc: discard",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .title("Game over")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::White)),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(prompt, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
