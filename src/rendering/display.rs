//! # Display Management
//!
//! Draws a [`ViewModel`] into a ratatui frame.

use crate::rendering::{CellView, Dialog, ViewModel};
use crate::{LogTone, TileKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Width of one board cell in terminal columns.
const CELL_WIDTH: usize = 5;

/// Width of the status panel in terminal columns.
const PANEL_WIDTH: u16 = 34;

/// Terminal display for the game.
#[derive(Debug, Clone, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    pub fn new() -> Self {
        Self
    }

    /// Renders the complete game screen.
    pub fn render(&self, frame: &mut Frame, view: &ViewModel) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Board and panel
                Constraint::Length(1), // Controls
            ])
            .split(frame.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(PANEL_WIDTH)])
            .split(chunks[0]);

        frame.render_widget(self.render_board(view), body[0]);
        frame.render_widget(self.render_panel(view), body[1]);
        frame.render_widget(self.render_controls(), chunks[1]);

        if let Some(dialog) = view.dialog() {
            let area = centered(frame.area(), 60, 12);
            frame.render_widget(Clear, area);
            frame.render_widget(self.render_dialog(&dialog), area);
        }
    }

    fn render_board(&self, view: &ViewModel) -> Paragraph<'static> {
        let mut lines = vec![Line::from("")];
        for y in 0..view.height {
            let spans: Vec<Span> = view.row(y).iter().map(cell_span).collect();
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(format!(" Level {} ", view.level)),
            )
            .alignment(Alignment::Center)
    }

    fn render_panel(&self, view: &ViewModel) -> Paragraph<'static> {
        let mut lines = vec![
            Line::from(""),
            stat_line("energy", format!("{}/{}", view.energy, view.max_energy)),
            stat_line("surface", view.surface.to_string()),
            stat_line("smooth", "0".repeat(view.roundness as usize)),
            stat_line("score", view.score.to_string()),
            stat_line("lives", "♥".repeat(view.lives as usize)),
            Line::from(""),
        ];

        for entry in &view.events {
            lines.push(Line::from(Span::styled(
                format!("  {}", entry.text),
                tone_style(entry.tone),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(" smoothlife "),
            )
    }

    fn render_dialog(&self, dialog: &Dialog) -> Paragraph<'static> {
        let mut lines = vec![Line::from("")];
        lines.extend(dialog.lines.iter().map(|line| Line::from(line.clone())));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            dialog.prompt,
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(dialog.title),
            )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("E", Style::default().fg(Color::Cyan)),
            Span::raw(" to use tile | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

fn cell_span(cell: &CellView) -> Span<'static> {
    let text = format!("{:^width$}", cell.label(), width = CELL_WIDTH);
    if cell.has_player {
        return Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    }
    Span::styled(text, kind_style(cell.kind))
}

fn kind_style(kind: TileKind) -> Style {
    match kind {
        TileKind::Add => Style::default().fg(Color::LightRed),
        TileKind::Subtract => Style::default().fg(Color::LightBlue),
        TileKind::Multiply => Style::default().fg(Color::LightGreen),
        TileKind::Divide => Style::default().fg(Color::LightYellow),
        TileKind::Exit => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        TileKind::Empty => Style::default().fg(Color::DarkGray),
    }
}

/// Colour for an event log entry.
pub fn tone_style(tone: LogTone) -> Style {
    match tone {
        LogTone::Amazing => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        LogTone::Good => Style::default().fg(Color::Green),
        LogTone::Bad => Style::default().fg(Color::Red),
        LogTone::Neutral => Style::default().fg(Color::Gray),
    }
}

fn stat_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<8}", label), Style::default().fg(Color::Yellow)),
        Span::styled(
            value,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
