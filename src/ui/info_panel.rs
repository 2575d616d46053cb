use super::encounter_scene::category_color;
use super::game_common::{render_info_panel_frame, text_gauge};
use crate::app::App;
use crate::core::constants::MAX_LEVEL;
use crate::progression::{lock_recover, ProgressionLedger};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Right-hand column: angler progress on top, message log below.
pub fn draw_info_panel(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(3)])
        .split(area);

    {
        let ledger = lock_recover(app.ledger());
        draw_progress(frame, chunks[0], &ledger, app.level_up_timer > 0.0);
    }
    draw_message_log(frame, chunks[1], app);
}

fn draw_progress(frame: &mut Frame, area: Rect, ledger: &ProgressionLedger, level_up: bool) {
    let inner = render_info_panel_frame(frame, area);
    let gauge_width = (inner.width as usize).saturating_sub(2).min(16);

    let level_style = if level_up {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };

    let exp_line = if ledger.current_level() >= MAX_LEVEL {
        Line::from(Span::styled("MAX", Style::default().fg(Color::Yellow)))
    } else {
        Line::from(format!(
            "{} / {} XP",
            ledger.current_exp(),
            ledger.next_level_requirement()
        ))
    };

    let unlocked = ledger.max_unlocked_category();
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Level {}", ledger.current_level()),
            level_style,
        )),
        Line::from(Span::styled(
            text_gauge(ledger.level_progress_ratio(), gauge_width),
            Style::default().fg(Color::Green),
        )),
        exp_line,
        Line::from(""),
        Line::from(format!("Caught: {}", ledger.total_caught())),
        Line::from(format!("Weight: {:.2} kg", ledger.total_weight())),
        Line::from(vec![
            Span::styled("Up to: ", Style::default().fg(Color::DarkGray)),
            Span::styled(unlocked.name(), Style::default().fg(category_color(unlocked))),
        ]),
    ];
    if level_up {
        lines.push(Line::from(Span::styled(
            "LEVEL UP!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Newest message first, clipped to the panel width.
fn draw_message_log(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Log ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let max_width = inner.width as usize;
    let lines: Vec<Line> = app
        .messages
        .iter()
        .rev()
        .take(inner.height as usize)
        .enumerate()
        .map(|(i, message)| {
            let color = if i == 0 { Color::White } else { Color::DarkGray };
            Line::from(Span::styled(
                clip(message, max_width),
                Style::default().fg(color),
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn clip(message: &str, max_width: usize) -> String {
    if message.chars().count() <= max_width {
        return message.to_string();
    }
    let mut clipped: String = message.chars().take(max_width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}
