//! Encounter scene: timing dial, paying-out line, balance track, catch card.
//!
//! ```text
//! +-------------------------------+--------+
//! |          . o o o .            |  ____  |
//! |        o           o          | |    | |
//! |       o      +      *         | |<>  | |
//! |        o           o          | |####| |
//! |          . o o o .            | |____| |
//! |   Line [#######.....] 210/350 |  62%   |
//! +-------------------------------+--------+
//! ```

use super::game_common::{render_banner, text_gauge, Tone};
use crate::core::constants::BALANCE_TRACK_HEIGHT;
use crate::encounter::{Encounter, EncounterState};
use crate::fishing::{CatchCandidate, CatchCategory};
use crate::minigames::timing::{classify_angle, normalize_angle};
use crate::minigames::{BalanceCheck, SkillOutcome, TimingCheck};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const DIAL_SEGMENTS: usize = 36;
const DIAL_RADIUS_ROWS: usize = 6;
/// Terminal cells are roughly twice as tall as wide.
const DIAL_RADIUS_COLS: usize = DIAL_RADIUS_ROWS * 2;
const TRACK_PANEL_WIDTH: u16 = 12;

pub fn render_encounter_scene(frame: &mut Frame, area: Rect, encounter: &Encounter) {
    let balance = encounter.balance();
    let show_track = encounter.is_reeling() || balance.is_showing_result();

    let main_area = if show_track {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(TRACK_PANEL_WIDTH)])
            .split(area);
        draw_balance_track(frame, chunks[1], balance);
        chunks[0]
    } else {
        area
    };

    match encounter.state() {
        EncounterState::Idle => draw_water(frame, main_area, None),
        EncounterState::ThrowCheck => draw_dial(frame, main_area, encounter.timing()),
        EncounterState::Casting | EncounterState::ReadyToReel => {
            draw_water(frame, main_area, Some(encounter))
        }
        EncounterState::ReelCheck => draw_reel_status(frame, main_area, balance),
        EncounterState::Resolved => {
            if let Some(candidate) = encounter.candidate() {
                let exp = encounter.award().map_or(0, |a| a.exp_gained);
                draw_catch_card(frame, main_area, candidate, exp);
            }
        }
    }

    // Result banners sit on top of whatever stage follows them
    if let Some(outcome) = encounter.timing().outcome {
        if encounter.timing().is_showing_result() {
            render_banner(frame, main_area, outcome_tone(outcome), outcome.message(), "");
        }
    }
    if let Some(result) = balance.result {
        if balance.is_showing_result() {
            let tone = if result.is_success() { Tone::Good } else { Tone::Bad };
            render_banner(frame, main_area, tone, result.message(), balance.difficulty.name());
        }
    }
}

fn outcome_tone(outcome: SkillOutcome) -> Tone {
    match outcome {
        SkillOutcome::Great => Tone::Good,
        SkillOutcome::Good => Tone::Notice,
        SkillOutcome::Miss => Tone::Bad,
    }
}

fn outcome_color(outcome: SkillOutcome) -> Color {
    match outcome {
        SkillOutcome::Great => Color::Green,
        SkillOutcome::Good => Color::Yellow,
        SkillOutcome::Miss => Color::DarkGray,
    }
}

pub fn category_color(category: CatchCategory) -> Color {
    match category {
        CatchCategory::Junk => Color::DarkGray,
        CatchCategory::Common => Color::White,
        CatchCategory::Rare => Color::Cyan,
        CatchCategory::Legendary => Color::Magenta,
    }
}

/// Segment index (0 at twelve o'clock, clockwise) containing `angle`.
fn segment_for_angle(angle: f64) -> usize {
    let width = 360.0 / DIAL_SEGMENTS as f64;
    ((normalize_angle(angle) / width) as usize).min(DIAL_SEGMENTS - 1)
}

/// Ring of coloured segments with the pointer's segment highlighted.
fn dial_lines(timing: &TimingCheck) -> Vec<Line<'static>> {
    let rows = DIAL_RADIUS_ROWS * 2 + 1;
    let cols = DIAL_RADIUS_COLS * 2 + 1;
    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default()); cols]; rows];

    let pointer_segment = segment_for_angle(timing.pointer_angle);
    let width = 360.0 / DIAL_SEGMENTS as f64;

    for segment in 0..DIAL_SEGMENTS {
        let mid = segment as f64 * width + width / 2.0;
        let radians = mid.to_radians();
        let x = DIAL_RADIUS_COLS as f64 + (DIAL_RADIUS_COLS as f64 * radians.sin()).round();
        let y = DIAL_RADIUS_ROWS as f64 - (DIAL_RADIUS_ROWS as f64 * radians.cos()).round();
        let (col, row) = (x as usize, y as usize);

        let cell = if segment == pointer_segment {
            (
                '@',
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            let outcome = classify_angle(mid, timing.target_angle);
            let glyph = if outcome == SkillOutcome::Miss { '.' } else { 'o' };
            (glyph, Style::default().fg(outcome_color(outcome)))
        };
        if let Some(slot) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = cell;
        }
    }

    grid[DIAL_RADIUS_ROWS][DIAL_RADIUS_COLS] = ('+', Style::default().fg(Color::DarkGray));

    grid.into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(c, style)| Span::styled(c.to_string(), style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn draw_dial(frame: &mut Frame, area: Rect, timing: &TimingCheck) {
    let mut lines = dial_lines(timing);
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("o", Style::default().fg(Color::Green)),
        Span::styled(" Great  ", Style::default().fg(Color::DarkGray)),
        Span::styled("o", Style::default().fg(Color::Yellow)),
        Span::styled(" Good  ", Style::default().fg(Color::DarkGray)),
        Span::styled("@", Style::default().fg(Color::White)),
        Span::styled(" Pointer", Style::default().fg(Color::DarkGray)),
    ]));

    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Throw "))
            .alignment(Alignment::Center),
        area,
    );
}

/// Water, bobber and, once a line is out, the line gauge.
fn draw_water(frame: &mut Frame, area: Rect, encounter: Option<&Encounter>) {
    let water = Style::default().fg(Color::Blue);
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~", water)),
    ];

    match encounter {
        None => {
            lines.push(Line::from(Span::styled("  ~~~~~~~~~~~~~~~~~~~~~~  ", water)));
            lines.push(Line::from(Span::styled("~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~", water)));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "The water is calm.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        Some(encounter) => {
            let biting = encounter.state() == EncounterState::ReadyToReel;
            let bobber = if biting {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(vec![
                Span::styled("  ~~~~~~~~~", water),
                Span::styled(if biting { " ! " } else { " O " }, bobber),
                Span::styled("~~~~~~~~~~  ", water),
            ]));
            lines.push(Line::from(Span::styled("~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~", water)));
            lines.push(Line::from(""));

            let cap = encounter.line_cap();
            let length = encounter.line_length();
            let ratio = if cap > 0.0 { length / cap } else { 0.0 };
            let color = encounter
                .throw_outcome()
                .map_or(Color::White, outcome_color);
            lines.push(Line::from(vec![
                Span::styled("Line ", Style::default().fg(Color::DarkGray)),
                Span::styled(text_gauge(ratio, 20), Style::default().fg(color)),
                Span::raw(format!(" {:.0}/{:.0}", length, cap)),
            ]));
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Lake "))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_reel_status(frame: &mut Frame, area: Rect, balance: &BalanceCheck) {
    let progress_color = if balance.zone_overlaps_token() {
        Color::Green
    } else {
        Color::Red
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            balance.difficulty.name(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Reel ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                text_gauge(balance.progress, 20),
                Style::default().fg(progress_color),
            ),
            Span::raw(format!(" {:>3.0}%", balance.progress * 100.0)),
        ]),
        Line::from(format!("Time left: {:.1}s", balance.time_remaining())),
        Line::from(""),
        Line::from(Span::styled(
            "Keep the fish inside the green zone.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Reel "))
            .alignment(Alignment::Center),
        area,
    );
}

/// Screen row (0 = top) for a track height in a track drawn with `rows` rows.
fn track_row(y: f64, rows: usize) -> usize {
    let last = rows.saturating_sub(1);
    let index = ((y / BALANCE_TRACK_HEIGHT) * rows as f64).floor().max(0.0) as usize;
    last - index.min(last)
}

/// Inclusive (top, bottom) row range covered by a (bottom, top) span.
fn span_rows(span: (f64, f64), rows: usize) -> (usize, usize) {
    let (bottom, top) = span;
    // Nudge the top edge down so a span ending on a row boundary does not
    // claim the row above it.
    (track_row(top - f64::EPSILON * BALANCE_TRACK_HEIGHT, rows), track_row(bottom, rows))
}

fn draw_balance_track(frame: &mut Frame, area: Rect, balance: &BalanceCheck) {
    let block = Block::default().borders(Borders::ALL).title(" Line ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 || inner.width < 3 {
        return;
    }

    let rows = inner.height.saturating_sub(1) as usize;
    let (zone_top, zone_bottom) = span_rows(balance.zone_span(), rows);
    let (token_top, token_bottom) = span_rows(balance.token_span(), rows);
    let zone_color = if balance.zone_overlaps_token() {
        Color::Green
    } else {
        Color::Blue
    };
    let width = inner.width.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = (0..rows)
        .map(|row| {
            let in_zone = row >= zone_top && row <= zone_bottom;
            let in_token = row >= token_top && row <= token_bottom;
            let fill = if in_zone { "█" } else { " " };
            let mut spans = vec![Span::styled("|", Style::default().fg(Color::DarkGray))];
            if in_token {
                let pad = width.saturating_sub(2) / 2;
                let style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
                spans.push(Span::styled(fill.repeat(pad), Style::default().fg(zone_color)));
                spans.push(Span::styled("<>", style));
                spans.push(Span::styled(
                    fill.repeat(width.saturating_sub(pad + 2)),
                    Style::default().fg(zone_color),
                ));
            } else {
                spans.push(Span::styled(fill.repeat(width), Style::default().fg(zone_color)));
            }
            spans.push(Span::styled("|", Style::default().fg(Color::DarkGray)));
            Line::from(spans)
        })
        .collect();

    lines.push(Line::from(format!("{:>3.0}%", balance.progress * 100.0)));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn draw_catch_card(frame: &mut Frame, area: Rect, candidate: &CatchCandidate, exp: u32) {
    let color = category_color(candidate.category());
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            candidate.name(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("[{}]", candidate.category().name()),
            Style::default().fg(color),
        )),
        Line::from(""),
        Line::from(format!("Weight: {:.2} kg", candidate.weight)),
        Line::from(Span::styled(
            format!("+{} XP", exp),
            Style::default().fg(Color::Green),
        )),
        Line::from(""),
        Line::from(Span::styled(
            candidate.description(),
            Style::default().fg(Color::Gray),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(" Catch "),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
