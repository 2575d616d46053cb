//! Gallery of every species, discovered or not.

use super::encounter_scene::category_color;
use crate::fishing::CatchSpecies;
use crate::progression::Gallery;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_gallery_scene(frame: &mut Frame, area: Rect, gallery: &Gallery) {
    let (found, total) = gallery.completion();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Gallery {}/{} ", found, total));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from("")];
    lines.extend(
        gallery
            .entries()
            .into_iter()
            .map(|(species, count)| entry_line(species, count)),
    );
    frame.render_widget(Paragraph::new(lines), inner);
}

fn entry_line(species: &CatchSpecies, count: u32) -> Line<'static> {
    let color = category_color(species.category);
    let tag = Span::styled(
        format!("  [{:<9}] ", species.category.name()),
        Style::default().fg(color),
    );
    if count == 0 {
        return Line::from(vec![
            tag,
            Span::styled("???", Style::default().fg(Color::DarkGray)),
        ]);
    }
    Line::from(vec![
        tag,
        Span::styled(
            format!("{:<18}", species.name),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("x{}", count), Style::default().fg(Color::White)),
    ])
}
