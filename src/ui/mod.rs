mod encounter_scene;
mod gallery_scene;
pub mod game_common;
mod info_panel;
pub mod input;

use crate::app::{App, View};
use crate::progression::lock_recover;
use game_common::{create_game_layout, render_banner, render_status_bar, Tone};
use ratatui::{style::Color, Frame};

const INFO_PANEL_WIDTH: u16 = 26;

/// Draw one frame of the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.size();
    let layout = create_game_layout(frame, area, " Angler ", Color::Cyan, INFO_PANEL_WIDTH);

    let controls: &[(&str, &str)] = match app.view {
        View::Encounter => &[
            ("[Space]", "Cast/Reel"),
            ("[G]", "Gallery"),
            ("[R]", "Reset"),
            ("[Q]", "Quit"),
        ],
        View::Gallery => &[("[G]", "Back"), ("[Q]", "Quit")],
    };
    let status_color = if app.confirm_reset {
        Color::Red
    } else {
        Color::Yellow
    };

    match app.view {
        View::Encounter => {
            encounter_scene::render_encounter_scene(frame, layout.content, &app.encounter)
        }
        View::Gallery => {
            let gallery = lock_recover(app.gallery());
            gallery_scene::render_gallery_scene(frame, layout.content, &gallery);
        }
    }

    if app.confirm_reset {
        render_banner(
            frame,
            layout.content,
            Tone::Bad,
            "Reset all progress?",
            "Level, totals and gallery will be wiped. [Y] to confirm",
        );
    }

    render_status_bar(
        frame,
        layout.status_bar,
        app.status_text(),
        status_color,
        controls,
    );
    info_panel::draw_info_panel(frame, layout.info_panel, app);
}
