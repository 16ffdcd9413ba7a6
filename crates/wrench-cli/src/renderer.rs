//! Markdown output through termimad, or verbatim with `--no-color`.

use std::fmt::Display;

use termimad::{crossterm::style::Color, MadSkin};

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.bullet.set_fg(Color::Cyan);
        Self { rich_enabled, skin }
    }

    /// Print anything with a markdown `Display` impl.
    pub fn render(&self, content: &impl Display) {
        let markdown = content.to_string();
        if self.rich_enabled {
            print!("{}", self.skin.term_text(&markdown));
        } else {
            print!("{markdown}");
        }
    }
}
