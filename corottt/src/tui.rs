use std::io;

use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Style},
    DefaultTerminal, Frame,
};

use crate::{
    ai_debug::AiDebugView, board::BoardView, game::Snapshot, moves::MoveList, popup::Popup,
    screen::Screen,
};

/// Full-screen view. The terminal must come from `ratatui::init` and be
/// handed back with `ratatui::restore` once the run is over.
pub struct TuiScreen {
    terminal: DefaultTerminal,
}

impl TuiScreen {
    pub fn new(terminal: DefaultTerminal) -> Self {
        Self { terminal }
    }
}

impl Screen for TuiScreen {
    fn draw(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame, snapshot))?;
        Ok(())
    }
}

pub fn render(frame: &mut Frame, snapshot: &Snapshot) {
    let horizontal = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]);
    let vertical = Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)]);
    let [board, right] = horizontal.areas(frame.area());
    let [moves, search] = vertical.areas(right);
    frame.render_widget(BoardView.draw(snapshot), board);
    frame.render_widget(MoveList.draw(snapshot), moves);
    frame.render_widget(AiDebugView.draw(snapshot), search);
    if let Some(text) = &snapshot.popup {
        let width = u16::try_from(text.len() + 4).unwrap_or(u16::MAX);
        let area = Popup::area(frame.area(), width, 3);
        frame.render_widget(
            Popup::default()
                .title("Paused")
                .content(text.as_str())
                .border_style(Style::new().fg(Color::Yellow)),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::{game::Game, input::NoInput, screen::Recorder};

    fn rendered(snapshot: &Snapshot) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, snapshot)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn panels_and_popup() {
        let mut game = Game::new(2, Box::new(NoInput), Box::new(Recorder::new().0));
        game.apply_move(ttt_types::Square(4));
        let text = rendered(&game.snapshot(None));
        assert!(text.contains("Round 1 (2 left)"));
        assert!(text.contains("Moves"));
        assert!(text.contains("1. X B2"));
        assert!(!text.contains("Paused"));

        let text = rendered(&game.snapshot(Some("hold on".to_owned())));
        assert!(text.contains("Paused"));
        assert!(text.contains("hold on"));
    }
}
