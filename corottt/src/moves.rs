use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, Widget},
};
use ttt_types::Player;

use crate::{board::color, game::Snapshot};

/// Moves of the round in progress.
pub struct MoveList;

impl MoveList {
    pub fn draw(&self, snapshot: &Snapshot) -> impl Widget + '_ {
        let block = Block::new()
            .borders(Borders::ALL)
            .title(Line::raw("Moves").left_aligned());
        let mut player = Player::X;
        let items = snapshot
            .history
            .moves
            .iter()
            .enumerate()
            .map(|(idx, sq)| {
                let line = Line::from(vec![
                    Span::raw(format!("{:>2}. ", idx + 1)),
                    Span::styled(player.to_string(), Style::new().fg(color(player)).bold()),
                    Span::raw(format!(" {sq}")),
                ]);
                player = player.other();
                line
            })
            .collect::<Vec<_>>();
        List::new(items).block(block)
    }
}
