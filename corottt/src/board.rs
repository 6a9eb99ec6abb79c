use ratatui::{
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Widget},
};
use ttt_types::{Player, Square, BOARD_SIZE};

use crate::game::Snapshot;

pub struct BoardView;

impl BoardView {
    pub fn draw(&self, snapshot: &Snapshot) -> impl Widget + '_ {
        let mut lines = Vec::with_capacity(2 * BOARD_SIZE + 3);
        let header: String = (0..BOARD_SIZE)
            .map(|col| format!(" {} ", (b'A' + col as u8) as char))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::raw(format!("   {header}")));
        for row in 0..BOARD_SIZE {
            if row > 0 {
                lines.push(Line::raw("   ---+---+---"));
            }
            let mut spans = vec![Span::raw(format!("{}  ", row + 1))];
            for col in 0..BOARD_SIZE {
                if col > 0 {
                    spans.push(Span::raw("|"));
                }
                spans.push(Span::raw(" "));
                spans.push(mark(snapshot.board.get(Square::from_coords(row, col))));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::default());
        lines.push(status(snapshot));
        lines.push(Line::raw(format!(
            "X {}  O {}  draws {}",
            snapshot.wins[Player::X],
            snapshot.wins[Player::O],
            snapshot.draws
        )));

        let title = format!(
            "Round {} ({} left)",
            snapshot.round, snapshot.rounds_left
        );
        Paragraph::new(Text::from(lines)).block(Block::bordered().title(title))
    }
}

fn mark(cell: Option<Player>) -> Span<'static> {
    match cell {
        Some(player) => Span::styled(player.to_string(), Style::new().fg(color(player)).bold()),
        None => Span::raw(" "),
    }
}

fn status(snapshot: &Snapshot) -> Line<'static> {
    match snapshot.result {
        Some(result) => Line::raw(result.to_string()).bold(),
        None => Line::from(vec![
            mark(Some(snapshot.to_move)),
            Span::raw(" to move"),
        ]),
    }
}

pub fn color(player: Player) -> Color {
    match player {
        Player::X => Color::Red,
        Player::O => Color::Blue,
    }
}
