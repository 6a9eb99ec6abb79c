use ratatui::{
    style::Stylize,
    text::{Line, Text},
    widgets::{Block, Paragraph, Widget},
};

use crate::game::Snapshot;

/// Per-move numbers from the last engine decision.
pub struct AiDebugView;

impl AiDebugView {
    pub fn draw(&self, snapshot: &Snapshot) -> impl Widget + '_ {
        let mut lines = Vec::new();
        if let Some(stats) = &snapshot.stats {
            lines.push(Line::raw(format!(
                "{} as {}: {} nodes",
                stats.agent, stats.player, stats.nodes
            )));
            for mv in &stats.moves {
                let text = format!(
                    "{}{}  {:>8}  {:>8.3}",
                    if mv.square == stats.chosen { '>' } else { ' ' },
                    mv.square,
                    mv.visits,
                    mv.value
                );
                if mv.square == stats.chosen {
                    lines.push(Line::raw(text).bold());
                } else {
                    lines.push(Line::raw(text));
                }
            }
        }
        Paragraph::new(Text::from(lines)).block(Block::bordered().title("Search"))
    }
}
