use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

#[derive(Debug, Default)]
pub struct Popup<'a> {
    title: Line<'a>,
    content: Text<'a>,
    border_style: Style,
    style: Style,
}

impl<'a> Popup<'a> {
    pub fn title(self, title: impl Into<Line<'a>>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    pub fn content(self, content: impl Into<Text<'a>>) -> Self {
        Self {
            content: content.into(),
            ..self
        }
    }

    pub fn border_style(self, border_style: Style) -> Self {
        Self {
            border_style,
            ..self
        }
    }

    /// `width` x `height` rectangle in the middle of `area`.
    pub fn area(area: Rect, width: u16, height: u16) -> Rect {
        let [area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        area
    }
}

impl Widget for Popup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Cells under the popup would otherwise show through.
        Clear.render(area, buf);
        let block = Block::new()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(self.border_style);
        Paragraph::new(self.content)
            .wrap(Wrap { trim: true })
            .style(self.style)
            .centered()
            .block(block)
            .render(area, buf);
    }
}
