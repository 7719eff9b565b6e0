use alloy::primitives::Address;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;
use crate::utils;

pub struct Header {
    pub chain_id: u64,
    pub connected: bool,
    pub account: Option<Address>,
}

impl Header {
    pub fn new() -> Self {
        Self {
            chain_id: 0,
            connected: false,
            account: None,
        }
    }

    fn chain_name(&self) -> &'static str {
        match self.chain_id {
            1 => "Mainnet",
            11155111 => "Sepolia",
            17000 => "Holesky",
            31337 => "Localhost",
            _ => "Unknown",
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let header_block = Block::default().style(THEME.header_style());
        frame.render_widget(header_block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(12), Constraint::Min(0)])
            .split(area);

        let title = Paragraph::new(Span::styled(
            " vault-tui",
            Style::default()
                .fg(THEME.text_accent)
                .add_modifier(Modifier::BOLD),
        ))
        .style(THEME.header_style());
        frame.render_widget(title, chunks[0]);

        let account_span = match &self.account {
            Some(account) => Span::styled(utils::truncate_address(account), THEME.address_style()),
            None => Span::styled("not connected", THEME.muted_style()),
        };

        let info = Line::from(vec![
            Span::styled(self.chain_name(), Style::default().fg(THEME.text)),
            Span::styled(" | ", THEME.muted_style()),
            account_span,
            Span::raw(" "),
        ]);
        let info_paragraph = Paragraph::new(info)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(info_paragraph, chunks[1]);
    }
}
