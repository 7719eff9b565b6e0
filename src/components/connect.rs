use alloy::primitives::Address;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

/// Shown while no signing account is connected. A failed connect leaves the
/// prompt up, with the latest failure reason on the hint line so the user
/// knows what to fix before retrying.
pub struct ConnectPrompt {
    pub contract: Address,
    pub hint: Option<String>,
}

impl ConnectPrompt {
    pub fn new(contract: Address) -> Self {
        Self {
            contract,
            hint: None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width.min(64);
        let height = 9u16.min(area.height);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        let popup_area = Rect::new(x, y, width, height);

        let block = Block::default()
            .title(" Assessment Vault ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .style(Style::default().bg(THEME.surface));

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No wallet account connected",
                Style::default().fg(THEME.text),
            ))
            .alignment(Alignment::Center),
            Line::from(vec![
                Span::styled("Contract: ", THEME.muted_style()),
                Span::styled(format!("{}", self.contract), THEME.address_style()),
            ])
            .alignment(Alignment::Center),
            Line::from(""),
            Line::from(vec![
                Span::styled("[Enter] ", THEME.accent_style()),
                Span::styled("Connect Wallet", Style::default().fg(THEME.text)),
            ])
            .alignment(Alignment::Center),
        ];

        if let Some(ref hint) = self.hint {
            lines.push(Line::from(""));
            lines.push(
                Line::from(Span::styled(hint.as_str(), THEME.muted_style()))
                    .alignment(Alignment::Center),
            );
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }
}
