use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Returns true if it consumed the event
    pub fn handle_key(&mut self, _key: KeyEvent) -> bool {
        if self.visible {
            self.visible = false;
            true
        } else {
            false
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let popup_width = area.width * 55 / 100;
        let popup_height = (area.height * 60 / 100).min(20);
        let x = area.x + (area.width - popup_width) / 2;
        let y = area.y + (area.height - popup_height) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .style(Style::default().bg(THEME.surface));

        let entry = |keys: &'static str, text: &'static str| {
            Line::from(vec![
                Span::styled(keys, Style::default().fg(THEME.text_accent)),
                Span::styled(text, Style::default().fg(THEME.text)),
            ])
        };

        let section = |title: &'static str| {
            Line::from(Span::styled(
                title,
                Style::default()
                    .fg(THEME.text_accent)
                    .add_modifier(Modifier::BOLD),
            ))
        };

        let help_text = vec![
            section("Vault"),
            entry("  0-9 .    ", "Edit amount"),
            entry("  Tab/d/w  ", "Select Deposit / Withdraw"),
            entry("  Enter    ", "Submit transaction"),
            entry("  r        ", "Refresh balance"),
            Line::from(""),
            section("Activity"),
            entry("  \u{2191}/k \u{2193}/j  ", "Move through the log"),
            entry("  e        ", "Export log to CSV"),
            Line::from(""),
            section("Connect"),
            entry("  Enter/c  ", "Connect wallet account"),
            Line::from(""),
            section("Other"),
            entry("  ?        ", "Toggle this help"),
            entry("  q        ", "Quit"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
    }
}
