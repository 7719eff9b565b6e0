use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

pub struct StatusBar {
    pub connected: bool,
    pub loading: bool,
    pub notice: Option<(NoticeKind, String)>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            connected: false,
            loading: false,
            notice: None,
        }
    }

    pub fn success(&mut self, text: String) {
        self.notice = Some((NoticeKind::Success, text));
    }

    pub fn error(&mut self, text: String) {
        self.notice = Some((NoticeKind::Error, text));
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let bg = Block::default().style(THEME.header_style());
        frame.render_widget(bg, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(18)])
            .split(area);

        // --- Left side: notice, spinner, or key hints ---
        let left_content = match &self.notice {
            Some((NoticeKind::Error, text)) => Line::from(vec![
                Span::styled(
                    " ! ",
                    Style::default().fg(THEME.error).add_modifier(Modifier::BOLD),
                ),
                Span::styled(text.as_str(), Style::default().fg(THEME.warning)),
            ]),
            Some((NoticeKind::Success, text)) => Line::from(vec![
                Span::styled(
                    " \u{2713} ",
                    Style::default()
                        .fg(THEME.success)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(text.as_str(), THEME.success_style()),
            ]),
            None if self.loading => Line::from(Span::styled(
                " Waiting for network...",
                Style::default().fg(THEME.text_accent),
            )),
            None => Line::from(vec![
                Span::styled(" Tab", Style::default().fg(THEME.text_accent)),
                Span::styled(":Action  ", Style::default().fg(THEME.text_muted)),
                Span::styled("Enter", Style::default().fg(THEME.text_accent)),
                Span::styled(":Submit  ", Style::default().fg(THEME.text_muted)),
                Span::styled("r", Style::default().fg(THEME.text_accent)),
                Span::styled(":Refresh  ", Style::default().fg(THEME.text_muted)),
                Span::styled("e", Style::default().fg(THEME.text_accent)),
                Span::styled(":Export  ", Style::default().fg(THEME.text_muted)),
                Span::styled("?", Style::default().fg(THEME.text_accent)),
                Span::styled(":Help  ", Style::default().fg(THEME.text_muted)),
                Span::styled("q", Style::default().fg(THEME.text_accent)),
                Span::styled(":Quit", Style::default().fg(THEME.text_muted)),
            ]),
        };

        let left = Paragraph::new(left_content).style(THEME.header_style());
        frame.render_widget(left, chunks[0]);

        // --- Right side: connection status ---
        let (dot_color, status_text) = if self.connected {
            (THEME.success, "Connected")
        } else {
            (THEME.error, "Disconnected")
        };

        let right_content = Line::from(vec![
            Span::styled("\u{25cf} ", Style::default().fg(dot_color)),
            Span::styled(status_text, Style::default().fg(dot_color)),
            Span::raw(" "),
        ]);

        let right = Paragraph::new(right_content)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(right, chunks[1]);
    }
}
