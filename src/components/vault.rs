use alloy::primitives::{Address, U256};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::Component;
use crate::events::{Action, AppEvent};
use crate::theme::THEME;
use crate::utils;

/// The main panel: contract balance, the shared amount field, and the two
/// actions that consume it.
pub struct VaultPanel {
    pub account: Option<Address>,
    pub balance: Option<U256>,
    pub action: Action,
    pub validation_error: Option<String>,
    contract: Address,
    input: String,
    cursor: usize,
}

impl VaultPanel {
    pub fn new(contract: Address) -> Self {
        Self {
            account: None,
            balance: None,
            action: Action::Deposit,
            validation_error: None,
            contract,
            input: String::new(),
            cursor: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Called after a confirmed submission; the field keeps its value on
    /// failure so the user can retry or correct it.
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
        self.validation_error = None;
    }

    fn toggle_action(&mut self) {
        self.action = match self.action {
            Action::Deposit => Action::Withdraw,
            Action::Withdraw => Action::Deposit,
        };
    }

    /// Validate the amount field and turn it into a submission request.
    /// Nothing leaves this component when validation fails.
    fn submit(&mut self) -> Option<AppEvent> {
        match utils::parse_eth(&self.input) {
            Ok(amount) => {
                self.validation_error = None;
                Some(AppEvent::SubmitRequested {
                    action: self.action,
                    amount,
                })
            }
            Err(msg) => {
                self.validation_error = Some(msg.clone());
                Some(AppEvent::Error(msg))
            }
        }
    }
}

impl Component for VaultPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_action();
                None
            }
            KeyCode::Char('d') => {
                self.action = Action::Deposit;
                None
            }
            KeyCode::Char('w') => {
                self.action = Action::Withdraw;
                None
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                self.input.insert(self.cursor, c);
                self.cursor += 1;
                self.validation_error = None;
                None
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.input.remove(self.cursor);
                }
                self.validation_error = None;
                None
            }
            KeyCode::Delete => {
                if self.cursor < self.input.len() {
                    self.input.remove(self.cursor);
                }
                self.validation_error = None;
                None
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                if self.cursor < self.input.len() {
                    self.cursor += 1;
                }
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = self.input.len();
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Vault ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let balance_span = match self.balance {
            Some(balance) => Span::styled(
                utils::format_eth(balance),
                THEME.eth_style().add_modifier(Modifier::BOLD),
            ),
            None => Span::styled("loading...", THEME.muted_style()),
        };

        let account_span = match &self.account {
            Some(account) => Span::styled(format!("{account}"), THEME.address_style()),
            None => Span::styled("not connected", THEME.muted_style()),
        };

        let amount_display = if self.input.is_empty() {
            Span::styled("enter amount in ETH_", THEME.muted_style())
        } else {
            let (before, after) = self.input.split_at(self.cursor);
            Span::styled(
                format!("{before}_{after}"),
                Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
            )
        };

        let action_span = |action: Action| {
            let label = format!("[ {} ]", action.label());
            if action == self.action {
                Span::styled(label, THEME.selected_style())
            } else {
                Span::styled(label, THEME.muted_style())
            }
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("  Contract: ", THEME.muted_style()),
                Span::styled(format!("{}", self.contract), THEME.address_style()),
            ]),
            Line::from(vec![
                Span::styled("  Account:  ", THEME.muted_style()),
                account_span,
            ]),
            Line::from(vec![
                Span::styled("  Balance:  ", THEME.muted_style()),
                balance_span,
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Amount:   ", THEME.muted_style()),
                amount_display,
            ]),
            Line::from(vec![
                Span::raw("            "),
                action_span(Action::Deposit),
                Span::raw("  "),
                action_span(Action::Withdraw),
            ]),
        ];

        if let Some(ref err) = self.validation_error {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.as_str(), THEME.error_style()),
            ]));
        }

        let paragraph = Paragraph::new(lines).style(Style::default().fg(THEME.text));
        frame.render_widget(paragraph, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn panel() -> VaultPanel {
        VaultPanel::new(Address::from_slice(&[0xd8; 20]))
    }

    fn type_str(panel: &mut VaultPanel, s: &str) {
        for c in s.chars() {
            panel.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_empty_amount_blocks_submission() {
        let mut p = panel();
        let event = p.handle_key(key(KeyCode::Enter));
        assert!(matches!(event, Some(AppEvent::Error(_))));
        assert!(p.validation_error.is_some());
    }

    #[test]
    fn test_deposit_one_eth_submits_wei_amount() {
        let mut p = panel();
        type_str(&mut p, "1.0");

        let event = p.handle_key(key(KeyCode::Enter));
        match event {
            Some(AppEvent::SubmitRequested { action, amount }) => {
                assert_eq!(action, Action::Deposit);
                assert_eq!(amount, U256::from(10u64).pow(U256::from(18u64)));
            }
            other => panic!("expected SubmitRequested, got {other:?}"),
        }
        // Input is only cleared once the submission confirms
        assert_eq!(p.input(), "1.0");
    }

    #[test]
    fn test_withdraw_selected_via_key_and_tab() {
        let mut p = panel();
        p.handle_key(key(KeyCode::Char('w')));
        assert_eq!(p.action, Action::Withdraw);

        p.handle_key(key(KeyCode::Tab));
        assert_eq!(p.action, Action::Deposit);

        type_str(&mut p, "0.5");
        p.handle_key(key(KeyCode::Char('w')));
        let event = p.handle_key(key(KeyCode::Enter));
        match event {
            Some(AppEvent::SubmitRequested { action, amount }) => {
                assert_eq!(action, Action::Withdraw);
                assert_eq!(amount, U256::from(500_000_000_000_000_000u64));
            }
            other => panic!("expected SubmitRequested, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_chars_ignored() {
        let mut p = panel();
        type_str(&mut p, "1a.b5");
        assert_eq!(p.input(), "1.5");
    }

    #[test]
    fn test_malformed_amount_blocks_submission() {
        let mut p = panel();
        type_str(&mut p, "1.2.3");
        let event = p.handle_key(key(KeyCode::Enter));
        assert!(matches!(event, Some(AppEvent::Error(_))));
        assert_eq!(p.input(), "1.2.3");
    }

    #[test]
    fn test_editing_keys() {
        let mut p = panel();
        type_str(&mut p, "125");
        p.handle_key(key(KeyCode::Left));
        p.handle_key(key(KeyCode::Backspace));
        assert_eq!(p.input(), "15");

        p.handle_key(key(KeyCode::Home));
        p.handle_key(key(KeyCode::Delete));
        assert_eq!(p.input(), "5");
    }

    #[test]
    fn test_clear_input_after_confirmation() {
        let mut p = panel();
        type_str(&mut p, "2");
        p.handle_key(key(KeyCode::Enter));
        p.clear_input();
        assert_eq!(p.input(), "");
        assert!(p.validation_error.is_none());
    }

    #[test]
    fn test_typing_clears_stale_validation_error() {
        let mut p = panel();
        p.handle_key(key(KeyCode::Enter));
        assert!(p.validation_error.is_some());
        p.handle_key(key(KeyCode::Char('1')));
        assert!(p.validation_error.is_none());
    }
}
