use alloy::primitives::{B256, U256};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::Component;
use crate::events::{Action, ActivityEntry, ActivityStatus, AppEvent};
use crate::theme::THEME;
use crate::utils;

/// Session-scoped log of submitted transactions. Nothing is persisted;
/// restart clears it, like every other piece of view state.
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
    table_state: TableState,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            table_state: TableState::default(),
        }
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    /// Record a submission the moment it goes out. The id comes from the
    /// service and is what confirmation and failure resolve against.
    pub fn push_pending(&mut self, id: u64, action: Action, amount: U256) {
        self.entries.insert(
            0,
            ActivityEntry {
                id,
                action,
                amount,
                status: ActivityStatus::Pending,
                tx_hash: None,
                detail: None,
                timestamp: Utc::now().timestamp() as u64,
            },
        );
    }

    /// Mark the submission with this id as confirmed.
    pub fn resolve_confirmed(&mut self, id: u64, hash: B256) {
        if let Some(entry) = self.entry_mut(id) {
            entry.status = ActivityStatus::Confirmed;
            entry.tx_hash = Some(hash);
        }
    }

    /// Mark the submission with this id as failed.
    pub fn resolve_failed(&mut self, id: u64, reason: String) {
        if let Some(entry) = self.entry_mut(id) {
            entry.status = ActivityStatus::Failed;
            entry.detail = Some(reason);
        }
    }

    fn entry_mut(&mut self, id: u64) -> Option<&mut ActivityEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = (current + 1).min(self.entries.len() - 1);
        self.table_state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some(current.saturating_sub(1)));
    }
}

fn status_style(status: ActivityStatus) -> Style {
    match status {
        ActivityStatus::Pending => Style::default().fg(THEME.warning),
        ActivityStatus::Confirmed => THEME.success_style(),
        ActivityStatus::Failed => THEME.error_style(),
    }
}

impl Component for ActivityLog {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_prev();
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Activity ({}) ", self.entries.len()))
            .borders(Borders::ALL)
            .border_style(THEME.border_style());

        if self.entries.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let empty = Paragraph::new("No transactions this session")
                .style(THEME.muted_style())
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        }

        let header = Row::new(vec![
            Cell::from("When"),
            Cell::from("Action"),
            Cell::from("Amount"),
            Cell::from("Status"),
            Cell::from("Tx / Detail"),
        ])
        .style(THEME.table_header_style());

        let rows: Vec<Row> = self
            .entries
            .iter()
            .map(|e| {
                let last = match (&e.tx_hash, &e.detail) {
                    (Some(hash), _) => {
                        Cell::from(utils::truncate_hash(hash)).style(THEME.hash_style())
                    }
                    (None, Some(detail)) => Cell::from(detail.clone()).style(THEME.error_style()),
                    (None, None) => Cell::from("-").style(THEME.muted_style()),
                };
                Row::new(vec![
                    Cell::from(utils::format_time_ago(e.timestamp)).style(THEME.muted_style()),
                    Cell::from(e.action.label()).style(THEME.accent_style()),
                    Cell::from(utils::format_eth(e.amount)).style(THEME.eth_style()),
                    Cell::from(e.status.to_string()).style(status_style(e.status)),
                    last,
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Length(10),
            Constraint::Min(16),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(THEME.selected_style())
            .highlight_symbol(" > ");

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_eth() -> U256 {
        U256::from(10u64).pow(U256::from(18u64))
    }

    #[test]
    fn test_push_pending_prepends() {
        let mut log = ActivityLog::new();
        log.push_pending(1, Action::Deposit, one_eth());
        log.push_pending(2, Action::Withdraw, one_eth());
        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries()[0].action, Action::Withdraw);
        assert_eq!(log.entries()[0].status, ActivityStatus::Pending);
    }

    #[test]
    fn test_resolve_confirmed_sets_hash() {
        let mut log = ActivityLog::new();
        log.push_pending(1, Action::Deposit, one_eth());
        let hash = B256::from_slice(&[0xab; 32]);
        log.resolve_confirmed(1, hash);

        assert_eq!(log.entries()[0].status, ActivityStatus::Confirmed);
        assert_eq!(log.entries()[0].tx_hash, Some(hash));
    }

    #[test]
    fn test_resolve_failed_keeps_reason() {
        let mut log = ActivityLog::new();
        log.push_pending(1, Action::Withdraw, one_eth());
        log.resolve_failed(1, "insufficient balance".to_string());

        assert_eq!(log.entries()[0].status, ActivityStatus::Failed);
        assert_eq!(
            log.entries()[0].detail.as_deref(),
            Some("insufficient balance")
        );
        assert!(log.entries()[0].tx_hash.is_none());
    }

    #[test]
    fn test_concurrent_same_action_entries_resolve_independently() {
        let mut log = ActivityLog::new();
        log.push_pending(1, Action::Deposit, one_eth());
        log.push_pending(2, Action::Deposit, one_eth() + one_eth());

        // The second deposit confirms first; the one-ETH entry must stay
        // pending and must not pick up the two-ETH transaction's hash.
        let hash = B256::from_slice(&[0xcd; 32]);
        log.resolve_confirmed(2, hash);

        let two_eth_entry = &log.entries()[0];
        let one_eth_entry = &log.entries()[1];
        assert_eq!(two_eth_entry.amount, one_eth() + one_eth());
        assert_eq!(two_eth_entry.status, ActivityStatus::Confirmed);
        assert_eq!(two_eth_entry.tx_hash, Some(hash));
        assert_eq!(one_eth_entry.status, ActivityStatus::Pending);
        assert!(one_eth_entry.tx_hash.is_none());

        // And a late failure lands on the remaining submission only.
        log.resolve_failed(1, "insufficient balance".to_string());
        assert_eq!(log.entries()[1].status, ActivityStatus::Failed);
        assert_eq!(log.entries()[0].status, ActivityStatus::Confirmed);
    }

    #[test]
    fn test_resolve_unknown_id_is_noop() {
        let mut log = ActivityLog::new();
        log.push_pending(1, Action::Deposit, one_eth());
        log.resolve_confirmed(99, B256::ZERO);
        assert_eq!(log.entries()[0].status, ActivityStatus::Pending);
    }
}
