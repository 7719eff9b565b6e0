use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, U256};
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tokio::sync::mpsc;

use crate::components::activity::ActivityLog;
use crate::components::connect::ConnectPrompt;
use crate::components::header::Header;
use crate::components::help::HelpOverlay;
use crate::components::status_bar::StatusBar;
use crate::components::vault::VaultPanel;
use crate::components::Component;
use crate::data::{export, VaultService};
use crate::events::{Action, AppEvent, View};
use crate::theme::THEME;
use crate::utils;

/// Chain work a state change calls for. Kept apart from the state update
/// itself so the update logic runs without a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Followup {
    FetchBalance,
    Submit {
        action: Action,
        amount: U256,
        from: Address,
    },
}

pub struct App {
    // Navigation
    current_view: View,

    // Components
    header: Header,
    connect: ConnectPrompt,
    vault: VaultPanel,
    activity: ActivityLog,
    status_bar: StatusBar,
    help: HelpOverlay,

    // Data
    service: Arc<VaultService>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,

    // State
    account: Option<Address>,
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn with_service(
        service: Arc<VaultService>,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        tick_rate_ms: u64,
    ) -> Self {
        let contract = service.contract_address();
        Self {
            current_view: View::Connect,
            header: Header::new(),
            connect: ConnectPrompt::new(contract),
            vault: VaultPanel::new(contract),
            activity: ActivityLog::new(),
            status_bar: StatusBar::new(),
            help: HelpOverlay::new(),
            service,
            event_rx,
            account: None,
            should_quit: false,
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    pub async fn run(&mut self, mut terminal: ratatui::DefaultTerminal) -> color_eyre::Result<()> {
        // The mount-time routine: list accounts, build the proxy, fetch once
        self.service.initialize();

        let mut interval = tokio::time::interval(self.tick_rate);
        let mut events = EventStream::new();

        while !self.should_quit {
            tokio::select! {
                _ = interval.tick() => {
                    terminal.draw(|frame| self.render(frame))?;
                }
                Some(Ok(event)) = events.next() => {
                    self.handle_terminal_event(event);
                }
                Some(app_event) = self.event_rx.recv() => {
                    self.handle_app_event(app_event);
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(
            Block::default().style(Style::default().bg(THEME.bg)),
            area,
        );

        // Layout: header (1) | content (fill) | status bar (1)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.render(frame, chunks[0]);

        match self.current_view {
            View::Connect => self.connect.render(frame, chunks[1]),
            View::Vault => {
                let panels = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(10), Constraint::Min(4)])
                    .split(chunks[1]);
                self.vault.render(frame, panels[0]);
                self.activity.render(frame, panels[1]);
            }
        }

        self.status_bar.render(frame, chunks[2]);

        self.help.render(frame, area);
    }

    fn handle_terminal_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only handle key press events (not release/repeat) for cross-platform compat
            if key.kind != KeyEventKind::Press {
                return;
            }

            // Help overlay consumes all keys when visible
            if self.help.handle_key(key) {
                return;
            }

            // Global keys
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('?') => {
                    self.help.toggle();
                    return;
                }
                _ => {}
            }

            match self.current_view {
                View::Connect => {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Char('c')) {
                        self.status_bar.loading = true;
                        self.service.initialize();
                    }
                }
                View::Vault => {
                    let app_event = match key.code {
                        KeyCode::Char('r') => {
                            self.status_bar.loading = true;
                            self.service.fetch_balance();
                            None
                        }
                        KeyCode::Char('e') => {
                            self.export_activity();
                            None
                        }
                        KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                            self.activity.handle_key(key)
                        }
                        _ => self.vault.handle_key(key),
                    };

                    if let Some(event) = app_event {
                        self.handle_app_event(event);
                    }
                }
            }
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match self.apply_event(event) {
            Some(Followup::FetchBalance) => self.service.fetch_balance(),
            Some(Followup::Submit {
                action,
                amount,
                from,
            }) => self.service.submit(action, amount, from),
            None => {}
        }
    }

    /// Apply one app event to the view state and report any chain work it
    /// calls for. Touches no network itself.
    fn apply_event(&mut self, event: AppEvent) -> Option<Followup> {
        match event {
            AppEvent::Connected(chain_id) => {
                self.header.chain_id = chain_id;
                self.header.connected = true;
                self.status_bar.connected = true;
                None
            }
            AppEvent::AccountConnected(account) => {
                self.account = Some(account);
                self.header.account = Some(account);
                self.vault.account = Some(account);
                self.current_view = View::Vault;
                None
            }
            AppEvent::NoAccount(reason) => {
                // Connect prompt stays up; the reason is shown there rather
                // than dropped into a log nobody can see
                self.connect.hint = Some(reason);
                self.status_bar.loading = false;
                None
            }
            AppEvent::BalanceLoaded(balance) => {
                self.vault.balance = Some(balance);
                self.status_bar.loading = false;
                None
            }
            AppEvent::BalanceFetchFailed(reason) => {
                // Stale balance stays in place
                self.status_bar.error(reason);
                self.status_bar.loading = false;
                None
            }
            AppEvent::SubmitRequested { action, amount } => match self.account {
                Some(from) => {
                    self.status_bar.notice = None;
                    self.status_bar.loading = true;
                    Some(Followup::Submit {
                        action,
                        amount,
                        from,
                    })
                }
                None => {
                    self.status_bar
                        .error("Connect an account before submitting".to_string());
                    None
                }
            },
            AppEvent::TxSubmitted { id, action, amount } => {
                self.activity.push_pending(id, action, amount);
                None
            }
            AppEvent::TxConfirmed {
                id,
                action,
                amount,
                hash,
                event_amount,
            } => {
                self.activity.resolve_confirmed(id, hash);
                self.vault.clear_input();
                // Prefer the amount the contract event reported
                let confirmed = event_amount.unwrap_or(amount);
                self.status_bar.success(format!(
                    "{action} of {} confirmed ({})",
                    utils::format_eth(confirmed),
                    utils::truncate_hash(&hash),
                ));
                self.status_bar.loading = true;
                Some(Followup::FetchBalance)
            }
            AppEvent::TxFailed {
                id,
                action,
                amount: _,
                reason,
            } => {
                // Input is left as typed so the user can correct and retry
                self.activity.resolve_failed(id, reason.clone());
                self.status_bar.error(format!("{action} failed: {reason}"));
                self.status_bar.loading = false;
                None
            }
            AppEvent::ExportComplete(message) => {
                self.status_bar.success(message);
                None
            }
            AppEvent::Error(message) => {
                self.status_bar.error(message);
                None
            }
        }
    }

    fn export_activity(&mut self) {
        let path = export::default_export_path();
        match export::export_activity_csv(self.activity.entries(), &path) {
            Ok(message) => self.handle_app_event(AppEvent::ExportComplete(message)),
            Err(message) => self.handle_app_event(AppEvent::Error(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::B256;
    use crossterm::event::KeyEvent;

    use super::*;
    use crate::components::status_bar::NoticeKind;
    use crate::data::provider::ChainClient;

    fn test_app() -> App {
        let client = ChainClient::new("http://localhost:8545", None).unwrap();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let service = Arc::new(VaultService::new(
            client,
            Address::from_slice(&[0xd8; 20]),
            event_tx,
        ));
        App::with_service(service, event_rx, 100)
    }

    fn test_account() -> Address {
        Address::from_slice(&[0x11; 20])
    }

    fn type_amount(app: &mut App, text: &str) {
        for c in text.chars() {
            app.vault
                .handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[test]
    fn test_starts_on_connect_view_without_account() {
        let app = test_app();
        assert_eq!(app.current_view, View::Connect);
        assert!(app.account.is_none());
    }

    #[test]
    fn test_no_account_keeps_connect_view_with_hint() {
        let mut app = test_app();
        let followup = app.apply_event(AppEvent::NoAccount("no signing account".to_string()));

        assert_eq!(followup, None);
        assert_eq!(app.current_view, View::Connect);
        assert_eq!(app.connect.hint.as_deref(), Some("no signing account"));
    }

    #[test]
    fn test_account_connected_enters_vault_without_extra_fetch() {
        let mut app = test_app();
        let account = test_account();
        // The account lookup already issued its one balance fetch; the view
        // switch must not add another.
        let followup = app.apply_event(AppEvent::AccountConnected(account));

        assert_eq!(followup, None);
        assert_eq!(app.current_view, View::Vault);
        assert_eq!(app.account, Some(account));
        assert_eq!(app.vault.account, Some(account));
    }

    #[test]
    fn test_submit_requires_account() {
        let mut app = test_app();
        let followup = app.apply_event(AppEvent::SubmitRequested {
            action: Action::Deposit,
            amount: U256::from(1u64),
        });

        assert_eq!(followup, None);
        assert!(matches!(
            app.status_bar.notice,
            Some((NoticeKind::Error, _))
        ));
    }

    #[test]
    fn test_submit_dispatches_from_connected_account() {
        let mut app = test_app();
        let account = test_account();
        app.apply_event(AppEvent::AccountConnected(account));

        let amount = U256::from(5u64);
        let followup = app.apply_event(AppEvent::SubmitRequested {
            action: Action::Withdraw,
            amount,
        });

        assert_eq!(
            followup,
            Some(Followup::Submit {
                action: Action::Withdraw,
                amount,
                from: account,
            })
        );
        assert!(app.status_bar.loading);
    }

    #[test]
    fn test_confirmation_refreshes_once_and_clears_input() {
        let mut app = test_app();
        app.apply_event(AppEvent::AccountConnected(test_account()));
        type_amount(&mut app, "1.0");
        let amount = U256::from(10u64).pow(U256::from(18u64));
        app.apply_event(AppEvent::TxSubmitted {
            id: 1,
            action: Action::Deposit,
            amount,
        });

        let followup = app.apply_event(AppEvent::TxConfirmed {
            id: 1,
            action: Action::Deposit,
            amount,
            hash: B256::from_slice(&[0xab; 32]),
            event_amount: None,
        });

        // Exactly one balance refresh, and the form resets for the next entry
        assert_eq!(followup, Some(Followup::FetchBalance));
        assert_eq!(app.vault.input(), "");
        assert!(matches!(
            app.status_bar.notice,
            Some((NoticeKind::Success, _))
        ));
    }

    #[test]
    fn test_failure_keeps_input_and_shows_no_success() {
        let mut app = test_app();
        app.apply_event(AppEvent::AccountConnected(test_account()));
        type_amount(&mut app, "2.5");
        let amount = U256::from(25u64) * U256::from(10u64).pow(U256::from(17u64));
        app.apply_event(AppEvent::TxSubmitted {
            id: 1,
            action: Action::Withdraw,
            amount,
        });

        let followup = app.apply_event(AppEvent::TxFailed {
            id: 1,
            action: Action::Withdraw,
            amount,
            reason: "insufficient balance".to_string(),
        });

        // No refresh, the typed amount survives for a retry, and the only
        // notice is the failure
        assert_eq!(followup, None);
        assert_eq!(app.vault.input(), "2.5");
        assert!(matches!(
            app.status_bar.notice,
            Some((NoticeKind::Error, _))
        ));
        assert!(!app.status_bar.loading);
    }
}
