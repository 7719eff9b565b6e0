use alloy::primitives::{Address, B256, U256};

/// Views the user can be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Connect,
    Vault,
}

/// The two mutating operations the vault contract offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Deposit,
    Withdraw,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Deposit => "Deposit",
            Action::Withdraw => "Withdraw",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one submitted transaction, as shown in the activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityStatus {
    Pending,
    Confirmed,
    Failed,
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityStatus::Pending => write!(f, "pending"),
            ActivityStatus::Confirmed => write!(f, "confirmed"),
            ActivityStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One row of the session activity log
#[derive(Debug, Clone)]
pub struct ActivityEntry {
    /// Submission id assigned by the service; ties the pending row to its
    /// eventual confirmation or failure.
    pub id: u64,
    pub action: Action,
    /// Requested amount in wei
    pub amount: U256,
    pub status: ActivityStatus,
    pub tx_hash: Option<B256>,
    /// Failure reason, if any
    pub detail: Option<String>,
    pub timestamp: u64,
}

/// Events sent from background service tasks to the main app loop
#[derive(Debug)]
pub enum AppEvent {
    // Connection
    Connected(u64), // chain_id
    AccountConnected(Address),
    NoAccount(String),

    // Balance
    BalanceLoaded(U256),
    BalanceFetchFailed(String),

    // Transactions
    SubmitRequested { action: Action, amount: U256 },
    TxSubmitted { id: u64, action: Action, amount: U256 },
    TxConfirmed {
        id: u64,
        action: Action,
        amount: U256,
        hash: B256,
        /// Amount reported by the contract's Deposit/Withdraw event, when present
        event_amount: Option<U256>,
    },
    TxFailed { id: u64, action: Action, amount: U256, reason: String },

    // Export
    ExportComplete(String),

    // Status
    Error(String),
}
