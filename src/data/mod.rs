pub mod contract;
pub mod export;
pub mod provider;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use alloy::primitives::{Address, U256};
use tokio::sync::mpsc;

use crate::data::contract::VaultContract;
use crate::data::provider::{ChainClient, TxFailure};
use crate::events::{Action, AppEvent};

/// Background service for everything that touches the chain. Each operation
/// spawns an independent task and reports back over the app event channel;
/// nothing here blocks the render loop.
pub struct VaultService {
    client: Arc<ChainClient>,
    contract: VaultContract,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    next_submission: AtomicU64,
}

impl VaultService {
    pub fn new(
        client: ChainClient,
        contract_address: Address,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            client: Arc::new(client),
            contract: VaultContract::new(contract_address),
            event_tx,
            next_submission: AtomicU64::new(1),
        }
    }

    pub fn contract_address(&self) -> Address {
        self.contract.address()
    }

    /// List authorized accounts, pick the first as active, and issue one
    /// balance fetch. Runs at startup and again when the user presses
    /// Connect; both paths are the same routine.
    pub fn initialize(&self) {
        let client = Arc::clone(&self.client);
        let contract = self.contract;
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match client.accounts().await {
                Ok(accounts) => match accounts.first() {
                    Some(account) => {
                        let _ = tx.send(AppEvent::AccountConnected(*account));
                    }
                    None => {
                        let _ = tx.send(AppEvent::NoAccount(
                            "no signing account available; pass --private-key or use a dev node"
                                .to_string(),
                        ));
                    }
                },
                Err(e) => {
                    let _ = tx.send(AppEvent::NoAccount(format!("account lookup failed: {e}")));
                }
            }

            // The contract proxy exists whether or not an account connected;
            // the balance read needs no signer.
            load_balance(&client, &contract, &tx).await;
        });
    }

    /// Re-read the contract balance.
    pub fn fetch_balance(&self) {
        let client = Arc::clone(&self.client);
        let contract = self.contract;
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            load_balance(&client, &contract, &tx).await;
        });
    }

    /// Submit a deposit or withdraw and wait for its receipt. Each submission
    /// carries a unique id so concurrent transactions of the same kind resolve
    /// the right activity entry.
    pub fn submit(&self, action: Action, amount: U256, from: Address) {
        let id = self.next_submission.fetch_add(1, Ordering::Relaxed);
        let client = Arc::clone(&self.client);
        let contract = self.contract;
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let _ = tx.send(AppEvent::TxSubmitted { id, action, amount });

            let request = contract.action_request(action, amount);
            match client.send_transaction(request, from).await {
                Ok(receipt) => {
                    let event_amount = contract.confirmed_amount(action, receipt.inner.logs());
                    let _ = tx.send(AppEvent::TxConfirmed {
                        id,
                        action,
                        amount,
                        hash: receipt.transaction_hash,
                        event_amount,
                    });
                }
                Err(failure) => {
                    let _ = tx.send(AppEvent::TxFailed {
                        id,
                        action,
                        amount,
                        reason: failure_reason(failure),
                    });
                }
            }
        });
    }
}

/// Prefer the decoded contract error over the raw transport message.
fn failure_reason(failure: TxFailure) -> String {
    failure
        .revert
        .as_ref()
        .and_then(|data| contract::decode_revert(data))
        .unwrap_or(failure.message)
}

async fn load_balance(
    client: &ChainClient,
    contract: &VaultContract,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    match client.call(contract.balance_request()).await {
        Ok(data) => match contract::decode_balance(&data) {
            Some(balance) => {
                let _ = tx.send(AppEvent::BalanceLoaded(balance));
            }
            None => {
                let _ = tx.send(AppEvent::BalanceFetchFailed(
                    "could not decode getBalance() return data".to_string(),
                ));
            }
        },
        Err(e) => {
            let _ = tx.send(AppEvent::BalanceFetchFailed(format!(
                "balance fetch failed: {e}"
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::Bytes;
    use alloy::sol_types::SolError;

    use super::*;
    use crate::data::contract::InsufficientBalance;

    #[test]
    fn test_failure_reason_decodes_declared_revert() {
        let revert = InsufficientBalance {
            balance: U256::from(1u64),
            withdrawAmount: U256::from(2u64),
        }
        .abi_encode();
        let failure = TxFailure {
            message: "execution reverted".to_string(),
            revert: Some(Bytes::from(revert)),
        };

        let reason = failure_reason(failure);
        assert!(reason.contains("insufficient balance"), "got: {reason}");
    }

    #[test]
    fn test_failure_reason_falls_back_to_raw_message() {
        let failure = TxFailure {
            message: "nonce too low".to_string(),
            revert: None,
        };
        assert_eq!(failure_reason(failure), "nonce too low");

        let failure = TxFailure {
            message: "execution reverted".to_string(),
            revert: Some(Bytes::from(vec![0xde, 0xad, 0xbe, 0xef])),
        };
        assert_eq!(failure_reason(failure), "execution reverted");
    }
}
