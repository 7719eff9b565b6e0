use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::{Log, TransactionRequest};
use alloy::sol;
use alloy::sol_types::{SolCall, SolError, SolEvent};

use crate::events::Action;
use crate::utils;

// Interface surface of the deployed assessment vault contract.
sol! {
    #[allow(missing_docs)]
    function deposit(uint256 _amount) external payable;
    #[allow(missing_docs)]
    function withdraw(uint256 _withdrawAmount) external;
    #[allow(missing_docs)]
    function balance() external view returns (uint256);
    #[allow(missing_docs)]
    function getBalance() external view returns (uint256);
    #[allow(missing_docs)]
    event Deposit(uint256 amount);
    #[allow(missing_docs)]
    event Withdraw(uint256 amount);
    #[allow(missing_docs)]
    error InsufficientBalance(uint256 balance, uint256 withdrawAmount);
}

/// Typed proxy for one deployed vault contract. Bound to a fixed address at
/// construction; builds the raw transaction requests the chain client sends.
#[derive(Debug, Clone, Copy)]
pub struct VaultContract {
    address: Address,
}

impl VaultContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Read request for the no-argument `getBalance()` accessor.
    pub fn balance_request(&self) -> TransactionRequest {
        let calldata = getBalanceCall {}.abi_encode();
        TransactionRequest::default()
            .to(self.address)
            .input(Bytes::from(calldata).into())
    }

    /// `deposit(amount)` with an equal payment value attached.
    pub fn deposit_request(&self, amount: U256) -> TransactionRequest {
        let calldata = depositCall { _amount: amount }.abi_encode();
        TransactionRequest::default()
            .to(self.address)
            .value(amount)
            .input(Bytes::from(calldata).into())
    }

    /// Non-payable `withdraw(amount)`.
    pub fn withdraw_request(&self, amount: U256) -> TransactionRequest {
        let calldata = withdrawCall { _withdrawAmount: amount }.abi_encode();
        TransactionRequest::default()
            .to(self.address)
            .input(Bytes::from(calldata).into())
    }

    /// Build the request for the given user action.
    pub fn action_request(&self, action: Action, amount: U256) -> TransactionRequest {
        match action {
            Action::Deposit => self.deposit_request(amount),
            Action::Withdraw => self.withdraw_request(amount),
        }
    }

    /// Find the amount reported by this contract's Deposit/Withdraw event in
    /// a confirmation receipt's logs, if the matching event was emitted.
    pub fn confirmed_amount(&self, action: Action, logs: &[Log]) -> Option<U256> {
        logs.iter()
            .filter(|log| log.inner.address == self.address)
            .find_map(|log| match action {
                Action::Deposit => Deposit::decode_log_data(&log.inner.data, true)
                    .ok()
                    .map(|e| e.amount),
                Action::Withdraw => Withdraw::decode_log_data(&log.inner.data, true)
                    .ok()
                    .map(|e| e.amount),
            })
    }
}

/// Decode the uint256 returned by `getBalance()`.
pub fn decode_balance(data: &Bytes) -> Option<U256> {
    getBalanceCall::abi_decode_returns(data, true)
        .ok()
        .map(|ret| ret._0)
}

/// Decode revert data against the contract's declared errors.
///
/// Only `InsufficientBalance(balance, withdrawAmount)` is declared; anything
/// else comes back as None and the caller falls through to the raw message.
pub fn decode_revert(data: &[u8]) -> Option<String> {
    let err = InsufficientBalance::abi_decode(data, true).ok()?;
    Some(format!(
        "insufficient balance: have {}, requested {}",
        utils::format_eth(err.balance),
        utils::format_eth(err.withdrawAmount),
    ))
}
