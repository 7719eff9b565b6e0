use alloy::network::EthereumWallet;
use alloy::primitives::{Address, Bytes};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::{RpcError, TransportErrorKind};
use color_eyre::eyre::Result;

/// A failed submission, with any revert payload the node returned so the
/// caller can decode it against the contract's declared errors.
#[derive(Debug)]
pub struct TxFailure {
    pub message: String,
    pub revert: Option<Bytes>,
}

impl std::fmt::Display for TxFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TxFailure {}

impl TxFailure {
    fn from_rpc_error(err: RpcError<TransportErrorKind>) -> Self {
        let revert = err.as_error_resp().and_then(|payload| payload.as_revert_data());
        Self {
            message: err.to_string(),
            revert,
        }
    }
}

/// Wrapper around the alloy provider: the terminal's stand-in for a browser's
/// injected wallet. Signs locally when a private key is configured, otherwise
/// defers signing to the node's own accounts.
pub struct ChainClient {
    provider: Box<dyn Provider + Send + Sync>,
    signer_address: Option<Address>,
    chain_id: u64,
}

impl ChainClient {
    /// Build a client for the given HTTP RPC endpoint without contacting the
    /// node. The chain ID stays zero until `connect` fetches it.
    pub fn new(rpc_url: &str, private_key: Option<&str>) -> Result<Self> {
        let url = rpc_url.parse()?;

        let (provider, signer_address): (Box<dyn Provider + Send + Sync>, Option<Address>) =
            match private_key {
                Some(key) => {
                    let signer: PrivateKeySigner = key.trim().parse()?;
                    let address = signer.address();
                    let wallet = EthereumWallet::from(signer);
                    let provider = ProviderBuilder::new().wallet(wallet).on_http(url);
                    (Box::new(provider), Some(address))
                }
                None => {
                    let provider = ProviderBuilder::new().on_http(url);
                    (Box::new(provider), None)
                }
            };

        Ok(Self {
            provider,
            signer_address,
            chain_id: 0,
        })
    }

    /// Connect to an Ethereum node via HTTP RPC, optionally with a local
    /// signing key. Verifies the node is reachable by fetching its chain ID.
    pub async fn connect(rpc_url: &str, private_key: Option<&str>) -> Result<Self> {
        let mut client = Self::new(rpc_url, private_key)?;
        client.chain_id = client.provider.get_chain_id().await?;
        Ok(client)
    }

    /// Chain ID obtained at connection time.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// List accounts authorized to sign: the local signer if one is
    /// configured, else whatever the node manages (eth_accounts).
    pub async fn accounts(&self) -> Result<Vec<Address>> {
        if let Some(address) = self.signer_address {
            return Ok(vec![address]);
        }
        let accounts = self.provider.get_accounts().await?;
        Ok(accounts)
    }

    /// Execute a read-only call.
    pub async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
        let data = self.provider.call(tx).await?;
        Ok(data)
    }

    /// Submit a transaction from the given account and wait until it is
    /// mined. No timeout is set on the wait.
    pub async fn send_transaction(
        &self,
        tx: TransactionRequest,
        from: Address,
    ) -> Result<TransactionReceipt, TxFailure> {
        let tx = tx.from(from);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(TxFailure::from_rpc_error)?;

        let receipt = pending.get_receipt().await.map_err(|e| TxFailure {
            message: format!("confirmation failed: {e}"),
            revert: None,
        })?;

        if !receipt.status() {
            return Err(TxFailure {
                message: format!(
                    "transaction {} reverted on-chain",
                    receipt.transaction_hash
                ),
                revert: None,
            });
        }

        Ok(receipt)
    }
}
