//! alloy-backed HTTP implementation of [`ChainClient`].

use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::{Client, Http};
use async_trait::async_trait;
use tracing::debug;

use crate::client::{ChainClient, SendOptions, TxReceipt};
use crate::error::ChainError;

/// A [`ChainClient`] over an alloy provider with signing fillers attached.
#[derive(Debug)]
pub struct HttpChainClient<P> {
    provider: P,
}

impl<P> HttpChainClient<P> {
    #[inline]
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

/// Builds a signing HTTP client against `rpc_url`.
pub fn connect(
    rpc_url: &str,
    signer: PrivateKeySigner,
) -> Result<HttpChainClient<impl Provider<Http<Client>>>, ChainError> {
    let url = rpc_url.parse().map_err(|err| ChainError::Endpoint {
        url: rpc_url.to_string(),
        reason: format!("{err}"),
    })?;
    let wallet = EthereumWallet::from(signer);
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(url);
    debug!(rpc_url, "connected provider");
    Ok(HttpChainClient::new(provider))
}

#[async_trait]
impl<P> ChainClient for HttpChainClient<P>
where
    P: Provider<Http<Client>> + Send + Sync,
{
    async fn call(
        &self,
        target: Address,
        method: &'static str,
        data: Vec<u8>,
    ) -> Result<Vec<u8>, ChainError> {
        let request = TransactionRequest::default()
            .with_to(target)
            .with_input(Bytes::from(data));
        let returned =
            self.provider
                .call(&request)
                .await
                .map_err(|err| ChainError::CallFailed {
                    target,
                    method,
                    reason: err.to_string(),
                })?;
        Ok(returned.to_vec())
    }

    async fn send(
        &self,
        target: Address,
        method: &'static str,
        data: Vec<u8>,
        options: &SendOptions,
    ) -> Result<TxReceipt, ChainError> {
        let request = TransactionRequest::default()
            .with_from(options.from)
            .with_to(target)
            .with_input(Bytes::from(data))
            .with_gas_limit(options.gas_limit)
            .with_gas_price(options.gas_price_wei);

        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(|err| ChainError::SendFailed {
                target,
                method,
                reason: err.to_string(),
            })?;
        debug!(%target, method, tx_hash = %pending.tx_hash(), "transaction submitted");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|err| ChainError::SendFailed {
                target,
                method,
                reason: err.to_string(),
            })?;

        Ok(TxReceipt {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            success: receipt.status(),
        })
    }
}
