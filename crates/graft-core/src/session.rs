//! Connection manager: turns a wallet provider into a [`Session`] bound to one
//! account, the required network and the registry contract.

use tracing::{debug, info};

use crate::{
  Error, Result,
  chain::{Address, Network},
  wallet::{Wallet, WalletError},
};

/// An established connection. The only state other components share; it is
/// passed to them explicitly.
#[derive(Debug)]
pub struct Session<W> {
  wallet:   W,
  account:  Address,
  contract: Address,
  chain_id: u64,
}

impl<W: Wallet> Session<W> {
  pub fn account(&self) -> Address { self.account }

  pub fn contract(&self) -> Address { self.contract }

  pub fn chain_id(&self) -> u64 { self.chain_id }

  /// A registry handle for the session's contract, signing as its account.
  pub fn registry(&self) -> W::Registry {
    self.wallet.registry(self.contract, self.account)
  }
}

/// Connect through `wallet`, making sure it is on `network`.
///
/// A single attempt: at most one switch request, and if the wallet does not
/// know the network, one add request followed by one more switch. Every
/// failure along the way ends the attempt.
pub async fn connect<W: Wallet>(
  wallet: Option<W>,
  network: &Network,
  contract: Address,
) -> Result<Session<W>> {
  let wallet = wallet.ok_or(Error::NoWallet)?;

  let accounts = wallet.request_accounts().await.map_err(connection)?;
  let account = accounts.first().copied().ok_or(Error::NoAccounts)?;
  debug!(%account, "wallet exposed account");

  let active = wallet.chain_id().await.map_err(connection)?;
  if active != network.chain_id {
    info!(from = active, to = network.chain_id, "switching network");
    ensure_network(&wallet, network).await?;
  }

  info!(%account, %contract, chain_id = network.chain_id, "connected");
  Ok(Session {
    wallet,
    account,
    contract,
    chain_id: network.chain_id,
  })
}

/// Pick up an existing connection without prompting the user.
///
/// Returns `Ok(None)` when there is no wallet or it exposes no account yet.
/// The network is reported as-is and never switched.
pub async fn resume<W: Wallet>(
  wallet: Option<W>,
  contract: Address,
) -> Result<Option<Session<W>>> {
  let Some(wallet) = wallet else {
    return Ok(None);
  };
  let accounts = wallet.accounts().await.map_err(connection)?;
  let Some(account) = accounts.first().copied() else {
    return Ok(None);
  };
  let chain_id = wallet.chain_id().await.map_err(connection)?;
  Ok(Some(Session {
    wallet,
    account,
    contract,
    chain_id,
  }))
}

async fn ensure_network<W: Wallet>(wallet: &W, network: &Network) -> Result<()> {
  match wallet.switch_chain(network.chain_id).await {
    Ok(()) => Ok(()),
    Err(WalletError::UnrecognizedChain(message)) => {
      info!(%message, chain = %network.chain_name, "network unknown to wallet, adding it");
      wallet.add_chain(network).await.map_err(connection)?;
      wallet
        .switch_chain(network.chain_id)
        .await
        .map_err(connection)
    }
    Err(e) => Err(connection(e)),
  }
}

fn connection(e: WalletError) -> Error { Error::Connection(e.to_string()) }
