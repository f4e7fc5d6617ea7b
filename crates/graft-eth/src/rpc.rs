//! Minimal JSON-RPC 2.0 client over HTTP.

use std::{
  sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
  },
  time::Duration,
};

use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::{Error, Result};

#[derive(Serialize)]
struct Request<'a> {
  jsonrpc: &'static str,
  id:      u64,
  method:  &'a str,
  params:  Value,
}

#[derive(Deserialize)]
struct Response {
  #[serde(default)]
  result: Value,
  error:  Option<ErrorObject>,
}

#[derive(Deserialize)]
struct ErrorObject {
  code:    i64,
  message: String,
}

/// JSON-RPC endpoint handle.
///
/// Cheap to clone; the inner [`reqwest::Client`] and the id counter are
/// shared.
#[derive(Clone, Debug)]
pub struct RpcClient {
  client:  Client,
  url:     Arc<str>,
  next_id: Arc<AtomicU64>,
}

impl RpcClient {
  pub fn new(url: &str) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self {
      client,
      url: Arc::from(url),
      next_id: Arc::new(AtomicU64::new(1)),
    })
  }

  /// Call `method` and deserialise its `result`. A missing result reads as
  /// `null`, so `Option<T>` targets work for "not yet" answers.
  pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
    debug!(id, method, "rpc call");

    let resp = self
      .client
      .post(&*self.url)
      .json(&Request {
        jsonrpc: "2.0",
        id,
        method,
        params,
      })
      .send()
      .await?;

    let status = resp.status();
    let body: Response = match resp.json().await {
      Ok(body) => body,
      Err(_) if !status.is_success() => return Err(Error::Status(status)),
      Err(e) => return Err(e.into()),
    };

    if let Some(err) = body.error {
      debug!(id, method, code = err.code, message = %err.message, "rpc error");
      return Err(Error::Rpc {
        code:    err.code,
        message: err.message,
      });
    }
    Ok(serde_json::from_value(body.result)?)
  }
}

// ─── Hex helpers ─────────────────────────────────────────────────────────────

/// `0x`-prefixed hex for calldata and similar byte strings.
pub fn to_hex(bytes: &[u8]) -> String { format!("0x{}", hex::encode(bytes)) }

pub fn from_hex(s: &str) -> Result<Vec<u8>> {
  hex::decode(s.strip_prefix("0x").unwrap_or(s)).map_err(|_| Error::Hex(s.to_owned()))
}

/// Parse a JSON-RPC quantity such as `"0xaa36a7"`.
pub fn parse_quantity(s: &str) -> Result<u64> {
  let digits = s.strip_prefix("0x").ok_or_else(|| Error::Hex(s.to_owned()))?;
  u64::from_str_radix(digits, 16).map_err(|_| Error::Hex(s.to_owned()))
}
