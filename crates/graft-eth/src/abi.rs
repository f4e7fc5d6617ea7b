//! Just enough of the Solidity ABI for the registry contract: `uint256`,
//! `bool` and `string`, as call arguments and as tuple return values.
//!
//! Every value occupies one 32-byte head word. Strings put an offset in the
//! head and their length-prefixed, zero-padded bytes in the tail.

use tiny_keccak::{Hasher, Keccak};

use crate::{Error, Result};

const WORD: usize = 32;

// ─── Contract signatures ─────────────────────────────────────────────────────

pub const REGISTER_DONOR: &str = "registerDonor(string,uint256,string,string,string)";
pub const GET_DONOR: &str = "getDonor(uint256)";
pub const GET_DONOR_COUNT: &str = "getDonorCount()";
pub const REGISTER_RECEIVER: &str =
  "registerReceiver(string,uint256,string,string,uint256,string,string)";
pub const GET_RECEIVER: &str = "getReceiver(uint256)";
pub const GET_RECEIVER_COUNT: &str = "getReceiverCount()";
pub const CREATE_MATCH: &str = "createMatch(uint256,uint256)";
pub const GET_MATCH: &str = "getMatch(uint256)";
pub const GET_MATCH_COUNT: &str = "getMatchCount()";

// ─── Encoding ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
  Uint(u64),
  Bool(bool),
  Str(&'a str),
}

/// First four bytes of the keccak-256 hash of a canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
  let mut hasher = Keccak::v256();
  hasher.update(signature.as_bytes());
  let mut hash = [0u8; 32];
  hasher.finalize(&mut hash);
  [hash[0], hash[1], hash[2], hash[3]]
}

/// Calldata: selector followed by the encoded arguments.
pub fn encode_call(signature: &str, args: &[Token<'_>]) -> Vec<u8> {
  let mut data = selector(signature).to_vec();
  data.extend(encode(args));
  data
}

/// Encode `tokens` as a tuple.
pub fn encode(tokens: &[Token<'_>]) -> Vec<u8> {
  let head_len = tokens.len() * WORD;
  let mut head = Vec::with_capacity(head_len);
  let mut tail = Vec::new();

  for token in tokens {
    match *token {
      Token::Uint(n) => head.extend(uint_word(n)),
      Token::Bool(b) => head.extend(uint_word(u64::from(b))),
      Token::Str(s) => {
        head.extend(uint_word((head_len + tail.len()) as u64));
        tail.extend(uint_word(s.len() as u64));
        tail.extend(s.as_bytes());
        let padding = (WORD - s.len() % WORD) % WORD;
        tail.extend(std::iter::repeat_n(0u8, padding));
      }
    }
  }

  head.extend(tail);
  head
}

fn uint_word(n: u64) -> [u8; WORD] {
  let mut word = [0u8; WORD];
  word[WORD - 8..].copy_from_slice(&n.to_be_bytes());
  word
}

// ─── Decoding ────────────────────────────────────────────────────────────────

/// Reads the members of an encoded tuple by position.
pub struct Decoder<'a> {
  data: &'a [u8],
}

impl<'a> Decoder<'a> {
  pub fn new(data: &'a [u8]) -> Self { Self { data } }

  fn word_at(&self, offset: usize) -> Result<&'a [u8]> {
    offset
      .checked_add(WORD)
      .and_then(|end| self.data.get(offset..end))
      .ok_or_else(|| Error::Abi(format!("no word at byte {offset}")))
  }

  fn uint_at(&self, offset: usize) -> Result<u64> {
    let word = self.word_at(offset)?;
    if word[..WORD - 8].iter().any(|b| *b != 0) {
      return Err(Error::Abi(format!("uint256 at byte {offset} exceeds u64")));
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&word[WORD - 8..]);
    Ok(u64::from_be_bytes(bytes))
  }

  /// Member `index` as a `uint256` that must fit in a `u64`.
  pub fn uint(&self, index: usize) -> Result<u64> { self.uint_at(index * WORD) }

  pub fn boolean(&self, index: usize) -> Result<bool> {
    match self.uint(index)? {
      0 => Ok(false),
      1 => Ok(true),
      n => Err(Error::Abi(format!("member {index} is not a bool ({n})"))),
    }
  }

  pub fn string(&self, index: usize) -> Result<String> {
    let offset = usize::try_from(self.uint(index)?)
      .map_err(|_| Error::Abi(format!("member {index} has an oversized offset")))?;
    let len = usize::try_from(self.uint_at(offset)?)
      .map_err(|_| Error::Abi(format!("member {index} has an oversized length")))?;
    let start = offset + WORD;
    let bytes = start
      .checked_add(len)
      .and_then(|end| self.data.get(start..end))
      .ok_or_else(|| Error::Abi(format!("member {index} runs past the end of the data")))?;
    String::from_utf8(bytes.to_vec())
      .map_err(|_| Error::Abi(format!("member {index} is not valid UTF-8")))
  }
}
