use std::str::FromStr;

use bytes::Bytes;
use multibase::Base;
use multihash::Multihash;
use thiserror::Error;

/// The largest digest a [ContentHash] produced by this crate can wrap.
pub const MAX_DIGEST_LEN: usize = 64;

/// The identity of a node: a multihash, i.e. the hash function code and the
/// digest length (both as unsigned varints), followed by the digest.
///
/// Links treat these bytes as opaque. They are only interpreted as a
/// multihash when asked for [ContentHash::code] or [ContentHash::digest], or
/// when parsing the textual (base58btc) form.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(Bytes);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("invalid base58btc encoding: {0}")]
    InvalidBase58(String),
    #[error("invalid multihash: {0}")]
    InvalidMultihash(String),
    #[error("invalid hash algo: {0}")]
    InvalidAlgo(String),
}

impl ContentHash {
    pub fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }

    fn multihash(&self) -> Option<Multihash<MAX_DIGEST_LEN>> {
        Multihash::from_bytes(&self.0).ok()
    }

    /// Returns the multihash function code, if the bytes parse as a multihash.
    pub fn code(&self) -> Option<u64> {
        self.multihash().map(|mh| mh.code())
    }

    /// Returns the raw digest (without the multihash header), if the bytes
    /// parse as a multihash.
    pub fn digest(&self) -> Option<Bytes> {
        let mh = self.multihash()?;
        Some(self.0.slice(self.0.len() - mh.size() as usize..))
    }
}

impl AsRef<[u8]> for ContentHash {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl From<Bytes> for ContentHash {
    fn from(value: Bytes) -> Self {
        Self(value)
    }
}

impl From<Vec<u8>> for ContentHash {
    fn from(value: Vec<u8>) -> Self {
        Self(value.into())
    }
}

impl From<&[u8]> for ContentHash {
    fn from(value: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(value))
    }
}

impl From<ContentHash> for Bytes {
    fn from(value: ContentHash) -> Self {
        value.0
    }
}

impl FromStr for ContentHash {
    type Err = Error;

    // Parses the base58btc form, which must decode to a well-formed multihash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = Base::Base58Btc
            .decode(s)
            .map_err(|e| Error::InvalidBase58(e.to_string()))?;

        Multihash::<MAX_DIGEST_LEN>::from_bytes(&raw)
            .map_err(|e| Error::InvalidMultihash(e.to_string()))?;

        Ok(Self(raw.into()))
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Base::Base58Btc.encode(&self.0))
    }
}

impl std::fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Base::Base58Btc.encode(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentHash, Error};
    use hex_literal::hex;
    use rstest::rstest;

    const EMPTY_NODE_HASH: &str = "QmdfTbBqBPQ7VNxZEYEj14VmRuZBkqFbiwReogJgS1zR1n";

    #[test]
    fn parse_and_print() {
        let hash: ContentHash = EMPTY_NODE_HASH.parse().expect("must parse");

        assert_eq!(Some(0x12), hash.code());
        assert_eq!(
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855").as_slice(),
            &hash.digest().expect("must be a multihash")[..]
        );
        assert_eq!(EMPTY_NODE_HASH, hash.to_string());
    }

    #[rstest]
    #[case::not_base58("0OIl")]
    #[case::truncated_multihash("Qmdf")]
    fn parse_fail(#[case] input: &str) {
        assert!(input.parse::<ContentHash>().is_err());
    }

    #[test]
    fn parse_fail_reports_base58() {
        assert!(matches!(
            "0OIl".parse::<ContentHash>(),
            Err(Error::InvalidBase58(_))
        ));
    }

    #[test]
    fn opaque_bytes() {
        // not a multihash, but still usable as a link target
        let hash = ContentHash::from(vec![0xff, 0xff]);
        assert_eq!(None, hash.code());
        assert_eq!(None, hash.digest());
        assert_eq!(&[0xffu8, 0xff][..], hash.as_slice());
    }
}
