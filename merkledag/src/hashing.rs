use std::fmt::Display;

use bytes::Bytes;
use multihash::Multihash;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::digests::{Error, MAX_DIGEST_LEN};
use crate::ContentHash;

/// The hash functions a [crate::Node] can derive its identity with.
/// sha2-256 is what the wider DAG-PB ecosystem uses, and the default.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum HashAlgo {
    #[default]
    #[serde(rename = "sha2-256")]
    Sha2_256,
    #[serde(rename = "blake3")]
    Blake3,
}

impl HashAlgo {
    /// The multicodec code identifying this function inside a multihash.
    pub fn code(&self) -> u64 {
        match self {
            HashAlgo::Sha2_256 => 0x12,
            HashAlgo::Blake3 => 0x1e,
        }
    }

    /// Hashes `data` and wraps the digest into a multihash.
    pub fn digest(&self, data: &[u8]) -> ContentHash {
        let digest = match self {
            HashAlgo::Sha2_256 => Sha256::digest(data).to_vec(),
            HashAlgo::Blake3 => blake3::hash(data).as_bytes().to_vec(),
        };

        let mh = Multihash::<MAX_DIGEST_LEN>::wrap(self.code(), &digest)
            .expect("merkledag bug: digest exceeds multihash capacity");

        Bytes::from(mh.to_bytes()).into()
    }
}

impl Display for HashAlgo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            HashAlgo::Sha2_256 => write!(f, "sha2-256"),
            HashAlgo::Blake3 => write!(f, "blake3"),
        }
    }
}

impl TryFrom<&str> for HashAlgo {
    type Error = Error;

    fn try_from(algo_str: &str) -> Result<Self, Self::Error> {
        match algo_str {
            "sha2-256" => Ok(Self::Sha2_256),
            "blake3" => Ok(Self::Blake3),
            _ => Err(Error::InvalidAlgo(algo_str.to_string())),
        }
    }
}
