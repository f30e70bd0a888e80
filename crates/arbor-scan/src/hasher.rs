//! Streaming node digests.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use md5::{Digest, Md5};
use sha1::Sha1;

use arbor_core::{HashAlgorithm, HashEncoding};

enum Inner {
    Md5(Md5),
    Sha1(Sha1),
}

/// Accumulates byte chunks and finalizes to an encoded digest string.
///
/// A node's digest starts with its name; files append their content,
/// directories append each kept child's already-encoded digest string in
/// traversal order.
pub struct NodeHasher {
    inner: Inner,
    encoding: HashEncoding,
}

impl NodeHasher {
    /// Create a hasher for the given algorithm and output encoding.
    pub fn new(algorithm: HashAlgorithm, encoding: HashEncoding) -> Self {
        let inner = match algorithm {
            HashAlgorithm::Md5 => Inner::Md5(Md5::new()),
            HashAlgorithm::Sha1 => Inner::Sha1(Sha1::new()),
        };
        Self { inner, encoding }
    }

    /// Feed one chunk.
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        match &mut self.inner {
            Inner::Md5(hasher) => hasher.update(data),
            Inner::Sha1(hasher) => hasher.update(data),
        }
    }

    /// Finalize to an encoded string.
    pub fn finalize(self) -> String {
        let digest = match self.inner {
            Inner::Md5(hasher) => hasher.finalize().to_vec(),
            Inner::Sha1(hasher) => hasher.finalize().to_vec(),
        };
        encode(&digest, self.encoding)
    }
}

fn encode(bytes: &[u8], encoding: HashEncoding) -> String {
    match encoding {
        HashEncoding::Hex => bytes.iter().map(|b| format!("{b:02x}")).collect(),
        HashEncoding::Base64 => STANDARD.encode(bytes),
        HashEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
    }
}
