//! Digest validation as a stream decorator.
//!
//! Every byte read through a [`DigestReader`] feeds a running digest before
//! being handed to the caller; after full consumption the finalized digest
//! is compared byte-for-byte against the expected value. Validity is
//! recomputed on each query by finalizing a clone of the running hasher, so
//! nothing is cached between calls.

use crate::error::FetchError;
use sha2::{Digest, Sha256, Sha512};
use std::io::{self, Read};

use super::{CloseRead, ValidatingRead};

/// Digest algorithms available for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    /// Parse an algorithm identifier; anything unrecognized is
    /// [`FetchError::UnsupportedAlgorithm`].
    pub fn parse(name: &str) -> Result<Self, FetchError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sha-256" | "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha-512" | "sha512" => Ok(DigestAlgorithm::Sha512),
            _ => Err(FetchError::UnsupportedAlgorithm(name.to_string())),
        }
    }
}

#[derive(Clone)]
enum Hasher {
    Sha256(Sha256),
    Sha512(Sha512),
}

impl Hasher {
    fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Sha256 => Hasher::Sha256(Sha256::new()),
            DigestAlgorithm::Sha512 => Hasher::Sha512(Sha512::new()),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Sha256(h) => h.update(data),
            Hasher::Sha512(h) => h.update(data),
        }
    }

    /// Digest over everything hashed so far, without disturbing the
    /// running state.
    fn current_digest(&self) -> Vec<u8> {
        match self.clone() {
            Hasher::Sha256(h) => h.finalize().to_vec(),
            Hasher::Sha512(h) => h.finalize().to_vec(),
        }
    }
}

/// Decorator stream that checks its content against an expected digest.
/// Owns the wrapped stream; closing the decorator closes it.
pub struct DigestReader<R> {
    inner: R,
    hasher: Hasher,
    expected: Vec<u8>,
}

impl<R: Read> DigestReader<R> {
    pub fn new(inner: R, algorithm: DigestAlgorithm, expected: Vec<u8>) -> Self {
        DigestReader {
            inner,
            hasher: Hasher::new(algorithm),
            expected,
        }
    }

    /// Like [`DigestReader::new`] but resolving the algorithm by name.
    pub fn with_algorithm_name(
        inner: R,
        name: &str,
        expected: Vec<u8>,
    ) -> Result<Self, FetchError> {
        Ok(DigestReader::new(
            inner,
            DigestAlgorithm::parse(name)?,
            expected,
        ))
    }
}

impl<R: Read> Read for DigestReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

impl<R: ValidatingRead> ValidatingRead for DigestReader<R> {
    /// Problems of the wrapped stream first, then the digest comparison.
    fn collect_validation_errors(&self, errors: &mut Vec<String>) {
        self.inner.collect_validation_errors(errors);
        let actual = self.hasher.current_digest();
        if actual != self.expected {
            errors.push(format!(
                "checksum mismatch. Expected: {}, actual: {}",
                hex::encode(&self.expected),
                hex::encode(&actual)
            ));
        }
    }
}

impl<R: CloseRead> CloseRead for DigestReader<R> {
    fn close(&mut self) -> io::Result<()> {
        self.inner.close()
    }
}
