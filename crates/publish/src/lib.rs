//! # Publish — the finishing pipeline
//!
//! Turns an assembled [`NewsFile`] into the distributable artifact. The
//! steps run in a fixed order and none of them may be skipped or swapped:
//!
//! ```text
//! 1. serialize with zeroed checksum, filesize already final
//! 2. CRC32 over bytes [12..], patched into the header, re-serialized
//! 3. zlib-compress the whole stream
//! 4. SHA-1 the compressed bytes, RSA-sign the digest
//! 5. artifact = [64 zero bytes][signature][compressed stream]
//! ```
//!
//! The CRC region starts at byte 12 because the first three header fields
//! (version, filesize, checksum) are excluded; the checksum cannot cover
//! itself.
//!
//! Artifacts land at `{out}/v2/{language}/{country:03}/news.bin.{hour:02}`
//! via a temp file and an atomic rename, so a crash mid-write never leaves
//! a half-published file at the final path. Any failure in this module is
//! fatal to publication; there is no degraded output.

use assemble::NewsFile;
use crc32fast::Hasher as Crc32;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha1::{Digest, Sha1};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// First byte covered by the checksum: version, filesize and the checksum
/// field itself are excluded.
pub const CRC_REGION_START: usize = 12;

/// Size of the reserved block preceding the signature.
pub const RESERVED_BYTES: usize = 64;

/// Errors that abort publication.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The signing key file could not be read.
    #[error("signing key unreadable: {0}")]
    KeyIo(#[source] std::io::Error),

    /// The signing key file is not a valid PKCS#1 PEM private key.
    #[error("signing key invalid: {0}")]
    KeyFormat(#[from] rsa::pkcs1::Error),

    /// The RSA signing operation failed.
    #[error("signing failed: {0}")]
    Signing(#[from] rsa::Error),

    /// Compression or artifact I/O failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Computes the container checksum and returns the final uncompressed
/// stream.
///
/// Serializes once to feed the CRC, patches the header's checksum field,
/// and serializes again. Calling this twice is harmless: the checksum field
/// lies outside its own input region, so the second pass computes the same
/// value.
pub fn checksum(file: &mut NewsFile) -> Vec<u8> {
    let bytes = file.to_bytes();

    let mut hasher = Crc32::new();
    hasher.update(&bytes[CRC_REGION_START..]);
    file.header.crc32 = hasher.finalize();

    file.to_bytes()
}

/// zlib-compresses the serialized container.
pub fn compress(bytes: &[u8]) -> Result<Vec<u8>, PublishError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// The operator's RSA signing key.
#[derive(Debug)]
pub struct SigningKey {
    key: RsaPrivateKey,
}

impl SigningKey {
    /// Parses a PKCS#1 PEM private key.
    pub fn from_pem(pem: &str) -> Result<Self, PublishError> {
        Ok(Self {
            key: RsaPrivateKey::from_pkcs1_pem(pem)?,
        })
    }

    /// Reads and parses the key file at `path`.
    pub fn from_pem_file<P: AsRef<Path>>(path: P) -> Result<Self, PublishError> {
        let pem = std::fs::read_to_string(path).map_err(PublishError::KeyIo)?;
        Self::from_pem(&pem)
    }

    /// Signs `payload`: SHA-1 digest, then RSA PKCS#1 v1.5. Returns the raw
    /// signature (one modulus width of bytes).
    pub fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, PublishError> {
        let digest = Sha1::digest(payload);
        Ok(self.key.sign(Pkcs1v15Sign::new::<Sha1>(), &digest)?)
    }

    /// The signature length in bytes.
    #[must_use]
    pub fn signature_len(&self) -> usize {
        self.key.size()
    }

    /// Borrows the private key (tests verify signatures with its public
    /// half).
    #[must_use]
    pub fn key(&self) -> &RsaPrivateKey {
        &self.key
    }
}

/// Wraps a compressed stream into the published artifact:
/// `[64 zero bytes][signature over payload][payload]`.
pub fn seal(key: &SigningKey, compressed: &[u8]) -> Result<Vec<u8>, PublishError> {
    let signature = key.sign(compressed)?;

    let mut artifact = Vec::with_capacity(RESERVED_BYTES + signature.len() + compressed.len());
    artifact.extend_from_slice(&[0u8; RESERVED_BYTES]);
    artifact.extend_from_slice(&signature);
    artifact.extend_from_slice(compressed);

    Ok(artifact)
}

/// Runs the whole pipeline on an assembled container: checksum, compress,
/// sign, wrap.
pub fn finish(file: &mut NewsFile, key: &SigningKey) -> Result<Vec<u8>, PublishError> {
    let stream = checksum(file);
    let compressed = compress(&stream)?;
    let artifact = seal(key, &compressed)?;

    tracing::info!(
        raw = stream.len(),
        compressed = compressed.len(),
        artifact = artifact.len(),
        "container finished"
    );
    Ok(artifact)
}

/// Final path of one locale-hour's artifact under `out_dir`.
#[must_use]
pub fn artifact_path(out_dir: &Path, language_code: u8, country_code: u8, hour: u8) -> PathBuf {
    out_dir
        .join(format!("v2/{}/{:03}", language_code, country_code))
        .join(format!("news.bin.{:02}", hour))
}

/// Writes `artifact` to `path` atomically: parent directories are created,
/// bytes land in a sibling temp file, and a rename moves it into place only
/// after a successful sync.
pub fn write_artifact(path: &Path, artifact: &[u8]) -> Result<(), PublishError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    let tmp_path = path.with_file_name(format!("{}.tmp", file_name));

    let mut tmp = std::fs::File::create(&tmp_path)?;
    tmp.write_all(artifact)?;
    tmp.sync_all()?;
    drop(tmp);

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), bytes = artifact.len(), "artifact published");
    Ok(())
}
