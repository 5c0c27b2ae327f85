//! Checksummed version envelope
//!
//! Binary frame shared by addresses and WIF keys:
//! `version ‖ payload ‖ checksum4`, where `checksum4` is the first four bytes
//! of SHA-256 applied twice to `version ‖ payload`.

use crate::{Error, Result};
use sha2::{Digest, Sha256};

/// Checksum size in bytes
pub const CHECKSUM_LEN: usize = 4;

/// Smallest valid envelope: version byte plus checksum
pub const MIN_ENVELOPE_LEN: usize = 1 + CHECKSUM_LEN;

/// First four bytes of double SHA-256
pub fn checksum4(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = Sha256::digest(Sha256::digest(data));
    let mut checksum = [0u8; CHECKSUM_LEN];
    checksum.copy_from_slice(&hash[..CHECKSUM_LEN]);
    checksum
}

/// Frame `payload` under `version`
pub fn wrap(version: u8, payload: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(MIN_ENVELOPE_LEN + payload.len());
    data.push(version);
    data.extend_from_slice(payload);
    let checksum = checksum4(&data);
    data.extend_from_slice(&checksum);
    data
}

/// Verify and strip an envelope, returning `(version, payload)`.
///
/// The checksum is checked before the version, so a corrupted version byte
/// reports [`Error::ChecksumMismatch`].
pub fn unwrap(bytes: &[u8], expected_version: Option<u8>) -> Result<(u8, Vec<u8>)> {
    if bytes.len() < MIN_ENVELOPE_LEN {
        return Err(Error::MalformedEnvelope(bytes.len()));
    }

    let (data, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if checksum4(data) != checksum {
        return Err(Error::ChecksumMismatch);
    }

    let version = data[0];
    if let Some(expected) = expected_version {
        if expected != version {
            return Err(Error::VersionMismatch {
                expected,
                found: version,
            });
        }
    }

    Ok((version, data[1..].to_vec()))
}
