//! BIP-32 extended private keys on secp256k1
//!
//! Master key: `I = HMAC-SHA512("Bitcoin seed", seed)`, secret = IL, chain code = IR.
//! Child key:  `I = HMAC-SHA512(c_par, data || ser32(i))` where data is
//! `0x00 || ser256(k_par)` for hardened children and `serP(K_par)` otherwise;
//! `k_i = IL + k_par (mod n)`.

use std::fmt;

use hmac::{Hmac, Mac};
use k256::{
    elliptic_curve::{sec1::ToEncodedPoint, PrimeField},
    FieldBytes, NonZeroScalar, Scalar, SecretKey,
};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

use crate::address::Address;
use crate::error::{CoreError, Result};
use crate::mnemonic::Seed;
use crate::path::{ChildNumber, DerivationPath};

type HmacSha512 = Hmac<Sha512>;

/// HMAC key for master key generation
const MASTER_KEY_DOMAIN: &[u8] = b"Bitcoin seed";

/// Extended private key: secret scalar plus chain code
#[derive(Clone)]
pub struct ExtendedPrivateKey {
    secret: SecretKey,
    chain_code: [u8; 32],
    depth: u8,
    child_number: Option<ChildNumber>,
}

impl ExtendedPrivateKey {
    /// Derive the master key from a BIP-39 seed
    pub fn from_seed(seed: &Seed) -> Result<Self> {
        Self::from_seed_bytes(seed.as_bytes())
    }

    /// Derive the master key from raw seed bytes (16..=64 bytes per BIP-32)
    pub fn from_seed_bytes(seed: &[u8]) -> Result<Self> {
        if !(16..=64).contains(&seed.len()) {
            return Err(CoreError::KeyDerivation(format!(
                "seed length {} outside 16..=64",
                seed.len()
            )));
        }

        let i = hmac_sha512(MASTER_KEY_DOMAIN, &[seed])?;
        let (il, ir) = i.split_at(32);

        let secret = SecretKey::from_bytes(FieldBytes::from_slice(il))
            .map_err(|_| CoreError::KeyDerivation("invalid master key".to_string()))?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        Ok(Self {
            secret,
            chain_code,
            depth: 0,
            child_number: None,
        })
    }

    /// Derive a single child key (CKDpriv)
    pub fn derive_child(&self, child: ChildNumber) -> Result<Self> {
        let depth = self.depth.checked_add(1).ok_or_else(|| {
            CoreError::KeyDerivation("maximum derivation depth reached".to_string())
        })?;

        let index_bytes = child.value().to_be_bytes();
        let i = if child.is_hardened() {
            let secret_bytes = self.private_key_bytes();
            hmac_sha512(
                &self.chain_code,
                &[&[0u8][..], &secret_bytes[..], &index_bytes[..]],
            )?
        } else {
            let public = self.public_key_compressed();
            hmac_sha512(&self.chain_code, &[&public[..], &index_bytes[..]])?
        };
        let (il, ir) = i.split_at(32);

        let tweak: Option<Scalar> = Scalar::from_repr(FieldBytes::clone_from_slice(il)).into();
        let tweak = tweak.ok_or_else(|| {
            CoreError::KeyDerivation(format!("IL out of range at child {}", child))
        })?;

        let parent = *self.secret.to_nonzero_scalar();
        let child_scalar: Option<NonZeroScalar> = NonZeroScalar::new(tweak + parent).into();
        let child_scalar = child_scalar.ok_or_else(|| {
            CoreError::KeyDerivation(format!("zero child key at child {}", child))
        })?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        Ok(Self {
            secret: SecretKey::from(child_scalar),
            chain_code,
            depth,
            child_number: Some(child),
        })
    }

    /// Walk a derivation path from this key
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        path.components()
            .iter()
            .try_fold(self.clone(), |key, child| key.derive_child(*child))
    }

    /// Depth in the tree (master is 0)
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Child number this key was derived with (None for master)
    pub fn child_number(&self) -> Option<ChildNumber> {
        self.child_number
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// SEC1 compressed public key (33 bytes)
    pub fn public_key_compressed(&self) -> [u8; 33] {
        let encoded = self.secret.public_key().to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// SEC1 uncompressed public key (65 bytes, 0x04 prefix)
    pub fn public_key_uncompressed(&self) -> [u8; 65] {
        let encoded = self.secret.public_key().to_encoded_point(false);
        let mut out = [0u8; 65];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// Raw private key bytes (use with caution!)
    pub fn private_key_bytes(&self) -> Zeroizing<[u8; 32]> {
        let mut out = Zeroizing::new([0u8; 32]);
        out.copy_from_slice(&self.secret.to_bytes());
        out
    }

    /// Private key as lowercase hex without a `0x` prefix
    pub fn private_key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.private_key_bytes().as_slice()))
    }

    /// Ethereum address of this key
    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key_uncompressed())
    }
}

impl Drop for ExtendedPrivateKey {
    fn drop(&mut self) {
        self.chain_code.zeroize();
    }
}

impl fmt::Debug for ExtendedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("depth", &self.depth)
            .field("child_number", &self.child_number)
            .field("public_key", &hex::encode(self.public_key_compressed()))
            .finish_non_exhaustive()
    }
}

fn hmac_sha512(key: &[u8], data: &[&[u8]]) -> Result<Zeroizing<[u8; 64]>> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| CoreError::KeyDerivation(format!("HMAC init: {}", e)))?;
    for part in data {
        mac.update(part);
    }
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}
