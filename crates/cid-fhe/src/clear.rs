//! # Clear-Backed Simulation Engine
//!
//! In-memory [`FheEngine`] backend. Plaintexts live in a handle-keyed
//! table behind a `parking_lot::RwLock`; handles are minted from the OS
//! CSPRNG, so two encryptions of the same value yield distinct,
//! unlinkable handles.
//!
//! The [`reveal`](ClearBackedEngine::reveal) trapdoor is how the
//! simulated decryption oracle and the test harness read plaintexts
//! back. It is an inherent method, not part of [`FheEngine`] — code
//! written against the trait cannot reach it.

use std::collections::HashMap;

use parking_lot::RwLock;
use rand_core::{OsRng, RngCore};

use crate::engine::FheEngine;
use crate::error::FheError;
use crate::handle::{CipherBool, CiphertextHandle, HANDLE_LEN};

/// In-memory simulation of the homomorphic-encryption service.
///
/// Thread-safe; one instance is shared between the registry (which
/// computes over handles) and the simulated oracle (which reveals them).
pub struct ClearBackedEngine {
    ints: RwLock<HashMap<CiphertextHandle, u64>>,
    bools: RwLock<HashMap<CipherBool, bool>>,
}

impl ClearBackedEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self {
            ints: RwLock::new(HashMap::new()),
            bools: RwLock::new(HashMap::new()),
        }
    }

    fn mint_id() -> [u8; HANDLE_LEN] {
        let mut bytes = [0u8; HANDLE_LEN];
        OsRng.fill_bytes(&mut bytes);
        bytes
    }

    /// Encrypt a plaintext integer, returning a fresh handle.
    ///
    /// This is the client-side entry point: parties encrypt their
    /// attribute values before submitting them for registration.
    pub fn encrypt(&self, value: u64) -> CiphertextHandle {
        let handle = CiphertextHandle::from_bytes(Self::mint_id());
        self.ints.write().insert(handle, value);
        handle
    }

    /// Reveal the plaintext behind an integer handle.
    ///
    /// Trapdoor for the decryption oracle and test assertions. Not part
    /// of [`FheEngine`].
    pub fn reveal(&self, handle: &CiphertextHandle) -> Result<u64, FheError> {
        self.ints
            .read()
            .get(handle)
            .copied()
            .ok_or_else(|| FheError::UnknownHandle(handle.to_hex()))
    }

    /// Reveal the plaintext behind a boolean handle.
    pub fn reveal_bool(&self, handle: &CipherBool) -> Result<bool, FheError> {
        self.bools
            .read()
            .get(handle)
            .copied()
            .ok_or_else(|| FheError::UnknownHandle(handle.to_hex()))
    }

    fn lookup(&self, handle: &CiphertextHandle) -> Result<u64, FheError> {
        self.reveal(handle)
    }

    fn lookup_bool(&self, handle: &CipherBool) -> Result<bool, FheError> {
        self.reveal_bool(handle)
    }

    fn store_int(&self, value: u64) -> CiphertextHandle {
        let handle = CiphertextHandle::from_bytes(Self::mint_id());
        self.ints.write().insert(handle, value);
        handle
    }

    fn store_bool(&self, value: bool) -> CipherBool {
        let handle = CipherBool::from_bytes(Self::mint_id());
        self.bools.write().insert(handle, value);
        handle
    }
}

impl Default for ClearBackedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ClearBackedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClearBackedEngine")
            .field("int_handles", &self.ints.read().len())
            .field("bool_handles", &self.bools.read().len())
            .finish()
    }
}

impl FheEngine for ClearBackedEngine {
    fn encode_constant(&self, value: u64) -> Result<CiphertextHandle, FheError> {
        Ok(self.store_int(value))
    }

    fn compare_ge(
        &self,
        lhs: &CiphertextHandle,
        rhs: &CiphertextHandle,
    ) -> Result<CipherBool, FheError> {
        let l = self.lookup(lhs)?;
        let r = self.lookup(rhs)?;
        Ok(self.store_bool(l >= r))
    }

    fn and(&self, lhs: &CipherBool, rhs: &CipherBool) -> Result<CipherBool, FheError> {
        let l = self.lookup_bool(lhs)?;
        let r = self.lookup_bool(rhs)?;
        Ok(self.store_bool(l && r))
    }

    fn add(
        &self,
        lhs: &CiphertextHandle,
        rhs: &CiphertextHandle,
    ) -> Result<CiphertextHandle, FheError> {
        let l = self.lookup(lhs)?;
        let r = self.lookup(rhs)?;
        let sum = l.checked_add(r).ok_or(FheError::Overflow)?;
        Ok(self.store_int(sum))
    }

    fn engine_name(&self) -> &str {
        "ClearBackedEngine"
    }
}
