// Copyright (C) 2020-2026 Andy Kurnia.

use md5::{Digest, Md5};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

/// The md5 of the seed read as a big-endian 128-bit integer.
pub fn seed_to_int(seed: &str) -> u128 {
    let digest = Md5::digest(seed.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    u128::from_be_bytes(bytes)
}

// each caller gets its own generator, nothing is shared.
pub fn make_rng(int_seed: u128) -> ChaCha20Rng {
    let mut key = [0u8; 32];
    key[..16].copy_from_slice(&int_seed.to_le_bytes());
    ChaCha20Rng::from_seed(key)
}

pub fn shuffle<T>(items: &mut [T], int_seed: u128) {
    items.shuffle(&mut make_rng(int_seed));
}
