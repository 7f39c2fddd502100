//! Bytecode analysis: entropy, proxy signatures, repetition and similarity
//!
//! All functions work on hex strings so they accept anything an RPC node or
//! block explorer hands back, including `"0x"` for addresses without code.

use std::collections::HashMap;
use ethers::types::Address;
use crate::models::ContractRecord;

/// Below this many bytes a contract counts as trivially small
pub const SMALL_BYTECODE_BYTES: usize = 200;

/// Entropy (bits per hex digit) under which code looks templated or padded
pub const LOW_ENTROPY_BITS: f64 = 3.5;

/// A bytecode shared by more than this many addresses is a repeat
pub const REPETITION_THRESHOLD: usize = 3;

/// Positional match ratio above which two bytecodes are near-identical
pub const SIMILARITY_THRESHOLD: f64 = 0.95;

/// Length difference (hex characters) beyond which bytecodes are never similar
pub const MAX_SIMILAR_LENGTH_DIFF: usize = 100;

/// Hex signatures of delegating contracts
const PROXY_PATTERNS: &[&str] = &[
    "363d3d373d3d3d363d73", // EIP-1167 minimal proxy
    "5c60da1b",             // implementation()
    "1967",                 // EIP-1967 marker
    "7f360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc", // PUSH32 EIP-1967 implementation slot
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BytecodePattern {
    pub size_bytes: usize,
    pub is_small: bool,
    pub low_entropy: bool,
    pub entropy: f64,
}

fn strip_hex_prefix(bytecode: &str) -> &str {
    bytecode.strip_prefix("0x").unwrap_or(bytecode)
}

/// Shannon entropy in bits over the hex-digit distribution (max 4.0)
pub fn calculate_entropy(bytecode: &str) -> f64 {
    let hex = strip_hex_prefix(bytecode);
    if hex.len() <= 1 {
        return 0.0;
    }

    let mut frequency: HashMap<char, usize> = HashMap::new();
    for c in hex.chars() {
        *frequency.entry(c.to_ascii_lowercase()).or_insert(0) += 1;
    }

    let length = hex.chars().count() as f64;

    frequency.values().fold(0.0, |entropy, &count| {
        let p = count as f64 / length;
        entropy - p * p.log2()
    })
}

pub fn analyze_bytecode_pattern(bytecode: &str) -> BytecodePattern {
    let size_bytes = strip_hex_prefix(bytecode).len() / 2;
    let entropy = calculate_entropy(bytecode);

    BytecodePattern {
        size_bytes,
        is_small: size_bytes < SMALL_BYTECODE_BYTES,
        low_entropy: entropy < LOW_ENTROPY_BITS,
        entropy,
    }
}

/// Does the code carry a known delegate-call or implementation-slot signature?
pub fn is_proxy_bytecode(bytecode: &str) -> bool {
    let code = bytecode.to_ascii_lowercase();
    PROXY_PATTERNS.iter().any(|pattern| code.contains(pattern))
}

/// Group addresses by case-insensitive bytecode, keeping only groups larger
/// than [`REPETITION_THRESHOLD`]
pub fn detect_bytecode_repetition(contracts: &[ContractRecord]) -> HashMap<String, Vec<Address>> {
    let mut groups: HashMap<String, Vec<Address>> = HashMap::new();

    for contract in contracts {
        groups
            .entry(contract.bytecode_hex().to_ascii_lowercase())
            .or_default()
            .push(contract.address);
    }

    groups.retain(|_, addresses| addresses.len() > REPETITION_THRESHOLD);
    groups
}

/// Cheap positional comparison over the shared prefix.
///
/// Not an alignment: a one-byte shift makes two otherwise identical codes dissimilar.
pub fn is_similar_bytecode(bytecode1: &str, bytecode2: &str) -> bool {
    let b1 = strip_hex_prefix(bytecode1).as_bytes();
    let b2 = strip_hex_prefix(bytecode2).as_bytes();

    if b1.is_empty() || b2.is_empty() {
        return false;
    }

    if b1.len().abs_diff(b2.len()) > MAX_SIMILAR_LENGTH_DIFF {
        return false;
    }

    let min_length = b1.len().min(b2.len());
    let differences = b1
        .iter()
        .zip(b2.iter())
        .filter(|(x, y)| !x.eq_ignore_ascii_case(y))
        .count();

    let similarity = 1.0 - differences as f64 / min_length as f64;
    similarity > SIMILARITY_THRESHOLD
}
