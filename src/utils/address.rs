//! Deployer address validation

use ethers::types::Address;
use ethers::utils::to_checksum;
use crate::utils::{Result, ScoutError};

/// Parse a `0x`-prefixed 20-byte address.
///
/// All-lowercase and all-uppercase hex are accepted as-is. Mixed case must
/// match the EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address> {
    let trimmed = input.trim();
    let invalid = || ScoutError::InvalidAddress(input.to_string());

    let hex_part = trimmed.strip_prefix("0x").ok_or_else(invalid)?;
    if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let address: Address = trimmed.parse().map_err(|_| invalid())?;

    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && to_checksum(&address, None) != trimmed {
        return Err(invalid());
    }

    Ok(address)
}
