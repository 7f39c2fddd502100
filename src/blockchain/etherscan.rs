//! Etherscan v2 client: account history and source verification

use async_trait::async_trait;
use ethers::types::{Address, H256};
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use crate::blockchain::{IndexedTransaction, TransactionIndex, VerificationRegistry};
use crate::utils::{Result, ScannerConfig, ScoutError};

#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    status: String,
    message: String,
    /// An array on success, an error string otherwise
    result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    hash: String,
    from: String,
    #[serde(default)]
    to: String,
    block_number: String,
    time_stamp: String,
}

#[derive(Debug, Deserialize)]
struct RawSourceCode {
    #[serde(rename = "SourceCode", default)]
    source_code: String,
}

/// Block explorer client. Without an API key every call reports unavailable/unverified.
pub struct EtherscanClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    chain_id: u64,
    request_timeout: Duration,
}

impl EtherscanClient {
    pub fn new(config: &ScannerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.index_timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: config.etherscan_api_url.clone(),
            api_key: config.etherscan_api_key.clone(),
            chain_id: config.chain_id,
            request_timeout: config.index_timeout,
        })
    }

    async fn get(&self, params: &[(&str, String)]) -> Result<EtherscanResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ScoutError::SourceUnavailable("ETHERSCAN_API_KEY not set".into())
        })?;

        let mut query: Vec<(&str, String)> = vec![("chainid", self.chain_id.to_string())];
        query.extend_from_slice(params);
        query.push(("apikey", api_key.to_string()));

        let resp = self
            .http
            .get(&self.api_url)
            .query(&query)
            .timeout(self.request_timeout)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ScoutError::SourceUnavailable(format!("HTTP {}", resp.status())));
        }

        Ok(resp.json::<EtherscanResponse>().await?)
    }

    /// Verification lookup that surfaces errors, for callers that need to tell them apart
    pub async fn fetch_verification(&self, contract: Address) -> Result<bool> {
        let response = self
            .get(&[
                ("module", "contract".to_string()),
                ("action", "getsourcecode".to_string()),
                ("address", format!("{:?}", contract)),
            ])
            .await?;

        parse_source_code(response)
    }
}

fn parse_field<T: FromStr>(field: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ScoutError::SourceUnavailable(format!("Malformed {} in index response: {}", field, value)))
}

fn parse_txlist(response: EtherscanResponse) -> Result<Vec<IndexedTransaction>> {
    if response.status != "1" {
        // Empty history is reported as a failure status
        if response.message.starts_with("No transactions found") {
            return Ok(Vec::new());
        }
        return Err(ScoutError::SourceUnavailable(format!(
            "{}: {}",
            response.message, response.result
        )));
    }

    let raw: Vec<RawTransaction> = serde_json::from_value(response.result)?;

    raw.into_iter()
        .map(|tx| {
            let to = if tx.to.trim().is_empty() {
                None
            } else {
                Some(parse_field::<Address>("to", &tx.to)?)
            };

            Ok(IndexedTransaction {
                hash: parse_field::<H256>("hash", &tx.hash)?,
                from: parse_field::<Address>("from", &tx.from)?,
                to,
                block_number: parse_field("blockNumber", &tx.block_number)?,
                timestamp: parse_field("timeStamp", &tx.time_stamp)?,
            })
        })
        .collect()
}

fn parse_source_code(response: EtherscanResponse) -> Result<bool> {
    if response.status != "1" {
        return Ok(false);
    }

    let entries: Vec<RawSourceCode> = serde_json::from_value(response.result)?;
    Ok(entries.first().map(|e| !e.source_code.is_empty()).unwrap_or(false))
}

#[async_trait]
impl TransactionIndex for EtherscanClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn transactions(&self, address: Address, end_block: u64, limit: usize) -> Result<Vec<IndexedTransaction>> {
        tracing::debug!("Fetching transaction history for {:?} up to block {}", address, end_block);

        let response = self
            .get(&[
                ("module", "account".to_string()),
                ("action", "txlist".to_string()),
                ("address", format!("{:?}", address)),
                ("startblock", "0".to_string()),
                ("endblock", end_block.to_string()),
                ("page", "1".to_string()),
                ("offset", limit.to_string()),
                ("sort", "desc".to_string()),
            ])
            .await?;

        parse_txlist(response)
    }
}

#[async_trait]
impl VerificationRegistry for EtherscanClient {
    async fn is_verified(&self, contract: Address) -> bool {
        if self.api_key.is_none() {
            return false;
        }

        match self.fetch_verification(contract).await {
            Ok(verified) => verified,
            Err(e) => {
                tracing::debug!("Verification lookup failed for {:?}: {}", contract, e);
                false
            }
        }
    }
}
