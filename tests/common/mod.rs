//! In-memory chain, index and registry for driving discovery without a network

#![allow(dead_code)]

use async_trait::async_trait;
use deployer_scout::blockchain::{ChainSource, IndexedTransaction, TransactionIndex, VerificationRegistry};
use deployer_scout::{Result, ScannerConfig, ScoutError};
use ethers::types::{Address, Bytes, Log, Transaction, TransactionReceipt, H256, U64};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const GENESIS_TIMESTAMP: u64 = 1_700_000_000;

pub fn block_timestamp(block: u64) -> u64 {
    GENESIS_TIMESTAMP + block * 2
}

pub fn deployer() -> Address {
    Address::from_low_u64_be(0xdead)
}

pub fn contract_address(n: u64) -> Address {
    Address::from_low_u64_be(0xc0_0000 + n)
}

pub fn tx_hash(n: u64) -> H256 {
    H256::from_low_u64_be(n)
}

/// EIP-1167 clone runtime code (45 bytes)
pub fn minimal_proxy_code() -> Bytes {
    let hex = "363d3d373d3d3d363d73bebebebebebebebebebebebebebebebebebebebe5af43d82803e903d91602b57fd5bf3";
    Bytes::from(hex::decode(hex).unwrap())
}

/// Varied code that trips none of the proxy signatures
pub fn plain_code(seed: u8, len: usize) -> Bytes {
    Bytes::from(
        (0..len)
            .map(|i| ((i as u32 * 13 + seed as u32) % 200 + 32) as u8)
            .collect::<Vec<u8>>(),
    )
}

/// Small scan windows so tests stay fast
pub fn test_config() -> ScannerConfig {
    ScannerConfig {
        index_timeout: Duration::from_millis(500),
        index_page_size: 100,
        indexed_cap: 20,
        direct_scan_cap: 20,
        direct_scan_window: 1_000,
        initial_chunk_size: 100,
        min_chunk_size: 2,
        max_chunk_size: 400,
        log_result_limit: 5,
        interaction_window: 400,
        scan_interaction_window: 200,
        interaction_chunk_size: 100,
        ..ScannerConfig::default()
    }
}

#[derive(Default)]
pub struct MockChain {
    pub head: u64,
    pub head_fails: bool,
    /// Per-call log limit; 0 means unlimited
    pub max_logs_per_call: usize,
    logs: Vec<Log>,
    transactions: HashMap<H256, Transaction>,
    receipts: HashMap<H256, TransactionReceipt>,
    code: HashMap<Address, Bytes>,
    next_tx: u64,
    calls: AtomicUsize,
    log_queries: Mutex<Vec<(u64, u64, Option<Address>, bool)>>,
}

impl MockChain {
    pub fn new(head: u64) -> Self {
        Self {
            head,
            next_tx: 1_000_000,
            ..Default::default()
        }
    }

    fn push_log(&mut self, emitter: Address, block: u64, hash: H256) {
        self.logs.push(Log {
            address: emitter,
            block_number: Some(U64::from(block)),
            transaction_hash: Some(hash),
            ..Default::default()
        });
    }

    /// Creation tx `tx` from `from` at `block`, emitting `events` logs from the new contract
    pub fn deploy(&mut self, from: Address, contract: Address, tx: H256, block: u64, code: Bytes, events: usize) {
        let mut receipt = TransactionReceipt {
            transaction_hash: tx,
            block_number: Some(U64::from(block)),
            contract_address: Some(contract),
            ..Default::default()
        };

        for _ in 0..events {
            self.push_log(contract, block, tx);
            receipt.logs.push(Log {
                address: contract,
                block_number: Some(U64::from(block)),
                transaction_hash: Some(tx),
                ..Default::default()
            });
        }

        self.transactions.insert(
            tx,
            Transaction {
                hash: tx,
                from,
                to: None,
                block_number: Some(U64::from(block)),
                ..Default::default()
            },
        );
        self.receipts.insert(tx, receipt);
        self.code.insert(contract, code);
    }

    /// An ordinary call to `target` at `block` that emits one log from it
    pub fn call(&mut self, from: Address, target: Address, block: u64) {
        let hash = H256::from_low_u64_be(self.next_tx);
        self.next_tx += 1;

        self.push_log(target, block, hash);
        self.transactions.insert(
            hash,
            Transaction {
                hash,
                from,
                to: Some(target),
                block_number: Some(U64::from(block)),
                ..Default::default()
            },
        );
    }

    pub fn drop_receipt(&mut self, tx: H256) {
        self.receipts.remove(&tx);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Unfiltered range queries in order: (from, to, rejected)
    pub fn scan_queries(&self) -> Vec<(u64, u64, bool)> {
        self.log_queries
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, _, address, _)| address.is_none())
            .map(|(from, to, _, rejected)| (*from, *to, *rejected))
            .collect()
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChainSource for MockChain {
    async fn block_number(&self) -> Result<u64> {
        self.touch();
        if self.head_fails {
            return Err(ScoutError::SourceUnavailable("node down".into()));
        }
        Ok(self.head)
    }

    async fn get_logs(&self, from: u64, to: u64, address: Option<Address>) -> Result<Vec<Log>> {
        self.touch();
        let logs: Vec<Log> = self
            .logs
            .iter()
            .filter(|log| {
                let block = log.block_number.map(|b| b.as_u64()).unwrap_or_default();
                block >= from && block <= to && address.map_or(true, |a| log.address == a)
            })
            .cloned()
            .collect();

        let rejected = self.max_logs_per_call > 0 && logs.len() > self.max_logs_per_call;
        self.log_queries.lock().unwrap().push((from, to, address, rejected));

        if rejected {
            return Err(ScoutError::TooManyResults { from, to });
        }
        Ok(logs)
    }

    async fn get_transaction(&self, hash: H256) -> Result<Option<Transaction>> {
        self.touch();
        Ok(self.transactions.get(&hash).cloned())
    }

    async fn get_receipt(&self, hash: H256) -> Result<Option<TransactionReceipt>> {
        self.touch();
        Ok(self.receipts.get(&hash).cloned())
    }

    async fn get_code(&self, address: Address) -> Result<Bytes> {
        self.touch();
        Ok(self.code.get(&address).cloned().unwrap_or_default())
    }

    async fn block_timestamp(&self, number: u64) -> Result<Option<u64>> {
        self.touch();
        Ok((number <= self.head).then(|| block_timestamp(number)))
    }
}

#[derive(Default)]
pub struct MockIndex {
    pub configured: bool,
    pub fails: bool,
    pub delay: Option<Duration>,
    pub history: Vec<IndexedTransaction>,
    pub calls: AtomicUsize,
}

impl MockIndex {
    pub fn configured(history: Vec<IndexedTransaction>) -> Self {
        Self {
            configured: true,
            history,
            ..Default::default()
        }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn creation(hash: H256, from: Address, block: u64, timestamp: u64) -> IndexedTransaction {
    IndexedTransaction {
        hash,
        from,
        to: None,
        block_number: block,
        timestamp,
    }
}

pub fn transfer(hash: H256, from: Address, to: Address, block: u64) -> IndexedTransaction {
    IndexedTransaction {
        hash,
        from,
        to: Some(to),
        block_number: block,
        timestamp: block_timestamp(block),
    }
}

#[async_trait]
impl TransactionIndex for MockIndex {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn transactions(&self, _address: Address, end_block: u64, limit: usize) -> Result<Vec<IndexedTransaction>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fails {
            return Err(ScoutError::SourceUnavailable("HTTP 503".into()));
        }

        Ok(self
            .history
            .iter()
            .filter(|tx| tx.block_number <= end_block)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MockRegistry {
    pub verified: HashSet<Address>,
}

impl MockRegistry {
    pub fn verifying(addresses: impl IntoIterator<Item = Address>) -> Self {
        Self {
            verified: addresses.into_iter().collect(),
        }
    }
}

#[async_trait]
impl VerificationRegistry for MockRegistry {
    async fn is_verified(&self, contract: Address) -> bool {
        self.verified.contains(&contract)
    }
}
