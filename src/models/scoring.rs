use serde::{Deserialize, Serialize};

/// Quality label for a contract or a whole wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Label {
    HighQuality,
    Neutral,
    AirdropFarming,
}

impl Label {
    /// Contract-level thresholds: >= 20 high quality, >= -10 neutral
    pub fn from_contract_score(score: i64) -> Self {
        if score >= 20 {
            Label::HighQuality
        } else if score >= -10 {
            Label::Neutral
        } else {
            Label::AirdropFarming
        }
    }

    /// Wallet-level thresholds over the per-contract average and the adjusted total
    pub fn from_wallet_scores(average: f64, total: i64) -> Self {
        if average >= 15.0 && total >= 30 {
            Label::HighQuality
        } else if average >= -5.0 && total >= -20 {
            Label::Neutral
        } else {
            Label::AirdropFarming
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::HighQuality => "high-quality",
            Label::Neutral => "neutral",
            Label::AirdropFarming => "airdrop-farming",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Label::HighQuality => "🟢",
            Label::Neutral => "🟡",
            Label::AirdropFarming => "🔴",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score, label and the evidence behind them.
///
/// `reasons` follows rule evaluation order; each entry starts with its signed delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub score: i64,
    pub label: Label,
    pub reasons: Vec<String>,
}

impl ScoringResult {
    pub fn new(score: i64, label: Label) -> Self {
        Self {
            score,
            label,
            reasons: Vec::new(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }
}
