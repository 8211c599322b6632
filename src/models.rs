use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chain-assigned referendum index
pub type ReferendumIndex = u32;

/// Governance track id
pub type TrackId = u16;

/// Block number as reported by the chain
pub type BlockNumber = u32;

/// Balance in the chain's smallest unit (planck)
pub type Balance = u128;

/// Networks with a built-in track table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Polkadot,
    Kusama,
    Westend,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Polkadot => "Polkadot",
            Network::Kusama => "Kusama",
            Network::Westend => "Westend",
        }
    }

    pub fn token_symbol(&self) -> &'static str {
        match self {
            Network::Polkadot => "DOT",
            Network::Kusama => "KSM",
            Network::Westend => "WND",
        }
    }

    pub fn token_decimals(&self) -> u32 {
        match self {
            Network::Polkadot => 10,
            Network::Kusama | Network::Westend => 12,
        }
    }

    /// Guess the network from an endpoint URL or snapshot path
    pub fn detect(endpoint: &str) -> Option<Network> {
        let lower = endpoint.to_ascii_lowercase();
        // kusama first: kusama-rpc.polkadot.io is a Kusama host
        if lower.contains("kusama") || lower.contains("ksm") {
            Some(Network::Kusama)
        } else if lower.contains("westend") || lower.contains("wnd") {
            Some(Network::Westend)
        } else if lower.contains("polkadot") || lower.contains("dot") {
            Some(Network::Polkadot)
        } else {
            None
        }
    }
}

/// Static metadata describing a governance track
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub name: &'static str,
    pub max_deciding: u32,
    pub decision_deposit: Balance,
    pub prepare_period: BlockNumber,
    pub decision_period: BlockNumber,
    pub confirm_period: BlockNumber,
    pub min_enactment_period: BlockNumber,
}

/// A deposit placed by an account
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Deposit {
    pub who: String,
    #[serde(deserialize_with = "deserialize_balance")]
    pub amount: Balance,
}

/// Current vote totals of an ongoing referendum
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Tally {
    #[serde(deserialize_with = "deserialize_balance")]
    pub ayes: Balance,
    #[serde(deserialize_with = "deserialize_balance")]
    pub nays: Balance,
    #[serde(default, deserialize_with = "deserialize_balance")]
    pub support: Balance,
}

impl Tally {
    /// Share of ayes in the decided votes, in percent
    pub fn approval_percent(&self) -> Option<f64> {
        let total = self.ayes.checked_add(self.nays)?;
        if total == 0 {
            return None;
        }
        Some(self.ayes as f64 * 100.0 / total as f64)
    }
}

/// The call a referendum would dispatch
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Proposal {
    Legacy { hash: String },
    Inline(String),
    Lookup { hash: String, len: u32 },
}

impl Proposal {
    pub fn summary(&self) -> String {
        match self {
            Proposal::Legacy { hash } => format!("legacy {}", hash),
            Proposal::Inline(bytes) => {
                let len = bytes.trim_start_matches("0x").len() / 2;
                format!("inline call ({} bytes)", len)
            }
            Proposal::Lookup { hash, len } => format!("{} ({} bytes)", hash, len),
        }
    }
}

/// When an approved proposal gets enacted
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Enactment {
    At(BlockNumber),
    After(BlockNumber),
}

/// Decision-period state of an ongoing referendum
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Deciding {
    pub since: BlockNumber,
    pub confirming: Option<BlockNumber>,
}

/// Data carried by an ongoing referendum
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferendumOngoing {
    pub track: TrackId,
    #[serde(default)]
    pub origin: serde_json::Value,
    pub proposal: Proposal,
    pub enactment: Option<Enactment>,
    pub submitted: BlockNumber,
    pub submission_deposit: Option<Deposit>,
    pub decision_deposit: Option<Deposit>,
    pub deciding: Option<Deciding>,
    #[serde(default)]
    pub tally: Tally,
    #[serde(default)]
    pub in_queue: bool,
}

impl ReferendumOngoing {
    /// Compact rendering of the origin, e.g. `origins: SmallSpender`
    pub fn origin_label(&self) -> String {
        fn label(value: &serde_json::Value) -> String {
            match value {
                serde_json::Value::Object(map) => map
                    .iter()
                    .map(|(k, v)| match v {
                        serde_json::Value::Null => k.clone(),
                        _ => format!("{}: {}", k, label(v)),
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Null => String::from("-"),
                other => other.to_string(),
            }
        }
        label(&self.origin)
    }
}

/// A referendum that is no longer open: closed at `since`, with the deposits
/// that were returned (if any)
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClosedReferendum(
    pub BlockNumber,
    pub Option<Deposit>,
    pub Option<Deposit>,
);

/// Lifecycle state of a referendum
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Referendum {
    Ongoing(ReferendumOngoing),
    Approved(ClosedReferendum),
    Rejected(ClosedReferendum),
    Cancelled(ClosedReferendum),
    TimedOut(ClosedReferendum),
    Killed(BlockNumber),
}

impl Referendum {
    pub fn as_ongoing(&self) -> Option<&ReferendumOngoing> {
        match self {
            Referendum::Ongoing(ongoing) => Some(ongoing),
            _ => None,
        }
    }

    pub fn into_ongoing(self) -> Option<ReferendumOngoing> {
        match self {
            Referendum::Ongoing(ongoing) => Some(ongoing),
            _ => None,
        }
    }
}

/// Decision cast on a referendum
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteType {
    Aye,
    Nay,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Aye => "Aye",
            VoteType::Nay => "Nay",
        }
    }
}

/// A single cast decision, kept for the session summary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vote {
    pub index: ReferendumIndex,
    pub vote: VoteType,
}

/// Accepts a JSON number, a decimal string, or a `0x` hex string
pub fn deserialize_balance<'de, D>(deserializer: D) -> Result<Balance, D::Error>
where
    D: Deserializer<'de>,
{
    struct BalanceVisitor;

    impl<'de> Visitor<'de> for BalanceVisitor {
        type Value = Balance;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a balance as number, decimal string or 0x-prefixed hex")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Balance, E> {
            Ok(v as Balance)
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<Balance, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Balance, E> {
            Balance::try_from(v).map_err(|_| E::custom(format!("negative balance: {}", v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Balance, E> {
            let parsed = match v.strip_prefix("0x") {
                Some(hex) => Balance::from_str_radix(hex, 16),
                None => v.parse::<Balance>(),
            };
            parsed.map_err(|e| E::custom(format!("invalid balance {:?}: {}", v, e)))
        }
    }

    deserializer.deserialize_any(BalanceVisitor)
}
