//! Capability keys and the profile record.

use super::coerce::{clamp_score, coerce_score};
use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest score a capability can hold.
pub const MAX_SCORE: u8 = 100;

/// The five capabilities every stage is weighted over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Product,
    Team,
    Strategy,
    Marketing,
    ConsumerNeeds,
}

impl Capability {
    /// All capabilities in canonical order
    pub const ALL: [Capability; 5] = [
        Capability::Product,
        Capability::Team,
        Capability::Strategy,
        Capability::Marketing,
        Capability::ConsumerNeeds,
    ];

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        match self {
            Capability::Product => 0,
            Capability::Team => 1,
            Capability::Strategy => 2,
            Capability::Marketing => 3,
            Capability::ConsumerNeeds => 4,
        }
    }

    /// Key used in upstream JSON documents.
    pub fn key(self) -> &'static str {
        match self {
            Capability::Product => "product",
            Capability::Team => "team",
            Capability::Strategy => "strategy",
            Capability::Marketing => "marketing",
            Capability::ConsumerNeeds => "consumer_needs",
        }
    }

    /// Short label for reports
    pub fn label(self) -> &'static str {
        match self {
            Capability::Product => "Product",
            Capability::Team => "Team",
            Capability::Strategy => "Strategy",
            Capability::Marketing => "Marketing",
            Capability::ConsumerNeeds => "Needs",
        }
    }

    /// Look up a capability by its JSON key.
    pub fn from_key(key: &str) -> Option<Capability> {
        Capability::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Five clamped capability scores.
///
/// Fields are private: the only ways in are the clamping constructors and
/// the lenient deserializer, so every stored score is within [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawProfile")]
pub struct CapabilityProfile {
    product: u8,
    team: u8,
    strategy: u8,
    marketing: u8,
    consumer_needs: u8,
}

impl CapabilityProfile {
    /// Build a profile, clamping every score into [0, 100].
    pub fn new(product: i64, team: i64, strategy: i64, marketing: i64, consumer_needs: i64) -> Self {
        Self {
            product: clamp_score(product),
            team: clamp_score(team),
            strategy: clamp_score(strategy),
            marketing: clamp_score(marketing),
            consumer_needs: clamp_score(consumer_needs),
        }
    }

    /// Profile with the same score for every capability.
    pub fn uniform(score: i64) -> Self {
        Self::new(score, score, score, score, score)
    }

    /// Parse an upstream analysis document.
    ///
    /// Only text that is not JSON at all is rejected. Any JSON value is
    /// accepted and scores that cannot be read as numbers become 0.
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        let value: serde_json::Value = serde_json::from_str(text).map_err(SimError::ProfileFormat)?;
        Ok(Self::from_value(&value))
    }

    /// Build from an already-parsed JSON value. Non-objects give the zero profile.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let score = |c: Capability| coerce_score(value.get(c.key()));
        Self {
            product: score(Capability::Product),
            team: score(Capability::Team),
            strategy: score(Capability::Strategy),
            marketing: score(Capability::Marketing),
            consumer_needs: score(Capability::ConsumerNeeds),
        }
    }

    /// Copy of this profile with one score replaced (clamped).
    pub fn with_score(mut self, capability: Capability, score: i64) -> Self {
        let score = clamp_score(score);
        match capability {
            Capability::Product => self.product = score,
            Capability::Team => self.team = score,
            Capability::Strategy => self.strategy = score,
            Capability::Marketing => self.marketing = score,
            Capability::ConsumerNeeds => self.consumer_needs = score,
        }
        self
    }

    pub fn get(&self, capability: Capability) -> u8 {
        match capability {
            Capability::Product => self.product,
            Capability::Team => self.team,
            Capability::Strategy => self.strategy,
            Capability::Marketing => self.marketing,
            Capability::ConsumerNeeds => self.consumer_needs,
        }
    }

    /// Scores in canonical capability order.
    pub fn iter(&self) -> impl Iterator<Item = (Capability, u8)> + '_ {
        Capability::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl Default for CapabilityProfile {
    fn default() -> Self {
        Self::uniform(0)
    }
}

/// Loosely-typed wire shape; every field is coerced on conversion.
#[derive(Debug, Deserialize)]
struct RawProfile {
    #[serde(default)]
    product: serde_json::Value,
    #[serde(default)]
    team: serde_json::Value,
    #[serde(default)]
    strategy: serde_json::Value,
    #[serde(default)]
    marketing: serde_json::Value,
    #[serde(default)]
    consumer_needs: serde_json::Value,
}

impl From<RawProfile> for CapabilityProfile {
    fn from(raw: RawProfile) -> Self {
        Self {
            product: coerce_score(Some(&raw.product)),
            team: coerce_score(Some(&raw.team)),
            strategy: coerce_score(Some(&raw.strategy)),
            marketing: coerce_score(Some(&raw.marketing)),
            consumer_needs: coerce_score(Some(&raw.consumer_needs)),
        }
    }
}
