//! # Pricing Rules
//!
//! The business constants the engine prices with, and the per-batch
//! pricing context.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     INKLINE_DESIGN_CHARGE=300                                          │
//! │     INKLINE_AMBIGUOUS_VARIANT_POLICY=lowest_surcharge                  │
//! │                                                                         │
//! │  2. TOML document (handed in by the host application)                  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     The shop's current rules: 250 design charge below 1000, etc.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules File Format
//! ```toml
//! fraction_digits = 2
//! design_charge = "250"
//! design_charge_price_ceiling = "1000"
//! design_charge_waiver_threshold = "1000"
//! initial_payment_ratio = "0.25"
//! ambiguous_variant_policy = "reject"   # reject | lowest_surcharge
//! ```
//!
//! This module never opens files. The host reads the document and passes the
//! string to [`PricingRules::from_toml_str`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::money::Money;

/// Prefix for every environment override.
pub const ENV_PREFIX: &str = "INKLINE_";

// =============================================================================
// Config Error
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to parse pricing rules: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid pricing rules: {0}")]
    Invalid(String),
}

// =============================================================================
// Ambiguous Variant Policy
// =============================================================================

/// What to do when several variants match one selection set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguousVariantPolicy {
    /// Fail with `AmbiguousVariant` so the catalog gets fixed.
    #[default]
    Reject,

    /// Pick the variant with the lowest additional price.
    LowestSurcharge,
}

impl std::fmt::Display for AmbiguousVariantPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmbiguousVariantPolicy::Reject => write!(f, "reject"),
            AmbiguousVariantPolicy::LowestSurcharge => write!(f, "lowest_surcharge"),
        }
    }
}

impl FromStr for AmbiguousVariantPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" | "error" => Ok(AmbiguousVariantPolicy::Reject),
            "lowest_surcharge" | "lowest-surcharge" | "cheapest" => {
                Ok(AmbiguousVariantPolicy::LowestSurcharge)
            }
            _ => Err(ConfigError::InvalidValue(format!(
                "{}AMBIGUOUS_VARIANT_POLICY",
                ENV_PREFIX
            ))),
        }
    }
}

// =============================================================================
// Pricing Rules
// =============================================================================

/// Business constants used by line pricing and the order ledger.
///
/// ## Defaults
/// The defaults are the shop's current rules. Invoices already issued
/// depend on them, so change them only together with the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Decimal places used when rounding intermediate values.
    #[serde(default = "default_fraction_digits")]
    pub fraction_digits: u32,

    /// Flat surcharge added to cheap, small lines.
    #[serde(default = "default_design_charge")]
    pub design_charge: Money,

    /// The surcharge is only considered when base price is below this.
    #[serde(default = "default_threshold")]
    pub design_charge_price_ceiling: Money,

    /// The surcharge is waived once the discounted total exceeds this.
    #[serde(default = "default_threshold")]
    pub design_charge_waiver_threshold: Money,

    /// Suggested share of the subtotal to collect up front (advisory).
    #[serde(default = "default_initial_payment_ratio")]
    pub initial_payment_ratio: Decimal,

    #[serde(default)]
    pub ambiguous_variant_policy: AmbiguousVariantPolicy,
}

fn default_fraction_digits() -> u32 {
    2
}

fn default_design_charge() -> Money {
    Money::from_major(250)
}

fn default_threshold() -> Money {
    Money::from_major(1000)
}

fn default_initial_payment_ratio() -> Decimal {
    Decimal::new(25, 2)
}

impl Default for PricingRules {
    fn default() -> Self {
        PricingRules {
            fraction_digits: default_fraction_digits(),
            design_charge: default_design_charge(),
            design_charge_price_ceiling: default_threshold(),
            design_charge_waiver_threshold: default_threshold(),
            initial_payment_ratio: default_initial_payment_ratio(),
            ambiguous_variant_policy: AmbiguousVariantPolicy::default(),
        }
    }
}

impl PricingRules {
    /// Parses rules from a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let rules: PricingRules = toml::from_str(document)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Loads the defaults with overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        PricingRules::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `INKLINE_*` overrides using the given key lookup.
    ///
    /// The lookup is injected so tests (and hosts with their own settings
    /// store) don't have to touch the real environment.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            let key = format!("{}{}", ENV_PREFIX, name);
            lookup(&key).map(|value| (key, value))
        };

        if let Some((key, value)) = var("FRACTION_DIGITS") {
            self.fraction_digits = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key))?;
        }
        if let Some((key, value)) = var("DESIGN_CHARGE") {
            self.design_charge = parse_money(&key, &value)?;
        }
        if let Some((key, value)) = var("DESIGN_CHARGE_PRICE_CEILING") {
            self.design_charge_price_ceiling = parse_money(&key, &value)?;
        }
        if let Some((key, value)) = var("DESIGN_CHARGE_WAIVER_THRESHOLD") {
            self.design_charge_waiver_threshold = parse_money(&key, &value)?;
        }
        if let Some((key, value)) = var("INITIAL_PAYMENT_RATIO") {
            self.initial_payment_ratio =
                Decimal::from_str(value.trim()).map_err(|_| ConfigError::InvalidValue(key))?;
        }
        if let Some((_, value)) = var("AMBIGUOUS_VARIANT_POLICY") {
            self.ambiguous_variant_policy = value.trim().parse()?;
        }

        self.validate()?;
        debug!(
            design_charge = %self.design_charge,
            policy = %self.ambiguous_variant_policy,
            "Pricing rules loaded"
        );
        Ok(self)
    }

    /// Checks that the rules describe a sane price schedule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fraction_digits > 10 {
            return Err(ConfigError::Invalid(
                "fraction_digits must be at most 10".to_string(),
            ));
        }
        if self.design_charge.is_negative() {
            return Err(ConfigError::Invalid(
                "design_charge must not be negative".to_string(),
            ));
        }
        if self.design_charge_price_ceiling.is_negative()
            || self.design_charge_waiver_threshold.is_negative()
        {
            return Err(ConfigError::Invalid(
                "design charge thresholds must not be negative".to_string(),
            ));
        }
        if self.initial_payment_ratio < Decimal::ZERO || self.initial_payment_ratio > Decimal::ONE {
            return Err(ConfigError::Invalid(
                "initial_payment_ratio must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_money(key: &str, value: &str) -> Result<Money, ConfigError> {
    Decimal::from_str(value.trim())
        .map(Money::new)
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

// =============================================================================
// Pricing Context
// =============================================================================

/// Rules plus a single wall-clock snapshot for one computation pass.
///
/// ## Why One Timestamp?
/// ```text
/// Batch of 500 orders, coupon ends at 23:59:59
///
///   per-order Utc::now()      → orders 1..=312 discounted, 313..=500 not
///   PricingContext::capture() → every order judged against the same instant
/// ```
#[derive(Debug, Clone)]
pub struct PricingContext {
    pub rules: PricingRules,
    pub as_of: DateTime<Utc>,
}

impl PricingContext {
    /// Builds a context for an explicit instant.
    pub fn new(rules: PricingRules, as_of: DateTime<Utc>) -> Self {
        PricingContext { rules, as_of }
    }

    /// Builds a context stamped with the current time, read once.
    pub fn capture(rules: PricingRules) -> Self {
        PricingContext::new(rules, Utc::now())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
