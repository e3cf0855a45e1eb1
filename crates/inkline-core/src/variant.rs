//! # Variant Resolution
//!
//! Maps the options picked at the counter onto one priced variant.
//!
//! ## Matching Rule
//! ```text
//! Product "Flex Banner"
//!   axes:     Material (unit "gsm") { 280, 440 }    Finish (unit "") { Matte, Gloss }
//!   variants: v1 = {280, Matte}  +0
//!             v2 = {440, Matte}  +40
//!             v3 = {440, Gloss}  +55
//!
//! selections: Material → {440, "gsm"}, Finish → {Gloss, ""}
//!
//!   v1: 280 ≠ 440                      ✗
//!   v2: Matte ≠ Gloss                  ✗
//!   v3: 440 ✓  Gloss ✓                 ✓   → Matched(v3)
//! ```
//!
//! A variant matches only if **every** one of its details is selected (item
//! id and axis unit both equal) and **every** axis' selection appears among
//! its details. Partial matches are not matches.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::config::AmbiguousVariantPolicy;
use crate::error::{CoreError, CoreResult};
use crate::types::{Product, Variant};

/// The option picked on one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub item_id: String,
    /// Unit of the axis the option was picked from.
    #[serde(default)]
    pub unit: String,
}

impl Selection {
    pub fn new(item_id: impl Into<String>, unit: impl Into<String>) -> Self {
        Selection {
            item_id: item_id.into(),
            unit: unit.into(),
        }
    }
}

/// Selections keyed by axis name.
pub type Selections = HashMap<String, Selection>;

/// Outcome of resolving a selection set against a product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariantMatch<'a> {
    /// The product has no variation axes; price without a surcharge.
    NoVariations,
    /// Exactly one variant matched (or the policy picked one).
    Matched(&'a Variant),
    /// The product has axes but nothing matched the selections.
    NoMatch,
}

impl<'a> VariantMatch<'a> {
    /// Returns the matched variant, if any.
    pub fn variant(&self) -> Option<&'a Variant> {
        match self {
            VariantMatch::Matched(variant) => Some(*variant),
            VariantMatch::NoVariations | VariantMatch::NoMatch => None,
        }
    }
}

/// Finds the single variant of `product` matching `selections`.
///
/// ## Errors
/// [`CoreError::AmbiguousVariant`] when several variants match and the
/// policy is [`AmbiguousVariantPolicy::Reject`].
pub fn resolve_variant<'a>(
    product: &'a Product,
    selections: &Selections,
    policy: AmbiguousVariantPolicy,
) -> CoreResult<VariantMatch<'a>> {
    if !product.has_variations() {
        return Ok(VariantMatch::NoVariations);
    }

    if let Some(axis) = product
        .variations
        .iter()
        .find(|axis| !selections.contains_key(&axis.name))
    {
        debug!(product_id = %product.id, axis = %axis.name, "Axis has no selection");
        return Ok(VariantMatch::NoMatch);
    }

    let candidates: Vec<&Variant> = product
        .variants
        .iter()
        .filter(|variant| matches_selection(product, variant, selections))
        .collect();

    match candidates.as_slice() {
        [] => Ok(VariantMatch::NoMatch),
        [only] => Ok(VariantMatch::Matched(*only)),
        many => {
            let variant_ids: Vec<String> = many.iter().map(|v| v.id.clone()).collect();
            warn!(
                product_id = %product.id,
                variant_ids = ?variant_ids,
                policy = %policy,
                "Several variants match one selection set"
            );
            match policy {
                AmbiguousVariantPolicy::Reject => Err(CoreError::AmbiguousVariant {
                    product_id: product.id.clone(),
                    variant_ids,
                }),
                AmbiguousVariantPolicy::LowestSurcharge => Ok(many
                    .iter()
                    .copied()
                    .min_by_key(|v| v.additional_price)
                    .map(VariantMatch::Matched)
                    .unwrap_or(VariantMatch::NoMatch)),
            }
        }
    }
}

fn matches_selection(product: &Product, variant: &Variant, selections: &Selections) -> bool {
    if variant.variant_details.is_empty() {
        return false;
    }

    let every_detail_selected = variant.variant_details.iter().all(|detail| {
        let item_id = detail.variation_item_id.as_str();
        product
            .axis_of_item(item_id)
            .and_then(|axis| selections.get(&axis.name).map(|sel| (axis, sel)))
            .is_some_and(|(axis, sel)| sel.item_id == item_id && sel.unit == axis.unit)
    });

    let every_axis_covered = product.variations.iter().all(|axis| {
        selections.get(&axis.name).is_some_and(|sel| {
            variant
                .variant_details
                .iter()
                .any(|detail| detail.variation_item_id == sel.item_id)
        })
    });

    every_detail_selected && every_axis_covered
}
