//! Variant selection
//!
//! Maps a partial option selection (size, colour, ...) onto a product's variant
//! list. The list is a snapshot of what the variants API returned; stock can
//! change upstream at any moment, so every answer here is advisory and the
//! backend re-checks at checkout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::aggregates::product::{OptionKind, ProductVariant};

const APPAREL_SIZES: [&str; 8] = ["XXS", "XS", "S", "M", "L", "XL", "XXL", "XXXL"];

/// Option values the shopper has fixed so far. Blank values count as unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeMap<OptionKind, String>);

impl Selection {
    pub fn new() -> Self { Self::default() }
    pub fn size(value: impl Into<String>) -> Self { Self::new().with(OptionKind::Size, value) }
    pub fn color(value: impl Into<String>) -> Self { Self::new().with(OptionKind::Color, value) }

    pub fn with(mut self, kind: OptionKind, value: impl Into<String>) -> Self {
        self.set(kind, value);
        self
    }

    pub fn set(&mut self, kind: OptionKind, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.0.remove(&kind);
        } else {
            self.0.insert(kind, value);
        }
    }

    pub fn clear(&mut self, kind: OptionKind) { self.0.remove(&kind); }

    pub fn get(&self, kind: OptionKind) -> Option<&str> {
        self.0.get(&kind).map(String::as_str).filter(|v| !v.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionKind, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str())).filter(|(_, v)| !v.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool { self.iter().next().is_none() }

    /// True when every fixed option equals the variant's value for it.
    pub fn matches(&self, variant: &ProductVariant) -> bool {
        self.iter().all(|(kind, value)| variant.attribute(kind) == Some(value))
    }
}

/// Distinct values offered by active variants, per dimension.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableOptions {
    pub size: Vec<String>,
    pub color: Vec<String>,
    pub material: Vec<String>,
    pub pattern: Vec<String>,
    pub fit: Vec<String>,
    pub sleeve: Vec<String>,
    /// Colour name to the first hex code seen for it.
    pub color_swatches: BTreeMap<String, String>,
}

impl AvailableOptions {
    pub fn get(&self, kind: OptionKind) -> &[String] {
        match kind {
            OptionKind::Size => &self.size,
            OptionKind::Color => &self.color,
            OptionKind::Material => &self.material,
            OptionKind::Pattern => &self.pattern,
            OptionKind::Fit => &self.fit,
            OptionKind::Sleeve => &self.sleeve,
        }
    }

    fn slot_mut(&mut self, kind: OptionKind) -> &mut Vec<String> {
        match kind {
            OptionKind::Size => &mut self.size,
            OptionKind::Color => &mut self.color,
            OptionKind::Material => &mut self.material,
            OptionKind::Pattern => &mut self.pattern,
            OptionKind::Fit => &mut self.fit,
            OptionKind::Sleeve => &mut self.sleeve,
        }
    }

    pub fn is_empty(&self) -> bool { OptionKind::ALL.iter().all(|k| self.get(*k).is_empty()) }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue { pub value: String, pub available: bool }

/// Per-dimension availability of every offered value, given the rest of a selection.
pub type OptionMatrix = BTreeMap<OptionKind, Vec<OptionValue>>;

/// Outcome of resolving a selection to a single SKU.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VariantMatch<'a> {
    Matched(&'a ProductVariant),
    /// Several variants fit an under-specified selection; keep browsing.
    Ambiguous,
    NotFound,
}

impl<'a> VariantMatch<'a> {
    pub fn variant(&self) -> Option<&'a ProductVariant> {
        match *self {
            Self::Matched(v) => Some(v),
            Self::Ambiguous | Self::NotFound => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matched(_) => "matched",
            Self::Ambiguous => "ambiguous",
            Self::NotFound => "not_found",
        }
    }
}

/// A single price, or the span of prices across active variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayPrice {
    Single(Decimal),
    Range { min: Decimal, max: Decimal },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityCheck { pub available: bool, pub available_stock: u64 }

#[derive(Clone, Copy, Debug)]
pub struct VariantResolver<'a> {
    variants: &'a [ProductVariant],
    base_price: Decimal,
}

impl<'a> VariantResolver<'a> {
    pub fn new(variants: &'a [ProductVariant], base_price: Decimal) -> Self { Self { variants, base_price } }

    fn active(&self) -> impl Iterator<Item = &'a ProductVariant> + 'a {
        let variants = self.variants;
        variants.iter().filter(|v| v.is_active)
    }

    pub fn available_options(&self) -> AvailableOptions {
        let mut options = AvailableOptions::default();
        for kind in OptionKind::ALL {
            let distinct: BTreeSet<&str> = self
                .active()
                .filter_map(|v| v.attribute(kind))
                .filter(|v| !v.trim().is_empty())
                .collect();
            let mut values: Vec<String> = distinct.into_iter().map(str::to_string).collect();
            if kind == OptionKind::Size {
                values.sort_by(|a, b| compare_sizes(a, b));
            }
            *options.slot_mut(kind) = values;
        }
        for variant in self.active() {
            if let (Some(color), Some(hex)) = (&variant.color, &variant.color_hex) {
                options.color_swatches.entry(color.clone()).or_insert_with(|| hex.clone());
            }
        }
        options
    }

    /// Whether picking `candidate` for `kind` next would leave something in stock.
    /// A value already fixed for `kind` in `selection` is replaced by the candidate.
    pub fn is_option_available(&self, selection: &Selection, kind: OptionKind, candidate: &str) -> bool {
        if candidate.trim().is_empty() { return false; }
        let next = selection.clone().with(kind, candidate);
        self.active().any(|v| next.matches(v) && v.available_stock() > 0)
    }

    pub fn option_matrix(&self, selection: &Selection) -> OptionMatrix {
        let options = self.available_options();
        OptionKind::ALL
            .into_iter()
            .filter(|kind| !options.get(*kind).is_empty())
            .map(|kind| {
                let values: Vec<OptionValue> = options
                    .get(kind)
                    .iter()
                    .map(|value| OptionValue { value: value.clone(), available: self.is_option_available(selection, kind, value) })
                    .collect();
                (kind, values)
            })
            .collect()
    }

    pub fn find_matching_variant(&self, selection: &Selection) -> VariantMatch<'a> {
        let candidates: Vec<&'a ProductVariant> = self.active().filter(|v| selection.matches(v)).collect();
        match candidates.as_slice() {
            [] => VariantMatch::NotFound,
            [only] => VariantMatch::Matched(*only),
            // Duplicate SKUs for a full selection are the backend's to prevent.
            [first, ..] if self.is_fully_specified(selection) => VariantMatch::Matched(*first),
            _ => VariantMatch::Ambiguous,
        }
    }

    /// Every dimension used by some active variant has a value in `selection`.
    /// Blank attribute values do not make a dimension used.
    pub fn is_fully_specified(&self, selection: &Selection) -> bool {
        OptionKind::ALL
            .into_iter()
            .filter(|kind| self.active().any(|v| v.attribute(*kind).is_some_and(|value| !value.trim().is_empty())))
            .all(|kind| selection.get(kind).is_some())
    }

    pub fn display_price(&self, selected: Option<&ProductVariant>) -> DisplayPrice {
        if let Some(variant) = selected {
            return DisplayPrice::Single(variant.effective_price(self.base_price));
        }
        let mut prices = self.active().map(|v| v.effective_price(self.base_price));
        let Some(first) = prices.next() else {
            return DisplayPrice::Single(self.base_price);
        };
        let (min, max) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        if min == max { DisplayPrice::Single(min) } else { DisplayPrice::Range { min, max } }
    }
}

pub fn available_stock(selected: Option<&ProductVariant>) -> u64 {
    selected.map_or(0, ProductVariant::available_stock)
}

/// Client-side approximation of the backend's `{variant_id, quantity}` check.
pub fn check_availability(variant: &ProductVariant, quantity: u32) -> AvailabilityCheck {
    let stock = variant.available_stock();
    AvailabilityCheck {
        available: variant.is_active && quantity > 0 && u64::from(quantity) <= stock,
        available_stock: stock,
    }
}

fn size_key(size: &str) -> (u8, usize, Decimal) {
    let normalized = size.trim().to_ascii_uppercase();
    if let Some(rank) = APPAREL_SIZES.iter().position(|s| *s == normalized) {
        return (0, rank, Decimal::ZERO);
    }
    match normalized.parse::<Decimal>() {
        Ok(n) => (1, 0, n),
        Err(_) => (2, 0, Decimal::ZERO),
    }
}

fn compare_sizes(a: &str, b: &str) -> Ordering {
    size_key(a).cmp(&size_key(b)).then_with(|| a.cmp(b))
}
