//! Per-line discounts and the input control that edits them.
//!
//! A discount is attached optionally to a product row or to a single
//! variant. "No discount" is `None`; a `Some` with an empty value only
//! exists while the user is typing.

use serde::Serialize;

/// Unit a discount value is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum DiscountUnit {
    #[default]
    #[serde(rename = "% Off")]
    PercentOff,
    #[serde(rename = "Fixed")]
    Fixed,
}

impl DiscountUnit {
    /// Returns the other unit.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            DiscountUnit::PercentOff => DiscountUnit::Fixed,
            DiscountUnit::Fixed => DiscountUnit::PercentOff,
        }
    }
}

impl std::fmt::Display for DiscountUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountUnit::PercentOff => write!(f, "% Off"),
            DiscountUnit::Fixed => write!(f, "Fixed"),
        }
    }
}

/// A discount value and its unit.
///
/// The value is kept as the raw string the user typed, minus any leading
/// minus signs. Construct through [`Discount::new`] so that holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discount {
    value: String,
    unit: DiscountUnit,
}

impl Discount {
    #[must_use]
    pub fn new(value: &str, unit: DiscountUnit) -> Self {
        Self {
            value: sanitize_discount_value(value),
            unit,
        }
    }

    /// A discount the user has just added but not filled in yet.
    #[must_use]
    pub fn empty(unit: DiscountUnit) -> Self {
        Self {
            value: String::new(),
            unit,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn unit(&self) -> DiscountUnit {
        self.unit
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// The value as a number, if it parses as one.
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok()
    }
}

/// Strips every leading `-` from a typed discount value.
#[must_use]
pub fn sanitize_discount_value(raw: &str) -> String {
    raw.trim_start_matches('-').to_owned()
}

/// An edit coming from the discount input control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountEvent {
    /// The user typed into the value field.
    SetValue(String),
    /// The unit was set explicitly.
    SetUnit(DiscountUnit),
    /// The unit button was clicked.
    ToggleUnit,
    /// The remove button was clicked.
    Remove,
}

impl DiscountEvent {
    /// Applies the edit to a discount slot.
    ///
    /// Editing an empty slot creates a discount in the default unit;
    /// changing the unit keeps the value.
    pub fn apply(self, slot: &mut Option<Discount>) {
        match self {
            DiscountEvent::SetValue(raw) => {
                let unit = slot.as_ref().map(Discount::unit).unwrap_or_default();
                *slot = Some(Discount::new(&raw, unit));
            }
            DiscountEvent::SetUnit(unit) => match slot {
                Some(discount) => discount.unit = unit,
                None => *slot = Some(Discount::empty(unit)),
            },
            DiscountEvent::ToggleUnit => match slot {
                Some(discount) => discount.unit = discount.unit.toggled(),
                None => *slot = Some(Discount::empty(DiscountUnit::default().toggled())),
            },
            DiscountEvent::Remove => *slot = None,
        }
    }
}
