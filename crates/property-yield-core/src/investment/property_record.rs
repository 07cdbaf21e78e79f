use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::InvestmentInput;
use crate::types::Money;

/// What the property record provider knows about a listing.
///
/// Every field is optional: records are often incomplete when the first
/// estimate is run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_fees_monthly: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_property_tax: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedroom_count: Option<u32>,
    /// Output of the renovation budget for this property
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renovation_estimate: Option<Money>,
}

impl PropertyRecord {
    /// Fill the fields the user left blank (zero amounts, missing options)
    /// with what the record holds. Values the user typed always win.
    pub fn apply_defaults(&self, mut input: InvestmentInput) -> InvestmentInput {
        if input.acquisition.purchase_price.is_zero() {
            if let Some(price) = self.purchase_price {
                input.acquisition.purchase_price = price;
            }
        }

        let property = &mut input.property;
        fill_zero(&mut property.community_fees_monthly, self.community_fees_monthly);
        fill_zero(&mut property.annual_property_tax, self.annual_property_tax);

        if property.region.as_deref().map_or(true, |r| r.trim().is_empty()) {
            property.region = self.region.clone().or(property.region.take());
        }
        if property.bedroom_count.is_none() {
            property.bedroom_count = self.bedroom_count;
        }
        if property.renovation_cost.is_none() {
            property.renovation_cost = self.renovation_estimate;
        }

        input
    }
}

fn fill_zero(target: &mut Money, fallback: Option<Money>) {
    if *target == Decimal::ZERO {
        if let Some(value) = fallback {
            *target = value;
        }
    }
}
