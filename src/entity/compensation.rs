use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Labelled money amounts stored as a JSON object, e.g. `{"hra": "1500", "transport": "300"}`
///
/// Used for both the allowances and the deductions of a compensation profile,
/// and snapshotted as-is into every payroll record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Components(pub BTreeMap<String, Decimal>);

impl Components {
    pub fn total(&self) -> Decimal {
        self.0.values().copied().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(label, amount)| (label.as_str(), *amount))
    }
}

impl<L: Into<String>, const N: usize> From<[(L, Decimal); N]> for Components {
    fn from(entries: [(L, Decimal); N]) -> Self {
        Self(entries.into_iter().map(|(label, amount)| (label.into(), amount)).collect())
    }
}
