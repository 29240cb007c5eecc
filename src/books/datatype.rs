use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One sold product. The three monetary figures are computed once when the
/// record is created and never edited on their own afterwards.
///
/// On-disk field names follow the snapshot schema the shop already has
/// (`buyRate`, `totalInvestment`, ...); `id` and `date` are defaulted so
/// snapshots written before they existed still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    #[serde(rename = "buyRate")]
    pub buy_rate: f64,
    #[serde(rename = "sellRate")]
    pub sell_rate: f64,
    #[serde(rename = "totalInvestment")]
    pub investment: f64,
    #[serde(rename = "totalSell")]
    pub sale_value: f64,
    pub profit: f64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl SaleRecord {
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        buy_rate: f64,
        sell_rate: f64,
        date: Option<NaiveDate>,
    ) -> Self {
        let investment = quantity * buy_rate;
        let sale_value = quantity * sell_rate;
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity,
            buy_rate,
            sell_rate,
            investment,
            sale_value,
            profit: sale_value - investment,
            date,
        }
    }
}

/// Goods given on credit ("udhar") to a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub person: String,
    pub item: String,
    pub amount: f64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl CreditRecord {
    pub fn new(
        person: impl Into<String>,
        item: impl Into<String>,
        amount: f64,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            person: person.into(),
            item: item.into(),
            amount,
            date,
        }
    }
}

/// Raw text of the sale entry form, exactly as typed. Parsing and
/// validation happen in `SalesLedger::add`.
#[derive(Debug, Clone, Default)]
pub struct SaleForm {
    pub name: String,
    pub quantity: String,
    pub buy_rate: String,
    pub sell_rate: String,
}

impl SaleForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Raw text of the udhar entry form.
#[derive(Debug, Clone, Default)]
pub struct CreditForm {
    pub person: String,
    pub item: String,
    pub amount: String,
}

impl CreditForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
