use chrono::Local;
use uuid::Uuid;

use super::datatype::{CreditForm, CreditRecord, SaleForm, SaleRecord};

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(value) = trimmed.parse::<f64>() else {
        return None;
    };
    if !value.is_finite() {
        return None;
    }
    Some(value)
}

/// The sell-product book: insertion-ordered records, running totals over
/// the derived figures. Mutations never touch a record after creation
/// except to drop it whole.
#[derive(Debug, Default)]
pub struct SalesLedger {
    records: Vec<SaleRecord>,
}

impl SalesLedger {
    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }

    /// Validate the form and append a record. An empty name or a numeric
    /// field that does not parse rejects the whole entry silently: the
    /// ledger is left unchanged and `None` is returned.
    pub fn add(&mut self, form: &SaleForm) -> Option<&SaleRecord> {
        let name = form.name.trim();
        if name.is_empty() {
            tracing::debug!("sale rejected: empty name");
            return None;
        }
        let quantity = parse_number(&form.quantity)?;
        let buy_rate = parse_number(&form.buy_rate)?;
        let sell_rate = parse_number(&form.sell_rate)?;

        let record = SaleRecord::new(
            name,
            quantity,
            buy_rate,
            sell_rate,
            Some(Local::now().date_naive()),
        );
        self.records.push(record);
        self.records.last()
    }

    /// Remove by position. Out-of-range (stale) indices are a no-op.
    pub fn remove(&mut self, index: usize) -> Option<SaleRecord> {
        if index >= self.records.len() {
            return None;
        }
        Some(self.records.remove(index))
    }

    /// Remove by record id; immune to the list shifting under a stale
    /// row index.
    pub fn remove_by_id(&mut self, id: Uuid) -> Option<SaleRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn total_investment(&self) -> f64 {
        self.records.iter().map(|r| r.investment).sum()
    }

    pub fn total_sale(&self) -> f64 {
        self.records.iter().map(|r| r.sale_value).sum()
    }

    pub fn total_profit(&self) -> f64 {
        self.records.iter().map(|r| r.profit).sum()
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The udhar book: who took what, for how much.
#[derive(Debug, Default)]
pub struct CreditLedger {
    records: Vec<CreditRecord>,
}

impl CreditLedger {
    pub fn from_records(records: Vec<CreditRecord>) -> Self {
        Self { records }
    }

    /// Same contract as `SalesLedger::add`: empty person/item or an
    /// unparsable amount rejects silently.
    pub fn add(&mut self, form: &CreditForm) -> Option<&CreditRecord> {
        let person = form.person.trim();
        let item = form.item.trim();
        if person.is_empty() || item.is_empty() {
            tracing::debug!("credit rejected: empty person or item");
            return None;
        }
        let amount = parse_number(&form.amount)?;

        let record =
            CreditRecord::new(person, item, amount, Some(Local::now().date_naive()));
        self.records.push(record);
        self.records.last()
    }

    pub fn remove(&mut self, index: usize) -> Option<CreditRecord> {
        if index >= self.records.len() {
            return None;
        }
        Some(self.records.remove(index))
    }

    pub fn remove_by_id(&mut self, id: Uuid) -> Option<CreditRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn total(&self) -> f64 {
        self.records.iter().map(|r| r.amount).sum()
    }

    pub fn records(&self) -> &[CreditRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
