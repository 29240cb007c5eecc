use chrono::NaiveDate;

use super::datatype::{CreditRecord, SaleRecord};

pub fn sample_sales() -> Vec<SaleRecord> {
    vec![
        SaleRecord::new(
            "Soap",
            5.0,
            12.0,
            20.0,
            NaiveDate::from_ymd_opt(2025, 12, 1),
        ),
        SaleRecord::new(
            "Sugar (kg)",
            10.0,
            40.0,
            45.0,
            NaiveDate::from_ymd_opt(2025, 12, 2),
        ),
        SaleRecord::new(
            "Tea (250g)",
            4.0,
            80.0,
            95.0,
            NaiveDate::from_ymd_opt(2025, 12, 3),
        ),
    ]
}

pub fn sample_credits() -> Vec<CreditRecord> {
    vec![
        CreditRecord::new("Ali", "Sugar", 50.0, NaiveDate::from_ymd_opt(2025, 12, 2)),
        CreditRecord::new(
            "Fatima",
            "Cooking oil",
            320.0,
            NaiveDate::from_ymd_opt(2025, 12, 4),
        ),
    ]
}
