//! Date helpers and the pt-BR style formats printed on labels and history.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Label header timestamp: `07/03/2025 08:05`.
pub fn label_timestamp(dt: NaiveDateTime) -> String {
    dt.format("%d/%m/%Y %H:%M").to_string()
}

/// History display/search date in local time: `07/03/2025, 08:05:00`.
pub fn history_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%d/%m/%Y, %H:%M:%S")
        .to_string()
}
