use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct RosterRecord {
    pub(crate) worker_id: String,
    pub(crate) name: String,
    pub(crate) position: String,
    pub(crate) tcp_expiry: Option<NaiveDate>,
    pub(crate) license_expiry: Option<NaiveDate>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RosterRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<RosterRow>() {
        let row = record?;
        records.push(RosterRecord {
            worker_id: row.worker_id,
            name: row.name,
            position: row.position,
            tcp_expiry: row.tcp_expiry.as_deref().and_then(parse_date),
            license_expiry: row.license_expiry.as_deref().and_then(parse_date),
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Worker ID")]
    worker_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Position")]
    position: String,
    #[serde(rename = "TCP Expiry", default, deserialize_with = "empty_string_as_none")]
    tcp_expiry: Option<String>,
    #[serde(
        rename = "License Expiry",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    license_expiry: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
