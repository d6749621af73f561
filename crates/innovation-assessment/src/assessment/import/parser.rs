use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One data row of a response export; `row` is 1-based and excludes the header.
#[derive(Debug)]
pub(crate) struct ResponseRecord {
    pub(crate) row: usize,
    pub(crate) pillar: String,
    pub(crate) question: usize,
    pub(crate) current: Option<String>,
    pub(crate) desired: Option<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ResponseRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<ResponseRow>().enumerate() {
        let row = record?;
        records.push(ResponseRecord {
            row: index + 1,
            pillar: row.pillar,
            question: row.question,
            current: row.current,
            desired: row.desired,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ResponseRow {
    pillar: String,
    question: usize,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    current: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    desired: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
