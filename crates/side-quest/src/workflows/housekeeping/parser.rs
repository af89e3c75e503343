use super::domain::{LoadedRecords, RoomRecord};
use super::LoadError;
use csv::StringRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::debug;

pub(crate) const DELIMITER: u8 = b';';

/// One report column and the header spellings that feed it, in order of
/// preference.
struct Column {
    name: &'static str,
    spellings: &'static [&'static str],
    required: bool,
}

const COLUMNS: &[Column] = &[
    Column {
        name: "Name",
        spellings: &["Name"],
        required: true,
    },
    Column {
        name: "Condition",
        spellings: &["Condition"],
        required: false,
    },
    Column {
        name: "Status",
        spellings: &["Status"],
        required: false,
    },
    Column {
        name: "Occupied",
        spellings: &["Occupied"],
        required: true,
    },
    Column {
        name: "Maintenance",
        spellings: &["Maintenance"],
        required: false,
    },
    Column {
        name: "Maintenance To",
        spellings: &["Maintenance To", "Maintenance Slot Until"],
        required: true,
    },
    Column {
        name: "Maintenance description",
        spellings: &["Maintenance description"],
        required: true,
    },
];

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<LoadedRecords, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(LoadError::Header)?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(LoadError::Empty);
    }
    let columns = ColumnMap::resolve(&headers)?;

    let mut loaded = LoadedRecords::default();
    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => match err.into_kind() {
                csv::ErrorKind::Io(source) => return Err(LoadError::Io(source)),
                kind => {
                    debug!(error = ?kind, "skipping unreadable housekeeping row");
                    loaded.skipped += 1;
                    continue;
                }
            },
        };

        match row_from_record(&headers, &columns, &record) {
            Ok(row) => loaded.records.push(row),
            Err(reason) => {
                let line = record.position().map(|position| position.line());
                debug!(?line, %reason, "skipping malformed housekeeping row");
                loaded.skipped += 1;
            }
        }
    }

    Ok(loaded)
}

/// Header position of every known column, resolved once per file. A
/// repeated header name reads from its first occurrence.
#[derive(Debug)]
struct ColumnMap {
    names: StringRecord,
    positions: Vec<usize>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let mut names = StringRecord::new();
        let mut positions = Vec::new();

        for column in COLUMNS {
            let position = column
                .spellings
                .iter()
                .find_map(|spelling| headers.iter().position(|header| header == *spelling));
            match position {
                Some(position) => {
                    names.push_field(column.name);
                    positions.push(position);
                }
                None if column.required => return Err(LoadError::MissingColumn(column.name)),
                None => {}
            }
        }

        Ok(Self { names, positions })
    }

    /// Cells of the known columns in canonical order. Missing trailing
    /// cells read as empty.
    fn project(&self, record: &StringRecord) -> StringRecord {
        self.positions
            .iter()
            .map(|&position| record.get(position).unwrap_or(""))
            .collect()
    }
}

fn row_from_record(
    headers: &StringRecord,
    columns: &ColumnMap,
    record: &StringRecord,
) -> Result<RoomRecord, String> {
    if record.len() > headers.len() {
        return Err(format!(
            "expected {} fields, found {}",
            headers.len(),
            record.len()
        ));
    }

    let row: HousekeepingRow = columns
        .project(record)
        .deserialize(Some(&columns.names))
        .map_err(|err| err.to_string())?;

    if row.name.is_empty() {
        return Err("room name is empty".to_string());
    }

    Ok(row.into_record())
}

#[derive(Debug, Deserialize)]
struct HousekeepingRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Condition", default, deserialize_with = "empty_string_as_none")]
    condition: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(rename = "Occupied", default, deserialize_with = "empty_string_as_none")]
    occupied: Option<String>,
    #[serde(
        rename = "Maintenance",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    maintenance: Option<String>,
    #[serde(
        rename = "Maintenance To",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    maintenance_to: Option<String>,
    #[serde(
        rename = "Maintenance description",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    maintenance_description: Option<String>,
}

impl HousekeepingRow {
    fn into_record(self) -> RoomRecord {
        RoomRecord {
            name: self.name,
            condition: self.condition,
            status: self.status,
            occupied: self.occupied,
            maintenance: self.maintenance,
            maintenance_to: self.maintenance_to,
            maintenance_description: self.maintenance_description,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
