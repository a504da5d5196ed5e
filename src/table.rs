use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord, Trim};
use ndarray::Array1;

use crate::error::{DatasetError, Result};

/// cells read as missing, whatever the column type
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "n/a", "NaN", "nan", "NULL", "null", "None", "<NA>"];

/// category used for a missing cell once a column is cast to text
pub const MISSING_CATEGORY: &str = "nan";

pub fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell)
}

/// header + string records, columns looked up by exact name
#[derive(Debug, Clone)]
pub struct RawTable {
    resource: String,
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<StringRecord>,
}

impl RawTable {
    /// parse comma-delimited text with a header row
    pub fn from_bytes(resource: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let resource = resource.into();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|err| DatasetError::malformed(&resource, err.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut index = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }

        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|err| DatasetError::malformed(&resource, err.to_string()))?;

        Ok(Self {
            resource,
            headers,
            index,
            rows,
        })
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| DatasetError::missing_column(&self.resource, name))
    }

    fn cells<'a>(&'a self, name: &str) -> Result<impl Iterator<Item = &'a str> + 'a> {
        let j = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| row.get(j).unwrap_or("")))
    }

    /// numeric column, missing cells as NaN
    pub fn numeric_column(&self, name: &str) -> Result<Array1<f64>> {
        let mut values = Vec::with_capacity(self.n_rows());
        for (row, cell) in self.cells(name)?.enumerate() {
            if is_missing(cell) {
                values.push(f64::NAN);
                continue;
            }
            let value = cell.parse::<f64>().map_err(|_| {
                DatasetError::malformed(
                    &self.resource,
                    format!("column `{name}` row {row}: `{cell}` is not a number"),
                )
            })?;
            values.push(value);
        }
        Ok(Array1::from(values))
    }

    /// text column, missing cells as `None`
    pub fn text_column(&self, name: &str) -> Result<Vec<Option<String>>> {
        Ok(self
            .cells(name)?
            .map(|cell| (!is_missing(cell)).then(|| cell.to_string()))
            .collect())
    }

    /// text column where a missing cell is its own category
    pub fn text_column_coerced(&self, name: &str) -> Result<Vec<Option<String>>> {
        Ok(self
            .cells(name)?
            .map(|cell| {
                if is_missing(cell) {
                    Some(MISSING_CATEGORY.to_string())
                } else {
                    Some(cell.to_string())
                }
            })
            .collect())
    }

    /// whole-number column (subject ids); missing cells are rejected
    pub fn integer_column(&self, name: &str) -> Result<Vec<i64>> {
        let mut values = Vec::with_capacity(self.n_rows());
        for (row, cell) in self.cells(name)?.enumerate() {
            let value = cell.parse::<i64>().ok().or_else(|| {
                cell.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite() && v.fract() == 0.0)
                    .map(|v| v as i64)
            });
            match value {
                Some(v) => values.push(v),
                None => {
                    return Err(DatasetError::malformed(
                        &self.resource,
                        format!("column `{name}` row {row}: `{cell}` is not an integer"),
                    ));
                }
            }
        }
        Ok(values)
    }

    /// 0/1 indicator column
    pub fn event_column(&self, name: &str) -> Result<Array1<u8>> {
        let raw = self.numeric_column(name)?;
        let mut events = Vec::with_capacity(raw.len());
        for (row, &value) in raw.iter().enumerate() {
            let event = if value == 0.0 {
                0
            } else if value == 1.0 {
                1
            } else {
                return Err(DatasetError::malformed(
                    &self.resource,
                    format!("column `{name}` row {row}: event indicator must be 0 or 1, got {value}"),
                ));
            };
            events.push(event);
        }
        Ok(Array1::from(events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
id,\"drug\",score,flag,grade
1,\"placebo\",1.5,1,2
1,D-penicil,NA,0,
2, placebo ,3.25,1,4
";

    fn sample() -> RawTable {
        RawTable::from_bytes("sample.csv", SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_headers_and_rows() {
        let table = sample();
        assert_eq!(table.headers(), &["id", "drug", "score", "flag", "grade"]);
        assert_eq!(table.n_rows(), 3);
    }

    #[test]
    fn test_numeric_column_missing_is_nan() {
        let score = sample().numeric_column("score").unwrap();
        assert_eq!(score[0], 1.5);
        assert!(score[1].is_nan());
        assert_eq!(score[2], 3.25);
    }

    #[test]
    fn test_text_columns() {
        let table = sample();
        let drug = table.text_column("drug").unwrap();
        assert_eq!(drug[2].as_deref(), Some("placebo"));

        let grade = table.text_column("grade").unwrap();
        assert_eq!(grade[1], None);

        let grade = table.text_column_coerced("grade").unwrap();
        assert_eq!(grade[1].as_deref(), Some(MISSING_CATEGORY));
        assert_eq!(grade[2].as_deref(), Some("4"));
    }

    #[test]
    fn test_integer_and_event_columns() {
        let table = sample();
        assert_eq!(table.integer_column("id").unwrap(), vec![1, 1, 2]);
        assert_eq!(table.event_column("flag").unwrap().to_vec(), vec![1, 0, 1]);
    }

    #[test]
    fn test_bad_event_code() {
        let table = RawTable::from_bytes("t.csv", b"status\n0\n2\n").unwrap();
        assert!(matches!(
            table.event_column("status"),
            Err(DatasetError::MalformedResource { .. })
        ));
    }

    #[test]
    fn test_missing_column() {
        let err = sample().numeric_column("serChol").unwrap_err();
        assert_eq!(err, DatasetError::missing_column("sample.csv", "serChol"));
    }

    #[test]
    fn test_non_numeric_cell() {
        let err = sample().numeric_column("drug").unwrap_err();
        assert!(matches!(err, DatasetError::MalformedResource { .. }));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = RawTable::from_bytes("ragged.csv", b"a,b\n1,2\n3\n");
        assert!(matches!(result, Err(DatasetError::MalformedResource { .. })));
    }
}
