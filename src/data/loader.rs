use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{RescueDataset, RescueRecord, YearMonth};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load an incident table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header `Animal Class, year, month, count` (the published layout)
/// * `.json`    – `[{ "Animal Class": "Birds", "year": 2021, "month": 1, "count": 5 }, ...]`
/// * `.parquet` – flat table with the same four columns
pub fn load_file(path: &Path) -> Result<RescueDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Fetch a remotely hosted CSV and parse it.
pub fn load_url(url: &str) -> Result<RescueDataset> {
    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(10))
        .build();

    let response = agent
        .get(url)
        .call()
        .with_context(|| format!("fetching {url}"))?;

    read_csv(response.into_reader()).with_context(|| format!("parsing CSV from {url}"))
}

// ---------------------------------------------------------------------------
// Row shape shared by the CSV and JSON loaders
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Animal Class")]
    animal_class: String,
    year: i32,
    month: u32,
    count: f64,
}

impl RawRow {
    /// Validate one raw row into a record.
    fn into_record(self, row_no: usize) -> Result<RescueRecord> {
        let when = YearMonth::new(self.year, self.month)
            .with_context(|| format!("row {row_no}"))?;
        if !self.count.is_finite() || self.count < 0.0 {
            bail!("row {row_no}: count {} is not a non-negative number", self.count);
        }
        Ok(RescueRecord {
            animal_class: self.animal_class,
            when,
            count: self.count,
        })
    }
}

fn finish(records: Vec<RescueRecord>) -> Result<RescueDataset> {
    if records.is_empty() {
        bail!("the table contains no rows");
    }
    Ok(RescueDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<RescueDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

fn read_csv<R: Read>(reader: R) -> Result<RescueDataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut records = Vec::new();
    for (row_no, result) in csv_reader.deserialize::<RawRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }
    finish(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')` layout.
fn load_json(path: &Path) -> Result<RescueDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawRow> = serde_json::from_str(&text).context("parsing JSON")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(row_no, raw)| raw.into_record(row_no))
        .collect::<Result<Vec<_>>>()?;
    finish(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the flat incident table schema.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): year/month may be Int32 or Int64 and
/// count may be any integer or float type.
fn load_parquet(path: &Path) -> Result<RescueDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let class_idx = schema
            .index_of("Animal Class")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'Animal Class' column"))?;
        let year_idx = schema
            .index_of("year")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'year' column"))?;
        let month_idx = schema
            .index_of("month")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'month' column"))?;
        let count_idx = schema
            .index_of("count")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'count' column"))?;

        let class_col = batch.column(class_idx);
        let year_col = batch.column(year_idx);
        let month_col = batch.column(month_idx);
        let count_col = batch.column(count_idx);

        for row in 0..batch.num_rows() {
            let animal_class = string_value(class_col, row)
                .with_context(|| format!("row {row}: reading 'Animal Class'"))?;
            let year = int_value(year_col, row)
                .with_context(|| format!("row {row}: reading 'year'"))?;
            let month = int_value(month_col, row)
                .with_context(|| format!("row {row}: reading 'month'"))?;
            let count = float_value(count_col, row)
                .with_context(|| format!("row {row}: reading 'count'"))?;

            let raw = RawRow {
                animal_class,
                year: year as i32,
                month: month as u32,
                count,
            };
            records.push(raw.into_record(row)?);
        }
    }

    finish(records)
}

// -- Arrow helpers --

fn string_value(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    let arr = col
        .as_any()
        .downcast_ref::<StringArray>()
        .with_context(|| format!("expected a string column, got {:?}", col.data_type()))?;
    Ok(arr.value(row).to_string())
}

fn int_value(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().context("Int32")?;
            Ok(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().context("Int64")?;
            Ok(arr.value(row))
        }
        other => bail!("expected an integer column, got {other:?}"),
    }
}

fn float_value(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("Float64")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("Float32")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int32 | DataType::Int64 => int_value(col, row).map(|v| v as f64),
        other => bail!("expected a numeric column, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Animal Class,year,month,count
Birds,2022,11,12
Birds,2022,12,9
Cats,2022,11,30
";

    #[test]
    fn csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("incidents.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.classes, vec!["Birds".to_string(), "Cats".to_string()]);
        let birds = ds.class_points("Birds");
        assert_eq!(birds[0].when, YearMonth::new(2022, 11).unwrap());
        assert_eq!(birds[1].count, 9.0);
    }

    #[test]
    fn csv_rejects_bad_month() {
        let csv = "Animal Class,year,month,count\nBirds,2022,13,12\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 0"));
    }

    #[test]
    fn csv_rejects_negative_count() {
        let csv = "Animal Class,year,month,count\nBirds,2022,3,-4\n";
        assert!(read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn empty_table_is_an_error() {
        let csv = "Animal Class,year,month,count\n";
        assert!(read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("incidents.json");
        std::fs::write(
            &path,
            r#"[{"Animal Class": "Raccoons", "year": 2021, "month": 5, "count": 3}]"#,
        )
        .unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.classes, vec!["Raccoons".to_string()]);
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let err = load_file(Path::new("incidents.xlsx")).unwrap_err();
        assert!(err.to_string().contains("xlsx"));
    }

    #[test]
    fn parquet_round_trip() {
        use arrow::array::{Int64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Animal Class", DataType::Utf8, false),
            Field::new("year", DataType::Int64, false),
            Field::new("month", DataType::Int64, false),
            Field::new("count", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Birds", "Birds"])),
                Arc::new(Int64Array::from(vec![2022, 2023])),
                Arc::new(Int64Array::from(vec![12, 1])),
                Arc::new(Int64Array::from(vec![8, 11])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("incidents.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        let birds = ds.class_points("Birds");
        assert_eq!(birds[1].when, YearMonth::new(2023, 1).unwrap());
        assert_eq!(birds[1].count, 11.0);
    }
}
