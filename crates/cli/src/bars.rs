//! Bar loading from CSV and JSON files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use indicator_facade::{OHLCSeries, OHLC};
use serde::{Deserialize, Deserializer};

/// One bar as it appears in an input file.
///
/// An empty field (or JSON `null`) is absent. Only a column missing from the
/// file altogether makes open/high/low fall back to the close.
#[derive(Debug, Deserialize)]
struct BarRecord {
    #[serde(default, deserialize_with = "column", alias = "Open", alias = "o")]
    open: Option<Option<f64>>,
    #[serde(default, deserialize_with = "column", alias = "High", alias = "h")]
    high: Option<Option<f64>>,
    #[serde(default, deserialize_with = "column", alias = "Low", alias = "l")]
    low: Option<Option<f64>>,
    #[serde(default, alias = "Close", alias = "c")]
    close: Option<f64>,
}

/// Outer `None`: no such column. Inner `None`: the column is empty here.
fn column<'de, D>(deserializer: D) -> std::result::Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

impl BarRecord {
    fn to_bar(&self) -> OHLC {
        let close = self.close.unwrap_or(f64::NAN);
        let field = |v: Option<Option<f64>>| match v {
            Some(value) => value.unwrap_or(f64::NAN),
            None => close,
        };
        OHLC::new(field(self.open), field(self.high), field(self.low), close)
    }
}

/// JSON inputs: bar objects, or bare closes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonBars {
    Bars(Vec<BarRecord>),
    Closes(Vec<Option<f64>>),
}

/// Load bars, picking the format from the file extension.
pub fn load_bars(path: &Path) -> Result<OHLCSeries> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let series = match ext.as_str() {
        "json" => read_json(reader),
        _ => read_csv(reader),
    }
    .with_context(|| format!("failed to read bars from {}", path.display()))?;

    if series.is_empty() {
        bail!("{} holds no bars", path.display());
    }
    Ok(series)
}

pub fn read_csv<R: Read>(reader: R) -> Result<OHLCSeries> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut series = OHLCSeries::new();
    for (row, record) in reader.deserialize::<BarRecord>().enumerate() {
        let record = record.with_context(|| format!("bad bar at row {}", row + 1))?;
        series.push(record.to_bar());
    }
    Ok(series)
}

pub fn read_json<R: Read>(reader: R) -> Result<OHLCSeries> {
    let bars: JsonBars = serde_json::from_reader(reader).context("expected an array of bars or closes")?;
    let series = match bars {
        JsonBars::Bars(records) => {
            let bars: Vec<OHLC> = records.iter().map(BarRecord::to_bar).collect();
            OHLCSeries::from_bars(&bars)
        }
        JsonBars::Closes(closes) => {
            OHLCSeries::from_close(closes.into_iter().map(|c| c.unwrap_or(f64::NAN)).collect())
        }
    };
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_with_ohlc_headers() {
        let data = "time,Open,High,Low,Close\n1,10,12,9,11\n2,11,13,,12.5\n";
        let series = read_csv(data.as_bytes()).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.high, vec![12.0, 13.0]);
        assert_eq!(series.low[0], 9.0);
        // Empty low is absent, not the close.
        assert!(series.low[1].is_nan());
        assert_eq!(series.close[1], 12.5);
    }

    #[test]
    fn test_csv_empty_field_is_absent() {
        let series = read_csv("open,high,low,close\n10,12,,11\n,,,\n".as_bytes()).unwrap();

        assert_eq!(series.open[0], 10.0);
        assert!(series.low[0].is_nan());
        assert!(series.open[1].is_nan());
        assert!(series.high[1].is_nan());
        assert!(series.close[1].is_nan());
    }

    #[test]
    fn test_csv_close_only() {
        let series = read_csv("close\n1.5\n2.5\n".as_bytes()).unwrap();
        assert_eq!(series.close, vec![1.5, 2.5]);
        assert_eq!(series.open, series.close);
    }

    #[test]
    fn test_csv_rejects_text_in_price() {
        assert!(read_csv("close\nabc\n".as_bytes()).is_err());
    }

    #[test]
    fn test_json_bars_and_closes() {
        let bars = read_json(r#"[{"open":1,"high":2,"low":0.5,"close":1.5}]"#.as_bytes()).unwrap();
        assert_eq!(bars.high, vec![2.0]);

        let partial = read_json(r#"[{"high":2,"low":null,"close":1.5}]"#.as_bytes()).unwrap();
        // Missing key falls back to the close; explicit null is absent.
        assert_eq!(partial.open, vec![1.5]);
        assert!(partial.low[0].is_nan());

        let closes = read_json("[1.0, null, 3.0]".as_bytes()).unwrap();
        assert_eq!(closes.len(), 3);
        assert!(closes.close[1].is_nan());
    }
}
