// Feature table loading: one CSV row per accessory, produced by the upstream
// sentiment/quality/emotion pipeline.
use carfit_core::{AccessoryRecord, Aspect, Catalog, Error, Result, EMOTION_LABELS};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::info;

pub const COL_ID: &str = "Accessory_ID";
pub const COL_NAME: &str = "Accessory Name";
pub const COL_BRAND: &str = "Car Brand";
pub const COL_MODEL: &str = "Car Model";
pub const COL_COMPATIBLE: &str = "Compatible Cars";
pub const COL_PRICE: &str = "Accessory Price";
pub const COL_DESCRIPTION: &str = "Accessory Description";
pub const COL_CATEGORY: &str = "Category";
pub const COL_SENTIMENT_SCORE: &str = "Sentiment_Score";
pub const COL_SENTIMENT_LABEL: &str = "Sentiment_Label";
pub const COL_QUALITY: &str = "Overall_Quality_Score";
pub const COL_DOMINANT_EMOTION: &str = "Dominant_Emotion";
pub const COL_STRENGTHS: &str = "Key_Strengths";
pub const COL_WEAKNESSES: &str = "Key_Weaknesses";
pub const COL_PHRASES: &str = "Key_Phrases";
pub const COL_REVIEWS: &str = "Top 5 Reviews";

const REQUIRED: [&str; 9] = [
    COL_ID,
    COL_NAME,
    COL_BRAND,
    COL_MODEL,
    COL_COMPATIBLE,
    COL_PRICE,
    COL_SENTIMENT_SCORE,
    COL_SENTIMENT_LABEL,
    COL_QUALITY,
];

/// Header name -> column index, whitespace-trimmed
struct Columns(HashMap<String, usize>);

impl Columns {
    fn new(headers: &StringRecord) -> Result<Self> {
        let map: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_string(), i))
            .collect();
        for col in REQUIRED {
            if !map.contains_key(col) {
                return Err(Error::MissingColumn(col.to_string()));
            }
        }
        Ok(Self(map))
    }

    fn text<'r>(&self, row: &'r StringRecord, col: &str) -> &'r str {
        self.0
            .get(col)
            .and_then(|&i| row.get(i))
            .map(str::trim)
            .unwrap_or("")
    }

    fn optional_number(&self, row: &StringRecord, col: &str, line: u64) -> Result<Option<f64>> {
        let raw = self.text(row, col);
        if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
            return Ok(None);
        }
        raw.parse::<f64>().map(Some).map_err(|_| Error::MalformedRow {
            line,
            reason: format!("column '{}' is not a number: '{}'", col, raw),
        })
    }

    fn number(&self, row: &StringRecord, col: &str, line: u64) -> Result<f64> {
        self.optional_number(row, col, line)?.ok_or_else(|| Error::MalformedRow {
            line,
            reason: format!("column '{}' is empty", col),
        })
    }
}

/// Parse the feature table from any reader
pub fn read_records<R: Read>(reader: R) -> Result<Vec<AccessoryRecord>> {
    let mut reader = ReaderBuilder::new().from_reader(reader);
    let headers = reader.headers().map_err(|e| Error::MalformedRow {
        line: 1,
        reason: e.to_string(),
    })?;
    let columns = Columns::new(headers)?;

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        // header is line 1
        let line = i as u64 + 2;
        let row = row.map_err(|e| Error::MalformedRow {
            line,
            reason: e.to_string(),
        })?;
        records.push(parse_row(&columns, &row, line)?);
    }
    Ok(records)
}

fn parse_row(columns: &Columns, row: &StringRecord, line: u64) -> Result<AccessoryRecord> {
    let id = columns.text(row, COL_ID);
    if id.is_empty() {
        return Err(Error::MalformedRow {
            line,
            reason: format!("column '{}' is empty", COL_ID),
        });
    }

    let mut record = AccessoryRecord::new(
        id,
        columns.text(row, COL_NAME),
        columns.text(row, COL_BRAND),
        columns.text(row, COL_MODEL),
        columns.text(row, COL_COMPATIBLE),
        columns.number(row, COL_PRICE, line)?,
    )
    .with_description(columns.text(row, COL_DESCRIPTION))
    .with_category(columns.text(row, COL_CATEGORY))
    .with_sentiment(
        columns.number(row, COL_SENTIMENT_SCORE, line)?,
        columns.text(row, COL_SENTIMENT_LABEL),
    )
    .with_quality(columns.number(row, COL_QUALITY, line)?)
    .with_dominant_emotion(columns.text(row, COL_DOMINANT_EMOTION));

    for aspect in Aspect::ALL {
        let score_col = format!("Aspect_{}_Score", aspect);
        let mentions_col = format!("Aspect_{}_Mentions", aspect);
        let score = columns.optional_number(row, &score_col, line)?;
        let mentions = columns.optional_number(row, &mentions_col, line)?;
        if score.is_some() || mentions.is_some() {
            let mentions = mentions.unwrap_or(0.0).max(0.0) as u32;
            record = record.with_aspect(aspect, score.unwrap_or(0.0), mentions);
        }
    }

    for label in EMOTION_LABELS {
        let col = format!("Emotion_{}_Score", label);
        if let Some(score) = columns.optional_number(row, &col, line)? {
            record = record.with_emotion_score(label, score);
        }
    }

    record.key_strengths = columns.text(row, COL_STRENGTHS).to_string();
    record.key_weaknesses = columns.text(row, COL_WEAKNESSES).to_string();
    record.key_phrases = columns.text(row, COL_PHRASES).to_string();
    record.top_reviews = columns.text(row, COL_REVIEWS).to_string();

    Ok(record)
}

/// Load the feature table from disk into a catalog
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(Error::CatalogNotFound(path.display().to_string()));
    }
    let file = std::fs::File::open(path)?;
    let records = read_records(file)?;
    let catalog = Catalog::new(records)?;
    info!("Loaded {} accessories from {:?}", catalog.len(), path);
    Ok(catalog)
}
