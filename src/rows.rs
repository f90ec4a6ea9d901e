/// Column headers of the mapping table.
pub const COL_SOURCE_CODE: &str = "NAMASTE_Code";
pub const COL_SOURCE_TERM: &str = "NAMASTE_Term";
pub const COL_TARGET_CODE: &str = "ICD11_TM2_Code";
pub const COL_TARGET_TERM: &str = "ICD11_TM2_Term";
pub const COL_STATUS: &str = "Validation_Status";
pub const COL_CONFIDENCE: &str = "Confidence_Score";
pub const COL_LAST_UPDATED: &str = "Last_Updated";

pub const DEFAULT_DELIMITER: char = ',';

/// One source-to-target correspondence as read from the mapping table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingRow {
    pub source_code: String,
    pub source_term: String,
    pub target_code: String,
    pub target_term: String,
    /// Raw status as found in the table, not normalized.
    pub status: String,
    /// Not range checked. Missing or unparsable values are `0.0`.
    pub confidence: f64,
    pub last_updated: String,
}

impl MappingRow {
    pub fn new(
        source: (&str, &str),
        target: (&str, &str),
        status: &str,
        confidence: f64,
    ) -> Self {
        Self {
            source_code: source.0.to_string(),
            source_term: source.1.to_string(),
            target_code: target.0.to_string(),
            target_term: target.1.to_string(),
            status: status.to_string(),
            confidence,
            last_updated: String::new(),
        }
    }
}

/// Parses a delimited mapping table with the default `,` delimiter.
pub fn parse_rows(text: &str) -> Vec<MappingRow> {
    parse_rows_with(text, DEFAULT_DELIMITER)
}

/// Parses a delimited mapping table.
///
/// The first line holds the column headers, every following non-blank line is
/// one row. Columns are matched by header name so their order does not matter.
/// Fields are split on `delimiter` verbatim: there is no quoting or escaping,
/// a delimiter inside a term shifts the remaining columns. Missing cells
/// become empty strings.
pub fn parse_rows_with(text: &str, delimiter: char) -> Vec<MappingRow> {
    let mut lines = text.trim().lines();
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<&str> = header_line.split(delimiter).collect();
    let column = |name: &str| headers.iter().position(|h| *h == name);

    let source_code = column(COL_SOURCE_CODE);
    let source_term = column(COL_SOURCE_TERM);
    let target_code = column(COL_TARGET_CODE);
    let target_term = column(COL_TARGET_TERM);
    let status = column(COL_STATUS);
    let confidence = column(COL_CONFIDENCE);
    let last_updated = column(COL_LAST_UPDATED);

    lines
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            let cols: Vec<&str> = line.split(delimiter).collect();
            let cell = |idx: Option<usize>| {
                idx.and_then(|i| cols.get(i))
                    .map(|s| (*s).to_string())
                    .unwrap_or_default()
            };

            MappingRow {
                source_code: cell(source_code),
                source_term: cell(source_term),
                target_code: cell(target_code),
                target_term: cell(target_term),
                status: cell(status),
                confidence: parse_confidence(&cell(confidence)),
                last_updated: cell(last_updated),
            }
        })
        .collect()
}

fn parse_confidence(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0)
}
