use serde::Deserialize;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures while turning raw rows into a [`DataStore`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DataError {
    /// A row's `release_year` cell is not an integer.
    #[error("row {row}: release_year '{value}' is not an integer")]
    ParseError { row: usize, value: String },

    /// No rows at all, so there is no year range.
    #[error("dataset contains no records")]
    EmptyDataset,
}

// ---------------------------------------------------------------------------
// ContentType – the `type` column
// ---------------------------------------------------------------------------

/// Kind of title. Only `Movie` and `TvShow` are counted by the by-type scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    Movie,
    TvShow,
    /// Anything else (including an empty cell), kept verbatim.
    Other(String),
}

impl ContentType {
    /// Exact match against the catalogue spellings `"Movie"` and `"TV Show"`.
    pub fn parse(s: &str) -> Self {
        match s {
            "Movie" => ContentType::Movie,
            "TV Show" => ContentType::TvShow,
            other => ContentType::Other(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// RawRow / Record
// ---------------------------------------------------------------------------

/// One row as it comes out of a file: every cell is still text.
/// Columns the core does not use are simply not deserialized.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RawRow {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub release_year: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub duration: String,
}

/// A single title (one row of the source table) after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub title: String,
    pub release_year: i32,
    pub kind: ContentType,
    /// Rating code such as `TV-MA`; open set, compared exactly.
    pub rating: String,
    /// `"<N> Season(s)"` for shows, a runtime like `"90 min"` for movies.
    pub duration: String,
}

impl Record {
    /// Parse a raw row. `row` is only used for the error message.
    pub fn from_raw(row: usize, raw: RawRow) -> Result<Self, DataError> {
        let release_year = raw
            .release_year
            .trim()
            .parse::<i32>()
            .map_err(|_| DataError::ParseError {
                row,
                value: raw.release_year.clone(),
            })?;

        Ok(Record {
            title: raw.title,
            release_year,
            kind: ContentType::parse(&raw.kind),
            rating: raw.rating,
            duration: raw.duration,
        })
    }
}

// ---------------------------------------------------------------------------
// YearRange
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` release-year span of the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }
}

/// Min/max release year over `records`.
pub fn year_range(records: &[Record]) -> Result<YearRange, DataError> {
    let mut years = records.iter().map(|r| r.release_year);
    let first = years.next().ok_or(DataError::EmptyDataset)?;
    let (min, max) = years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
    Ok(YearRange { min, max })
}

// ---------------------------------------------------------------------------
// DataStore – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Immutable set of parsed records plus the year range computed at load.
#[derive(Debug, Clone)]
pub struct DataStore {
    records: Vec<Record>,
    year_range: YearRange,
}

impl DataStore {
    /// Parse every raw row. The first bad `release_year` aborts the load.
    pub fn load<I>(rows: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, raw)| Record::from_raw(i, raw))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<Record>) -> Result<Self, DataError> {
        let year_range = year_range(&records)?;
        Ok(DataStore {
            records,
            year_range,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn year_range(&self) -> YearRange {
        self.year_range
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(year: &str, kind: &str) -> RawRow {
        RawRow {
            title: format!("{kind} {year}"),
            kind: kind.to_string(),
            release_year: year.to_string(),
            rating: "PG".to_string(),
            duration: "90 min".to_string(),
        }
    }

    #[test]
    fn load_parses_years_and_types() {
        let store = DataStore::load(vec![raw("2015", "Movie"), raw(" 2019 ", "TV Show")]).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].release_year, 2015);
        assert_eq!(store.records()[0].kind, ContentType::Movie);
        assert_eq!(store.records()[1].release_year, 2019);
        assert_eq!(store.records()[1].kind, ContentType::TvShow);
        assert_eq!(store.year_range(), YearRange { min: 2015, max: 2019 });
    }

    #[test]
    fn non_numeric_year_is_a_parse_error() {
        let err = DataStore::load(vec![raw("2015", "Movie"), raw("unknown", "Movie")]).unwrap_err();
        assert_eq!(
            err,
            DataError::ParseError {
                row: 1,
                value: "unknown".to_string()
            }
        );
    }

    #[test]
    fn empty_year_cell_is_a_parse_error() {
        let err = DataStore::load(vec![raw("", "Movie")]).unwrap_err();
        assert!(matches!(err, DataError::ParseError { row: 0, .. }));
    }

    #[test]
    fn empty_input_has_no_year_range() {
        assert_eq!(year_range(&[]), Err(DataError::EmptyDataset));
        assert_eq!(
            DataStore::load(Vec::<RawRow>::new()).unwrap_err(),
            DataError::EmptyDataset
        );
    }

    #[test]
    fn type_matching_is_exact() {
        assert_eq!(ContentType::parse("Movie"), ContentType::Movie);
        assert_eq!(ContentType::parse("TV Show"), ContentType::TvShow);
        assert_eq!(
            ContentType::parse("movie"),
            ContentType::Other("movie".to_string())
        );
        assert_eq!(
            ContentType::parse("TVShow"),
            ContentType::Other("TVShow".to_string())
        );
    }

    #[test]
    fn year_range_clamps() {
        let range = YearRange { min: 1990, max: 2020 };
        assert_eq!(range.clamp(1900), 1990);
        assert_eq!(range.clamp(2005), 2005);
        assert_eq!(range.clamp(3000), 2020);
    }
}
