use std::collections::BTreeMap;
use std::fmt::Display;

use super::filter::{season_count, up_to_year};
use super::model::{ContentType, Record};

// ---------------------------------------------------------------------------
// Output shapes
// ---------------------------------------------------------------------------

/// Movie / show counts for one release year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCount {
    pub year: i32,
    pub movie_count: usize,
    pub show_count: usize,
}

/// A secondary-dimension key with the number of titles carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<K> {
    pub key: K,
    pub count: usize,
}

/// All buckets observed in one release year, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearBuckets<K> {
    pub year: i32,
    pub buckets: Vec<Bucket<K>>,
}

/// Result of one aggregation, shaped by the scene that asked for it.
///
/// Rows are always sorted ascending by year. Only the by-type shape fills
/// in zeros for absent categories; the bucketed shapes list exactly what was
/// observed in each year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregatedSeries {
    ByType(Vec<TypeCount>),
    ByRating(Vec<YearBuckets<String>>),
    BySeason(Vec<YearBuckets<u32>>),
}

/// Axis extents for a non-empty series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartDomains {
    /// `[min year, max year]` of the filtered rows.
    pub x: (i32, i32),
    /// `[0, largest single count]`.
    pub y: (usize, usize),
}

/// One drawable line: a label and a count per series year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesLine {
    pub label: String,
    pub points: Vec<(i32, usize)>,
}

/// A text label pinned to a data point of the latest year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub year: i32,
    pub count: usize,
    pub label: String,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Scene 1: per-year movie and show counts for titles up to `threshold`.
///
/// Titles whose type is neither movie nor show still give their year a row
/// but add to neither count.
pub fn aggregate_by_type(records: &[Record], threshold: i32) -> Vec<TypeCount> {
    let mut by_year: BTreeMap<i32, TypeCount> = BTreeMap::new();
    for r in up_to_year(records, threshold) {
        let row = by_year.entry(r.release_year).or_insert(TypeCount {
            year: r.release_year,
            movie_count: 0,
            show_count: 0,
        });
        match r.kind {
            ContentType::Movie => row.movie_count += 1,
            ContentType::TvShow => row.show_count += 1,
            ContentType::Other(_) => {}
        }
    }
    by_year.into_values().collect()
}

/// Scene 2: per-year counts of each rating code for titles up to `threshold`.
pub fn aggregate_by_rating(records: &[Record], threshold: i32) -> Vec<YearBuckets<String>> {
    group_by_year(up_to_year(records, threshold).map(|r| (r.release_year, r.rating.clone())))
}

/// Scene 3: per-year counts of each season count, shows only.
///
/// Records whose duration is not `"<N> Season(s)"` are dropped entirely.
pub fn aggregate_by_season(records: &[Record], threshold: i32) -> Vec<YearBuckets<u32>> {
    group_by_year(
        up_to_year(records, threshold)
            .filter_map(|r| season_count(&r.duration).map(|n| (r.release_year, n))),
    )
}

/// Group `(year, key)` pairs into year rows, counting keys in first-seen order.
fn group_by_year<K, I>(items: I) -> Vec<YearBuckets<K>>
where
    K: PartialEq,
    I: Iterator<Item = (i32, K)>,
{
    let mut by_year: BTreeMap<i32, Vec<Bucket<K>>> = BTreeMap::new();
    for (year, key) in items {
        let buckets = by_year.entry(year).or_default();
        match buckets.iter_mut().find(|b| b.key == key) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(Bucket { key, count: 1 }),
        }
    }
    by_year
        .into_iter()
        .map(|(year, buckets)| YearBuckets { year, buckets })
        .collect()
}

// ---------------------------------------------------------------------------
// Series helpers
// ---------------------------------------------------------------------------

impl AggregatedSeries {
    /// Number of year rows.
    pub fn len(&self) -> usize {
        match self {
            AggregatedSeries::ByType(rows) => rows.len(),
            AggregatedSeries::ByRating(rows) => rows.len(),
            AggregatedSeries::BySeason(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Years of the rows, ascending.
    pub fn years(&self) -> Vec<i32> {
        match self {
            AggregatedSeries::ByType(rows) => rows.iter().map(|r| r.year).collect(),
            AggregatedSeries::ByRating(rows) => rows.iter().map(|r| r.year).collect(),
            AggregatedSeries::BySeason(rows) => rows.iter().map(|r| r.year).collect(),
        }
    }

    /// `[first year, last year]`, or `None` when there are no rows.
    pub fn x_domain(&self) -> Option<(i32, i32)> {
        let years = self.years();
        Some((*years.first()?, *years.last()?))
    }

    /// `[0, largest count]`, or `None` when there are no rows.
    pub fn y_domain(&self) -> Option<(usize, usize)> {
        let max = match self {
            AggregatedSeries::ByType(rows) => rows
                .iter()
                .map(|r| r.movie_count.max(r.show_count))
                .max()?,
            AggregatedSeries::ByRating(rows) => max_bucket_count(rows)?,
            AggregatedSeries::BySeason(rows) => max_bucket_count(rows)?,
        };
        Some((0, max))
    }

    pub fn domains(&self) -> Option<ChartDomains> {
        Some(ChartDomains {
            x: self.x_domain()?,
            y: self.y_domain()?,
        })
    }

    /// Lines to draw, one per category.
    ///
    /// For the bucketed shapes every key gets a point in every series year,
    /// with 0 where the key was not observed, so the polyline stays
    /// continuous. The series itself is left untouched.
    pub fn lines(&self) -> Vec<SeriesLine> {
        match self {
            AggregatedSeries::ByType(rows) => vec![
                SeriesLine {
                    label: "Movies".to_string(),
                    points: rows.iter().map(|r| (r.year, r.movie_count)).collect(),
                },
                SeriesLine {
                    label: "TV Shows".to_string(),
                    points: rows.iter().map(|r| (r.year, r.show_count)).collect(),
                },
            ],
            AggregatedSeries::ByRating(rows) => bucket_lines(rows),
            AggregatedSeries::BySeason(rows) => bucket_lines(rows),
        }
    }

    /// Flat `(year, label, count)` entries for every observed value.
    ///
    /// Unlike [`lines`](Self::lines) this never invents zero entries for
    /// bucketed shapes; it is what tooltips and the data table show.
    pub fn entries(&self) -> Vec<(i32, String, usize)> {
        match self {
            AggregatedSeries::ByType(rows) => rows
                .iter()
                .flat_map(|r| {
                    [
                        (r.year, "Movies".to_string(), r.movie_count),
                        (r.year, "TV Shows".to_string(), r.show_count),
                    ]
                })
                .collect(),
            AggregatedSeries::ByRating(rows) => bucket_entries(rows),
            AggregatedSeries::BySeason(rows) => bucket_entries(rows),
        }
    }
}

impl AggregatedSeries {
    /// Labels for the last row of the series.
    ///
    /// By type: one label per line ("Movies", "TV Shows"). By rating: the
    /// last bucket of the last year. By season: none.
    pub fn annotations(&self) -> Vec<Annotation> {
        match self {
            AggregatedSeries::ByType(rows) => rows
                .last()
                .map(|last| {
                    vec![
                        Annotation {
                            year: last.year,
                            count: last.movie_count,
                            label: "Movies".to_string(),
                        },
                        Annotation {
                            year: last.year,
                            count: last.show_count,
                            label: "TV Shows".to_string(),
                        },
                    ]
                })
                .unwrap_or_default(),
            AggregatedSeries::ByRating(rows) => rows
                .last()
                .and_then(|last| {
                    let bucket = last.buckets.last()?;
                    Some(Annotation {
                        year: last.year,
                        count: bucket.count,
                        label: bucket.key.clone(),
                    })
                })
                .into_iter()
                .collect(),
            AggregatedSeries::BySeason(_) => Vec::new(),
        }
    }
}

fn max_bucket_count<K>(rows: &[YearBuckets<K>]) -> Option<usize> {
    rows.iter()
        .flat_map(|r| r.buckets.iter().map(|b| b.count))
        .max()
}

fn bucket_lines<K: PartialEq + Display>(rows: &[YearBuckets<K>]) -> Vec<SeriesLine> {
    let mut keys: Vec<&K> = Vec::new();
    for bucket in rows.iter().flat_map(|r| &r.buckets) {
        if !keys.contains(&&bucket.key) {
            keys.push(&bucket.key);
        }
    }

    keys.into_iter()
        .map(|key| SeriesLine {
            label: key.to_string(),
            points: rows
                .iter()
                .map(|r| {
                    let count = r
                        .buckets
                        .iter()
                        .find(|b| &b.key == key)
                        .map_or(0, |b| b.count);
                    (r.year, count)
                })
                .collect(),
        })
        .collect()
}

fn bucket_entries<K: Display>(rows: &[YearBuckets<K>]) -> Vec<(i32, String, usize)> {
    rows.iter()
        .flat_map(|r| {
            r.buckets
                .iter()
                .map(move |b| (r.year, b.key.to_string(), b.count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: i32, kind: ContentType, rating: &str, duration: &str) -> Record {
        Record {
            title: String::new(),
            release_year: year,
            kind,
            rating: rating.to_string(),
            duration: duration.to_string(),
        }
    }

    fn movie(year: i32) -> Record {
        rec(year, ContentType::Movie, "PG", "90 min")
    }

    fn show(year: i32) -> Record {
        rec(year, ContentType::TvShow, "TV-MA", "1 Season")
    }

    fn catalogue() -> Vec<Record> {
        vec![
            rec(2018, ContentType::TvShow, "TV-MA", "2 Seasons"),
            rec(2015, ContentType::Movie, "PG-13", "120 min"),
            rec(2016, ContentType::TvShow, "TV-14", "1 Season"),
            rec(2015, ContentType::TvShow, "TV-MA", "3 Seasons"),
            rec(2018, ContentType::Movie, "R", "101 min"),
            rec(2010, ContentType::Movie, "PG-13", "88 min"),
            rec(2016, ContentType::TvShow, "TV-MA", "1 Season"),
            rec(2018, ContentType::TvShow, "TV-MA", "2 Seasons"),
            rec(2012, ContentType::Other("Documentary".into()), "NR", "45 min"),
        ]
    }

    #[test]
    fn by_type_counts_and_zero_fills() {
        let records = vec![movie(2015), show(2015), movie(2016)];
        assert_eq!(
            aggregate_by_type(&records, 2016),
            vec![
                TypeCount { year: 2015, movie_count: 1, show_count: 1 },
                TypeCount { year: 2016, movie_count: 1, show_count: 0 },
            ]
        );
    }

    #[test]
    fn by_type_other_kinds_count_as_neither() {
        let rows = aggregate_by_type(&catalogue(), 2012);
        assert_eq!(
            rows,
            vec![
                TypeCount { year: 2010, movie_count: 1, show_count: 0 },
                TypeCount { year: 2012, movie_count: 0, show_count: 0 },
            ]
        );
    }

    #[test]
    fn by_rating_keeps_first_seen_bucket_order() {
        let rows = aggregate_by_rating(&catalogue(), 2018);
        assert_eq!(rows.iter().map(|r| r.year).collect::<Vec<_>>(), vec![2010, 2012, 2015, 2016, 2018]);

        let y2018 = &rows[4];
        assert_eq!(
            y2018.buckets,
            vec![
                Bucket { key: "TV-MA".to_string(), count: 2 },
                Bucket { key: "R".to_string(), count: 1 },
            ]
        );
        let y2016 = &rows[3];
        assert_eq!(
            y2016.buckets,
            vec![
                Bucket { key: "TV-14".to_string(), count: 1 },
                Bucket { key: "TV-MA".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn by_rating_does_not_zero_fill() {
        let rows = aggregate_by_rating(&catalogue(), 2018);
        let y2010 = &rows[0];
        assert_eq!(y2010.buckets, vec![Bucket { key: "PG-13".to_string(), count: 1 }]);
    }

    #[test]
    fn rating_match_is_case_sensitive() {
        let records = vec![
            rec(2020, ContentType::Movie, "pg", "90 min"),
            rec(2020, ContentType::Movie, "PG", "90 min"),
        ];
        let rows = aggregate_by_rating(&records, 2020);
        assert_eq!(rows[0].buckets.len(), 2);
    }

    #[test]
    fn by_season_drops_runtime_durations() {
        let records = vec![
            rec(2015, ContentType::TvShow, "TV-MA", "3 Seasons"),
            rec(2015, ContentType::TvShow, "TV-MA", "1 Season"),
            rec(2015, ContentType::Movie, "R", "90 min"),
        ];
        assert_eq!(
            aggregate_by_season(&records, 2015),
            vec![YearBuckets {
                year: 2015,
                buckets: vec![Bucket { key: 3, count: 1 }, Bucket { key: 1, count: 1 }],
            }]
        );
    }

    #[test]
    fn by_season_omits_years_without_shows() {
        let rows = aggregate_by_season(&catalogue(), 2018);
        assert_eq!(rows.iter().map(|r| r.year).collect::<Vec<_>>(), vec![2015, 2016, 2018]);
        assert_eq!(rows[1].buckets, vec![Bucket { key: 1, count: 2 }]);
        assert_eq!(rows[2].buckets, vec![Bucket { key: 2, count: 2 }]);
    }

    #[test]
    fn threshold_below_data_is_empty() {
        let records = catalogue();
        assert!(aggregate_by_type(&records, 2009).is_empty());
        assert!(aggregate_by_rating(&records, 2009).is_empty());
        assert!(aggregate_by_season(&records, 2009).is_empty());
    }

    #[test]
    fn years_never_exceed_threshold() {
        let records = catalogue();
        for threshold in 2008..=2020 {
            let series = [
                AggregatedSeries::ByType(aggregate_by_type(&records, threshold)),
                AggregatedSeries::ByRating(aggregate_by_rating(&records, threshold)),
                AggregatedSeries::BySeason(aggregate_by_season(&records, threshold)),
            ];
            for s in &series {
                let years = s.years();
                assert!(years.iter().all(|&y| y <= threshold));
                assert!(years.windows(2).all(|w| w[0] < w[1]));
                assert!(years
                    .iter()
                    .all(|&y| records.iter().any(|r| r.release_year == y)));
            }
        }
    }

    #[test]
    fn aggregations_are_idempotent() {
        let records = catalogue();
        assert_eq!(aggregate_by_type(&records, 2016), aggregate_by_type(&records, 2016));
        assert_eq!(aggregate_by_rating(&records, 2016), aggregate_by_rating(&records, 2016));
        assert_eq!(aggregate_by_season(&records, 2016), aggregate_by_season(&records, 2016));
    }

    #[test]
    fn year_sets_grow_with_threshold() {
        let records = catalogue();
        for t1 in 2008..2020 {
            for t2 in (t1 + 1)..=2020 {
                let pairs = [
                    (
                        AggregatedSeries::ByType(aggregate_by_type(&records, t1)).years(),
                        AggregatedSeries::ByType(aggregate_by_type(&records, t2)).years(),
                    ),
                    (
                        AggregatedSeries::ByRating(aggregate_by_rating(&records, t1)).years(),
                        AggregatedSeries::ByRating(aggregate_by_rating(&records, t2)).years(),
                    ),
                    (
                        AggregatedSeries::BySeason(aggregate_by_season(&records, t1)).years(),
                        AggregatedSeries::BySeason(aggregate_by_season(&records, t2)).years(),
                    ),
                ];
                for (low, high) in &pairs {
                    assert!(low.iter().all(|y| high.contains(y)));
                }
            }
        }
    }

    #[test]
    fn domains_follow_filtered_rows() {
        let series = AggregatedSeries::ByType(aggregate_by_type(&catalogue(), 2016));
        assert_eq!(
            series.domains(),
            Some(ChartDomains { x: (2010, 2016), y: (0, 2) })
        );

        let series = AggregatedSeries::ByRating(aggregate_by_rating(&catalogue(), 2018));
        assert_eq!(series.y_domain(), Some((0, 2)));

        let empty = AggregatedSeries::BySeason(Vec::new());
        assert_eq!(empty.x_domain(), None);
        assert_eq!(empty.domains(), None);
    }

    #[test]
    fn bucket_lines_zero_fill_only_for_drawing() {
        let series = AggregatedSeries::BySeason(aggregate_by_season(&catalogue(), 2018));
        let lines = series.lines();
        let labels: Vec<&str> = lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["3", "1", "2"]);
        assert_eq!(lines[0].points, vec![(2015, 1), (2016, 0), (2018, 0)]);

        // The entries view still lists only observed buckets.
        assert_eq!(series.entries().len(), 3);
    }

    #[test]
    fn by_type_annotates_both_lines_at_last_year() {
        let series = AggregatedSeries::ByType(aggregate_by_type(&catalogue(), 2018));
        assert_eq!(
            series.annotations(),
            vec![
                Annotation { year: 2018, count: 1, label: "Movies".to_string() },
                Annotation { year: 2018, count: 2, label: "TV Shows".to_string() },
            ]
        );
    }

    #[test]
    fn by_rating_annotates_last_bucket_of_last_year() {
        let series = AggregatedSeries::ByRating(aggregate_by_rating(&catalogue(), 2018));
        assert_eq!(
            series.annotations(),
            vec![Annotation { year: 2018, count: 1, label: "R".to_string() }]
        );
    }

    #[test]
    fn by_season_has_no_annotations() {
        let series = AggregatedSeries::BySeason(aggregate_by_season(&catalogue(), 2018));
        assert!(!series.is_empty());
        assert!(series.annotations().is_empty());
    }

    #[test]
    fn empty_series_have_no_annotations() {
        let records = catalogue();
        for series in [
            AggregatedSeries::ByType(aggregate_by_type(&records, 2000)),
            AggregatedSeries::ByRating(aggregate_by_rating(&records, 2000)),
            AggregatedSeries::BySeason(aggregate_by_season(&records, 2000)),
        ] {
            assert!(series.annotations().is_empty());
        }
    }

    #[test]
    fn by_type_lines_and_entries() {
        let series = AggregatedSeries::ByType(aggregate_by_type(&[movie(2015), show(2015)], 2015));
        let lines = series.lines();
        assert_eq!(lines[0].label, "Movies");
        assert_eq!(lines[0].points, vec![(2015, 1)]);
        assert_eq!(lines[1].label, "TV Shows");
        assert_eq!(series.entries().len(), 2);
    }
}
