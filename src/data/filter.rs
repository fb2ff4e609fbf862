use super::model::Record;

// ---------------------------------------------------------------------------
// Record predicates shared by the aggregations
// ---------------------------------------------------------------------------

/// Records released in or before `threshold`, in their original order.
pub fn up_to_year(records: &[Record], threshold: i32) -> impl Iterator<Item = &Record> {
    records.iter().filter(move |r| r.release_year <= threshold)
}

/// Extract `N` from a duration of the form `"<N> Season"` / `"<N> Seasons"`.
///
/// The word is matched case-insensitively; anything else (runtimes such as
/// `"90 min"`, empty cells, trailing text) yields `None`.
pub fn season_count(duration: &str) -> Option<u32> {
    let mut parts = duration.split_whitespace();
    let count = parts.next()?.parse::<u32>().ok()?;
    let unit = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if unit.eq_ignore_ascii_case("season") || unit.eq_ignore_ascii_case("seasons") {
        Some(count)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ContentType;

    #[test]
    fn season_durations() {
        assert_eq!(season_count("1 Season"), Some(1));
        assert_eq!(season_count("3 Seasons"), Some(3));
        assert_eq!(season_count("  12 seasons "), Some(12));
        assert_eq!(season_count("2 SEASONS"), Some(2));
    }

    #[test]
    fn non_season_durations() {
        assert_eq!(season_count("90 min"), None);
        assert_eq!(season_count(""), None);
        assert_eq!(season_count("Seasons"), None);
        assert_eq!(season_count("two Seasons"), None);
        assert_eq!(season_count("3 Seasons extra"), None);
        assert_eq!(season_count("-1 Season"), None);
    }

    #[test]
    fn up_to_year_is_inclusive() {
        let records: Vec<Record> = [2010, 2015, 2020]
            .into_iter()
            .map(|y| Record {
                title: String::new(),
                release_year: y,
                kind: ContentType::Movie,
                rating: String::new(),
                duration: String::new(),
            })
            .collect();
        let years: Vec<i32> = up_to_year(&records, 2015).map(|r| r.release_year).collect();
        assert_eq!(years, vec![2010, 2015]);
        assert_eq!(up_to_year(&records, 2000).count(), 0);
    }
}
