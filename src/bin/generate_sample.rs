use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a synthetic movie / TV show catalogue as CSV and Parquet.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of titles to generate
    #[arg(long, default_value_t = 2000)]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Directory the sample files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct TitleRow {
    show_id: String,
    #[serde(rename = "type")]
    kind: &'static str,
    title: String,
    release_year: i32,
    rating: &'static str,
    duration: String,
}

const MOVIE_RATINGS: [&str; 6] = ["G", "PG", "PG-13", "R", "NR", "TV-MA"];
const SHOW_RATINGS: [&str; 5] = ["TV-Y", "TV-G", "TV-PG", "TV-14", "TV-MA"];
const FIRST_YEAR: i32 = 1960;
const LAST_YEAR: i32 = 2021;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Release year skewed toward recent years, like a streaming catalogue.
    fn release_year(&mut self) -> i32 {
        let span = (LAST_YEAR - FIRST_YEAR) as f64;
        let skewed = self.next_f64().powf(0.25);
        FIRST_YEAR + (skewed * span).round() as i32
    }
}

fn generate(rows: usize, rng: &mut SimpleRng) -> Vec<TitleRow> {
    (0..rows)
        .map(|i| {
            let release_year = rng.release_year();
            // Shows became a larger share of the catalogue after 2010.
            let show_share = if release_year >= 2010 { 0.4 } else { 0.15 };
            if rng.next_f64() < show_share {
                let seasons = 1 + (rng.next_f64().powi(3) * 8.0) as u32;
                let unit = if seasons == 1 { "Season" } else { "Seasons" };
                TitleRow {
                    show_id: format!("s{}", i + 1),
                    kind: "TV Show",
                    title: format!("Show {}", i + 1),
                    release_year,
                    rating: rng.pick(&SHOW_RATINGS),
                    duration: format!("{seasons} {unit}"),
                }
            } else {
                let minutes = 70 + (rng.next_f64() * 90.0) as u32;
                TitleRow {
                    show_id: format!("s{}", i + 1),
                    kind: "Movie",
                    title: format!("Movie {}", i + 1),
                    release_year,
                    rating: rng.pick(&MOVIE_RATINGS),
                    duration: format!("{minutes} min"),
                }
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[TitleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[TitleRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("show_id", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("release_year", DataType::Int32, false),
        Field::new("rating", DataType::Utf8, false),
        Field::new("duration", DataType::Utf8, false),
    ]));

    let strings = |f: fn(&TitleRow) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<ArrayRef> = vec![
        strings(|r| r.show_id.as_str()),
        strings(|r| r.kind),
        strings(|r| r.title.as_str()),
        Arc::new(Int32Array::from(
            rows.iter().map(|r| r.release_year).collect::<Vec<_>>(),
        )),
        strings(|r| r.rating),
        strings(|r| r.duration.as_str()),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SimpleRng::new(args.seed);
    let rows = generate(args.rows, &mut rng);

    std::fs::create_dir_all(&args.out_dir).context("creating output directory")?;
    let csv_path = args.out_dir.join("sample_titles.csv");
    let parquet_path = args.out_dir.join("sample_titles.parquet");

    write_csv(&csv_path, &rows)?;
    write_parquet(&parquet_path, &rows)?;

    log::info!(
        "Wrote {} titles to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    println!("Wrote {} titles ({FIRST_YEAR}–{LAST_YEAR})", rows.len());
    Ok(())
}
