use std::path::PathBuf;

use clap::Parser;

use crate::scene::SceneKind;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Title catalogue to open on start (.csv, .json or .parquet)
    pub data: Option<PathBuf>,

    /// Scene to start on
    #[arg(long, value_enum)]
    pub scene: Option<SceneKind>,

    /// Initial year threshold (clamped to the dataset's release years)
    #[arg(long)]
    pub year: Option<i32>,
}
