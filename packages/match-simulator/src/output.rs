//! Output writers for simulation results.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;

use crate::simulator::GameResult;

/// One CSV line per match.
#[derive(Debug, Serialize)]
struct CsvSummaryRow {
    game_id: u32,
    seed: u64,
    players: usize,
    reason: String,
    winners: String,
    winners_count: i32,
    top_score: u32,
    turns: u32,
    snapshots: usize,
    duration_ms: f64,
}

impl From<&GameResult> for CsvSummaryRow {
    fn from(result: &GameResult) -> Self {
        let winners: Vec<&str> = result.winners.iter().map(|p| p.as_str()).collect();
        Self {
            game_id: result.game_num,
            seed: result.seed,
            players: result.players.len(),
            reason: format!("{:?}", result.reason),
            winners: winners.join(";"),
            winners_count: result.winners_count,
            top_score: result.ranking.first().map_or(0, |r| r.score),
            turns: result.turns,
            snapshots: result.snapshots_written,
            duration_ms: result.duration_ms,
        }
    }
}

pub struct OutputWriter {
    jsonl_writer: Box<dyn Write + Send>,
    csv_writer: csv::Writer<BufWriter<File>>,
    jsonl_path: PathBuf,
    csv_path: PathBuf,
}

impl OutputWriter {
    pub fn new(output_dir: &str, compress: bool) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");

        let filename = format!("simulation_{}.jsonl", timestamp);
        let (jsonl_writer, jsonl_path): (Box<dyn Write + Send>, PathBuf) = if compress {
            let gz_path = dir.join(format!("{}.gz", filename));
            let writer = BufWriter::new(GzEncoder::new(
                File::create(&gz_path)?,
                Compression::default(),
            ));
            (Box::new(writer), gz_path)
        } else {
            let path = dir.join(&filename);
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)?;
            (Box::new(BufWriter::new(file)), path)
        };

        let csv_path = dir.join(format!("simulation_{}_summary.csv", timestamp));
        let csv_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&csv_path)?;
        // serialize() writes the header row from the struct fields
        let csv_writer = csv::Writer::from_writer(BufWriter::new(csv_file));

        Ok(Self {
            jsonl_writer,
            csv_writer,
            jsonl_path,
            csv_path,
        })
    }

    pub fn write_game(&mut self, result: &GameResult) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(result)?;
        writeln!(self.jsonl_writer, "{}", json)?;
        self.jsonl_writer.flush()?;

        self.csv_writer.serialize(CsvSummaryRow::from(result))?;
        self.csv_writer.flush()?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.jsonl_writer.flush()?;
        self.csv_writer.flush()?;
        Ok(())
    }

    pub fn output_paths(&self) -> (&PathBuf, &PathBuf) {
        (&self.jsonl_path, &self.csv_path)
    }
}
