//! Export of the final kept and cut sets
//!
//! Two CSV artifacts are produced:
//! - `cut_kept_results.csv`: the cut and kept names as two columns. The shorter
//!   column is padded with empty cells.
//! - `detailed_kept_results.csv`: one row of card attributes per kept card

use crate::catalog::CardCatalog;
use crate::engine::Engine;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use mtg_common::Card;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CUT_KEPT_FILE: &str = "cut_kept_results.csv";
pub const DETAILED_KEPT_FILE: &str = "detailed_kept_results.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CutKeptRow {
    pub cut_cards: Option<String>,
    pub kept_cards: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedRow {
    pub name: String,
    pub type_line: Option<String>,
    pub mana_cost: Option<String>,
    pub cmc: u32,
    pub oracle_text: Option<String>,
    pub usd_price: Option<f64>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub released_at: Option<NaiveDate>,
}

impl From<Card> for DetailedRow {
    fn from(card: Card) -> Self {
        Self {
            name: card.name,
            type_line: card.type_line,
            mana_cost: card.mana_cost,
            cmc: card.cmc,
            oracle_text: card.oracle_text,
            usd_price: card.usd_price,
            power: card.power,
            toughness: card.toughness,
            released_at: card.released_at,
        }
    }
}

/// Where the two artifacts were written
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub cut_kept: PathBuf,
    pub detailed: PathBuf,
}

/// Pair cut and kept names row by row, padding the shorter column
pub fn cut_kept_rows(cut: &[Card], kept: &[Card]) -> Vec<CutKeptRow> {
    let rows = cut.len().max(kept.len());
    (0..rows)
        .map(|i| CutKeptRow {
            cut_cards: cut.get(i).map(|card| card.name.clone()),
            kept_cards: kept.get(i).map(|card| card.name.clone()),
        })
        .collect()
}

/// Detailed rows for the kept cards.
///
/// With a catalog, each card is refetched so prices are current. A failed
/// refetch falls back to the stored record.
pub fn detailed_rows(kept: &[Card], catalog: Option<&dyn CardCatalog>) -> Vec<DetailedRow> {
    kept.iter()
        .map(|card| {
            let card = match catalog {
                Some(catalog) => match catalog.lookup(&card.name) {
                    Ok(fresh) => fresh,
                    Err(e) => {
                        log::warn!("Refetch failed for {}, using stored data: {}", card.name, e);
                        card.clone()
                    }
                },
                None => card.clone(),
            };
            DetailedRow::from(card)
        })
        .collect()
}

fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T], headers: &[&str]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the cut/kept name columns as CSV
pub fn write_cut_kept<W: Write>(writer: W, rows: &[CutKeptRow]) -> Result<()> {
    write_rows(writer, rows, &["cut_cards", "kept_cards"])
}

/// Write the detailed kept table as CSV
pub fn write_detailed<W: Write>(writer: W, rows: &[DetailedRow]) -> Result<()> {
    write_rows(
        writer,
        rows,
        &[
            "name",
            "type_line",
            "mana_cost",
            "cmc",
            "oracle_text",
            "usd_price",
            "power",
            "toughness",
            "released_at",
        ],
    )
}

/// Write both artifacts for a finished session into `dir`
pub fn write_results(
    dir: &Path,
    engine: &Engine,
    catalog: Option<&dyn CardCatalog>,
) -> Result<ExportPaths> {
    if !engine.is_terminal() {
        return Err(Error::NotFinished(engine.considering_len()));
    }
    std::fs::create_dir_all(dir)?;

    let paths = ExportPaths {
        cut_kept: dir.join(CUT_KEPT_FILE),
        detailed: dir.join(DETAILED_KEPT_FILE),
    };

    let rows = cut_kept_rows(engine.cut(), engine.current());
    write_cut_kept(std::fs::File::create(&paths.cut_kept)?, &rows)?;
    log::info!(
        "Wrote {} cut and {} kept cards to {}",
        engine.cut_len(),
        engine.current_len(),
        paths.cut_kept.display()
    );

    let detailed = detailed_rows(engine.current(), catalog);
    write_detailed(std::fs::File::create(&paths.detailed)?, &detailed)?;
    log::info!("Wrote detailed kept cards to {}", paths.detailed.display());

    Ok(paths)
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
