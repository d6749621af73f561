//! Load survey answers from a `pillar,question,current,desired` CSV export.

mod parser;

use super::domain::{InvalidRatingError, Pillar, RatingScale, RatingTag};
use super::question_bank::QuestionBank;
use super::responses::ResponseStore;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub enum ResponseImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownPillar {
        row: usize,
        value: String,
    },
    UnknownQuestion {
        row: usize,
        pillar: Pillar,
        question: usize,
    },
    MalformedRating {
        row: usize,
        value: String,
    },
    Rating {
        row: usize,
        source: InvalidRatingError,
    },
}

impl std::fmt::Display for ResponseImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseImportError::Io(err) => write!(f, "failed to read response export: {}", err),
            ResponseImportError::Csv(err) => write!(f, "invalid response CSV data: {}", err),
            ResponseImportError::UnknownPillar { row, value } => {
                write!(f, "row {}: unknown pillar '{}'", row, value)
            }
            ResponseImportError::UnknownQuestion {
                row,
                pillar,
                question,
            } => write!(
                f,
                "row {}: pillar {} has no question {}",
                row, pillar, question
            ),
            ResponseImportError::MalformedRating { row, value } => {
                write!(f, "row {}: rating '{}' is not a whole number", row, value)
            }
            ResponseImportError::Rating { row, source } => write!(f, "row {}: {}", row, source),
        }
    }
}

impl std::error::Error for ResponseImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResponseImportError::Io(err) => Some(err),
            ResponseImportError::Csv(err) => Some(err),
            ResponseImportError::Rating { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ResponseImportError {
    fn from(err: std::io::Error) -> Self {
        ResponseImportError::Io(err)
    }
}

impl From<csv::Error> for ResponseImportError {
    fn from(err: csv::Error) -> Self {
        ResponseImportError::Csv(err)
    }
}

pub struct ResponseImporter;

impl ResponseImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        bank: &QuestionBank,
        scale: RatingScale,
    ) -> Result<ResponseStore, ResponseImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, bank, scale)
    }

    /// Later rows overwrite earlier ones for the same pillar, question and tag.
    pub fn from_reader<R: Read>(
        reader: R,
        bank: &QuestionBank,
        scale: RatingScale,
    ) -> Result<ResponseStore, ResponseImportError> {
        let mut store = ResponseStore::new(scale);

        for record in parser::parse_records(reader)? {
            let pillar = Pillar::from_label(&record.pillar)
                .filter(|pillar| bank.section(*pillar).is_some())
                .ok_or_else(|| ResponseImportError::UnknownPillar {
                    row: record.row,
                    value: record.pillar.clone(),
                })?;

            if bank.question(pillar, record.question).is_none() {
                return Err(ResponseImportError::UnknownQuestion {
                    row: record.row,
                    pillar,
                    question: record.question,
                });
            }

            for (tag, raw) in [
                (RatingTag::Current, record.current.as_deref()),
                (RatingTag::Desired, record.desired.as_deref()),
            ] {
                let Some(raw) = raw else {
                    continue;
                };
                let value = raw.trim().parse::<i64>().map_err(|_| {
                    ResponseImportError::MalformedRating {
                        row: record.row,
                        value: raw.to_string(),
                    }
                })?;
                store
                    .set_rating(pillar, record.question, tag, value)
                    .map_err(|source| ResponseImportError::Rating {
                        row: record.row,
                        source,
                    })?;
            }
        }

        debug!(answered = store.count_answered(), "imported survey responses");
        Ok(store)
    }
}
