//! Perft regression suites.
//!
//! A suite is a TOML file listing positions and their expected node counts,
//! one count per depth starting at 1:
//!
//! ```toml
//! max_depth = 4
//!
//! [[position]]
//! name = "start"
//! fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//! counts = [20, 400, 8902, 197281]
//! ```

use chess_board::perft::perft;
use chess_board::{Board, BoardError};
use serde::Deserialize;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

/// Errors that can occur when loading a suite.
#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("Failed to read suite file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse suite: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Position {name:?} has an invalid FEN: {source}")]
    InvalidPosition {
        name: String,
        #[source]
        source: BoardError,
    },

    #[error("Position {0:?} lists no expected counts")]
    NoCounts(String),

    #[error("Suite contains no positions")]
    Empty,
}

/// One position and its expected counts.
#[derive(Debug, Clone, Deserialize)]
pub struct SuitePosition {
    pub name: String,
    pub fen: String,
    /// Expected node count at depth 1, 2, ...
    pub counts: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Suite {
    /// Deepest depth to run; deeper expected counts are skipped.
    #[serde(default)]
    pub max_depth: Option<u32>,
    #[serde(rename = "position", default)]
    pub positions: Vec<SuitePosition>,
}

/// A count that differed from the suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub name: String,
    pub depth: u32,
    pub expected: u64,
    pub actual: u64,
}

#[derive(Debug, Default)]
pub struct SuiteReport {
    pub passed: usize,
    pub mismatches: Vec<Mismatch>,
}

impl SuiteReport {
    pub fn is_success(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl Suite {
    /// Reads and validates a suite file.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::ReadError`] if the file cannot be read,
    /// [`SuiteError::ParseError`] for malformed TOML, and the validation
    /// errors of [`Suite::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, SuiteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a suite and checks that every position loads and lists at least
    /// one count.
    pub fn from_toml_str(content: &str) -> Result<Self, SuiteError> {
        let suite: Suite = toml::from_str(content)?;
        if suite.positions.is_empty() {
            return Err(SuiteError::Empty);
        }
        for position in &suite.positions {
            Board::from_fen(&position.fen).map_err(|source| SuiteError::InvalidPosition {
                name: position.name.clone(),
                source,
            })?;
            if position.counts.is_empty() {
                return Err(SuiteError::NoCounts(position.name.clone()));
            }
        }
        Ok(suite)
    }

    /// Runs every position to the deepest depth allowed by `max_depth`
    /// (falling back to the suite's own limit).
    pub fn run(&self, max_depth: Option<u32>) -> SuiteReport {
        let limit = max_depth.or(self.max_depth).unwrap_or(u32::MAX);
        let mut report = SuiteReport::default();

        for position in &self.positions {
            let Ok(mut board) = Board::from_fen(&position.fen) else {
                continue;
            };

            for (depth, &expected) in (1..=limit).zip(&position.counts) {
                let start = Instant::now();
                let actual = perft(&mut board, depth);
                let elapsed = start.elapsed();

                if actual == expected {
                    tracing::info!(
                        position = %position.name,
                        depth,
                        nodes = actual,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "ok"
                    );
                    report.passed += 1;
                } else {
                    tracing::error!(
                        position = %position.name,
                        depth,
                        expected,
                        actual,
                        "node count mismatch"
                    );
                    report.mismatches.push(Mismatch {
                        name: position.name.clone(),
                        depth,
                        expected,
                        actual,
                    });
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUITE: &str = r#"
max_depth = 2

[[position]]
name = "start"
fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
counts = [20, 400, 8902]

[[position]]
name = "position 3"
fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"
counts = [14, 191]
"#;

    #[test]
    fn parse_suite() {
        let suite = Suite::from_toml_str(SUITE).unwrap();
        assert_eq!(suite.max_depth, Some(2));
        assert_eq!(suite.positions.len(), 2);
        assert_eq!(suite.positions[1].name, "position 3");
        assert_eq!(suite.positions[0].counts, vec![20, 400, 8902]);
    }

    #[test]
    fn run_respects_max_depth() {
        let suite = Suite::from_toml_str(SUITE).unwrap();
        let report = suite.run(None);
        assert!(report.is_success());
        assert_eq!(report.passed, 4);

        let report = suite.run(Some(1));
        assert_eq!(report.passed, 2);
    }

    #[test]
    fn run_reports_mismatch() {
        let suite = Suite::from_toml_str(
            r#"
[[position]]
name = "wrong"
fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
counts = [21]
"#,
        )
        .unwrap();
        let report = suite.run(None);
        assert!(!report.is_success());
        assert_eq!(
            report.mismatches,
            vec![Mismatch {
                name: "wrong".to_string(),
                depth: 1,
                expected: 21,
                actual: 20,
            }]
        );
    }

    #[test]
    fn invalid_suites() {
        assert!(matches!(
            Suite::from_toml_str("max_depth = 3"),
            Err(SuiteError::Empty)
        ));
        assert!(matches!(
            Suite::from_toml_str("[[position]]\nname = \"x\""),
            Err(SuiteError::ParseError(_))
        ));
        assert!(matches!(
            Suite::from_toml_str("[[position]]\nname = \"x\"\nfen = \"8/8 w\"\ncounts = [1]"),
            Err(SuiteError::InvalidPosition { .. })
        ));
        assert!(matches!(
            Suite::from_toml_str(
                "[[position]]\nname = \"x\"\nfen = \"4k3/8/8/8/8/8/8/4K3 w - - 0 1\"\ncounts = []"
            ),
            Err(SuiteError::NoCounts(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Suite::load(Path::new("does/not/exist.toml")),
            Err(SuiteError::ReadError(_))
        ));
    }
}
