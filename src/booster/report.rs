use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::error::Result;

const HEADER: &str = "Round,TrainLoss,ValidLoss\n";

/// The per-round evaluation record of one boosting run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FitReport {
    /// Training loss after each round.
    pub train_loss: Vec<f64>,
    /// Validation loss after each round.
    /// Empty when no valid split was supplied.
    pub valid_loss: Vec<f64>,
    /// The 1-based round with the best validation loss. The returned
    /// model is truncated to it when early stopping is active.
    pub best_round: usize,
    /// The validation loss at `best_round`, if a valid split was used.
    pub best_score: Option<f64>,
}

impl FitReport {
    /// The number of boosting rounds that actually ran.
    pub fn rounds(&self) -> usize {
        self.train_loss.len()
    }

    /// Write the loss curves to a CSV file,
    /// one line per boosting round.
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(HEADER.as_bytes())?;

        for (round, train) in self.train_loss.iter().enumerate() {
            let valid = self
                .valid_loss
                .get(round)
                .map(|v| v.to_string())
                .unwrap_or_default();
            let line = format!("{},{train},{valid}\n", round + 1);
            file.write_all(line.as_bytes())?;
        }
        Ok(())
    }
}
