use super::{NavigationHistory, SessionPhase};
use crate::answer::AnswerSet;
use crate::error::SnapshotError;
use crate::graph::StepGraph;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;

/// The complete, serializable state of one respondent session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub history: NavigationHistory,
    pub answers: AnswerSet,
}

impl SessionSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        encode_to_vec(self, standard()).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        decode_from_slice(bytes, standard())
            .map(|(snapshot, _)| snapshot)
            .map_err(|e| SnapshotError::Decode(e.to_string()))
    }

    /// Saves the snapshot to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), SnapshotError> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)
            .map_err(|e| SnapshotError::Encode(format!("Could not write '{}': {}", path, e)))
    }

    pub fn from_file(path: &str) -> Result<Self, SnapshotError> {
        let bytes = fs::read(path)
            .map_err(|e| SnapshotError::Decode(format!("Could not read '{}': {}", path, e)))?;
        Self::from_bytes(&bytes)
    }

    /// Checks that every index in the snapshot points at a step of `graph`.
    pub fn validate_against(&self, graph: &StepGraph) -> Result<(), SnapshotError> {
        if self.history.is_empty() {
            return Err(SnapshotError::Incompatible(
                "navigation history is empty".to_string(),
            ));
        }
        if let Some(index) = self
            .history
            .entries()
            .iter()
            .copied()
            .chain(self.phase.current_index())
            .find(|&i| i >= graph.len())
        {
            return Err(SnapshotError::Incompatible(format!(
                "index {} is out of range for a form of {} steps",
                index,
                graph.len()
            )));
        }
        Ok(())
    }
}
