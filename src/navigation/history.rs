use serde::{Deserialize, Serialize};

/// The back-stack of visited step indices for one session.
///
/// Independent of the branching graph: going back replays what the respondent
/// actually saw, never what the rules would compute. It always holds at least
/// the starting index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationHistory {
    entries: Vec<usize>,
}

impl NavigationHistory {
    pub fn new(start_index: usize) -> Self {
        Self {
            entries: vec![start_index],
        }
    }

    pub fn push(&mut self, index: usize) {
        self.entries.push(index);
    }

    /// Pops the most recent entry. Refuses to drop the last remaining one.
    pub fn pop(&mut self) -> Option<usize> {
        if self.entries.len() > 1 {
            self.entries.pop()
        } else {
            None
        }
    }

    pub fn last(&self) -> Option<usize> {
        self.entries.last().copied()
    }

    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(0)
    }
}
