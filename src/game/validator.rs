use crate::models::WordEntry;

/// Which list entry a selection resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordMatch {
    /// Index into the word list
    pub index: usize,
    /// True when the run was read in the word's own order
    pub forward: bool,
}

pub struct WordValidator {
    entries: Vec<WordEntry>,
}

impl WordValidator {
    pub fn new(words: &[String]) -> Self {
        Self {
            entries: words
                .iter()
                .map(|word| WordEntry {
                    word: word.clone(),
                    found: false,
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.entries.iter().find(|e| e.word == word)
    }

    pub fn all_found(&self) -> bool {
        self.entries.iter().all(|e| e.found)
    }

    /// Resolve a read string against the unfound words.
    /// The active word wins if it matches either reading, otherwise list order decides.
    pub fn resolve(&self, read: &str, active: Option<&str>) -> Option<WordMatch> {
        let reversed: String = read.chars().rev().collect();
        let matches = |entry: &WordEntry| !entry.found && (entry.word == read || entry.word == reversed);

        let index = active
            .and_then(|word| self.entries.iter().position(|e| e.word == word && matches(e)))
            .or_else(|| self.entries.iter().position(|e| matches(e)))?;

        Some(WordMatch {
            index,
            forward: self.entries[index].word == read,
        })
    }

    /// Flip an entry to found. Returns false if it already was.
    pub fn mark_found(&mut self, index: usize) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) if !entry.found => {
                entry.found = true;
                true
            }
            _ => false,
        }
    }
}
