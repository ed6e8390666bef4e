use super::dto::SynthesisResult;

/// Per-chunk audio slots, sized to the chunk count before any task starts.
///
/// Every slot is filled at most once, by the result of the task that was handed
/// that index at spawn time.
#[derive(Debug)]
pub struct ResultTable {
    slots: Vec<Option<Vec<u8>>>,
}

impl ResultTable {
    pub fn new(chunk_count: usize) -> Self {
        Self {
            slots: vec![None; chunk_count],
        }
    }

    pub fn fill(&mut self, result: SynthesisResult) {
        let slot = &mut self.slots[result.index];
        debug_assert!(slot.is_none(), "slot {} written twice", result.index);
        *slot = Some(result.audio);
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Audio in index order, or None while any slot is still empty
    pub fn into_ordered(self) -> Option<Vec<Vec<u8>>> {
        self.slots.into_iter().collect()
    }
}
