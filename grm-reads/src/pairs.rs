use fxhash::FxHashMap as HashMap;

use grm_core::{MateSide, Read};

///
/// The two mates of one fragment. Each side is independently present or absent.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadPair {
    first_mate: Option<Read>,
    second_mate: Option<Read>,
}

impl ReadPair {
    pub fn first_mate(&self) -> Option<&Read> {
        self.first_mate.as_ref()
    }

    pub fn second_mate(&self) -> Option<&Read> {
        self.second_mate.as_ref()
    }

    pub fn mate(&self, side: MateSide) -> Option<&Read> {
        match side {
            MateSide::First => self.first_mate.as_ref(),
            MateSide::Second => self.second_mate.as_ref(),
        }
    }

    fn slot_mut(&mut self, side: MateSide) -> &mut Option<Read> {
        match side {
            MateSide::First => &mut self.first_mate,
            MateSide::Second => &mut self.second_mate,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.first_mate.is_some() && self.second_mate.is_some()
    }

    pub fn num_reads(&self) -> usize {
        usize::from(self.first_mate.is_some()) + usize::from(self.second_mate.is_some())
    }

    ///
    /// The present mate of an incomplete pair, used to look up the missing one.
    /// Returns `None` for complete pairs.
    ///
    pub fn anchor(&self) -> Option<&Read> {
        match (&self.first_mate, &self.second_mate) {
            (Some(first), None) => Some(first),
            (None, Some(second)) => Some(second),
            _ => None,
        }
    }

    fn into_reads(self) -> impl Iterator<Item = Read> {
        self.first_mate.into_iter().chain(self.second_mate)
    }
}

///
/// Read pairs keyed by fragment id.
///
/// A pair only exists once at least one of its mates was added, and
/// [`ReadPairs::num_reads`] counts present mates, not pairs.
///
#[derive(Debug, Default)]
pub struct ReadPairs {
    pairs: HashMap<String, ReadPair>,
    num_reads: usize,
}

impl ReadPairs {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Upsert a read into the pair for its fragment.
    ///
    /// The slot is picked by [`Read::mate_side`]. If that slot is already filled the
    /// existing read is kept and `false` is returned.
    ///
    pub fn add(&mut self, read: Read) -> bool {
        let pair = self.pairs.entry(read.fragment_id.clone()).or_default();
        let slot = pair.slot_mut(read.mate_side());
        if slot.is_some() {
            return false;
        }
        *slot = Some(read);
        self.num_reads += 1;
        true
    }

    pub fn num_reads(&self) -> usize {
        self.num_reads
    }

    pub fn num_pairs(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, fragment_id: &str) -> Option<&ReadPair> {
        self.pairs.get(fragment_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ReadPair)> {
        self.pairs.iter()
    }

    /// Present mates of every pair that is missing its other mate.
    pub fn anchors(&self) -> Vec<Read> {
        self.pairs
            .values()
            .filter_map(ReadPair::anchor)
            .cloned()
            .collect()
    }

    /// Flatten into a list of reads. Order is unspecified.
    pub fn into_reads(self) -> Vec<Read> {
        let mut reads = Vec::with_capacity(self.num_reads);
        for pair in self.pairs.into_values() {
            reads.extend(pair.into_reads());
        }
        reads
    }
}
