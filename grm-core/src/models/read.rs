/// Which end of a fragment a read came from.
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
pub enum MateSide {
    First,
    Second,
}

impl MateSide {
    pub fn opposite(self) -> MateSide {
        match self {
            MateSide::First => MateSide::Second,
            MateSide::Second => MateSide::First,
        }
    }
}

///
/// A single aligned sequencing read.
///
/// Only the fields needed to pair a read with its mate and place it on the reference are
/// kept. Positions are 0-based. A missing record is represented as `Option<Read>::None`
/// by the containers that hold reads, never by a sentinel value here.
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Read {
    /// Template (fragment) name shared by both mates.
    pub fragment_id: String,
    pub chrom_id: Option<usize>,
    pub pos: i64,
    pub bases: String,
    pub mate_chrom_id: Option<usize>,
    pub mate_pos: i64,
    pub is_first_mate: bool,
    pub is_reverse: bool,
    pub mapq: u8,
}

impl Read {
    pub fn new(fragment_id: impl Into<String>, chrom_id: usize, pos: i64, bases: impl Into<String>) -> Self {
        Read {
            fragment_id: fragment_id.into(),
            chrom_id: Some(chrom_id),
            pos,
            bases: bases.into(),
            mate_chrom_id: None,
            mate_pos: -1,
            is_first_mate: true,
            is_reverse: false,
            mapq: 60,
        }
    }

    pub fn with_mate(mut self, mate_chrom_id: usize, mate_pos: i64) -> Self {
        self.mate_chrom_id = Some(mate_chrom_id);
        self.mate_pos = mate_pos;
        self
    }

    pub fn with_side(mut self, side: MateSide) -> Self {
        self.is_first_mate = side == MateSide::First;
        self
    }

    pub fn with_reverse(mut self, is_reverse: bool) -> Self {
        self.is_reverse = is_reverse;
        self
    }

    pub fn with_mapq(mut self, mapq: u8) -> Self {
        self.mapq = mapq;
        self
    }

    /// Number of bases in the read sequence.
    pub fn len(&self) -> i64 {
        self.bases.len() as i64
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn mate_side(&self) -> MateSide {
        if self.is_first_mate {
            MateSide::First
        } else {
            MateSide::Second
        }
    }

    pub fn mate_on_same_contig(&self) -> bool {
        self.chrom_id.is_some() && self.chrom_id == self.mate_chrom_id
    }

    /// Absolute distance between this read's start and its mate's start.
    pub fn mate_distance(&self) -> i64 {
        (self.pos - self.mate_pos).abs()
    }
}
