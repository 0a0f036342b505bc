/// Position of a country record inside the snapshot that produced it.
///
/// Ids are only meaningful against the snapshot they came from; a reload
/// produces a fresh id space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u32);

impl RecordId {
    pub fn new(index: u32) -> Self {
        RecordId(index)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(RecordId)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
