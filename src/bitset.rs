//! Growable bit set used to mark visited pairs during closure computations.

/// A bit set backed by a vector of u64 words.
///
/// Each bit corresponds to a dense index (for example, a position in the list
/// of processed pairs). The set grows automatically on insertion.
#[derive(Debug, Clone, Default)]
pub struct BitSet {
    words: Vec<u64>,
}

impl BitSet {
    const BITS_PER_WORD: usize = 64;

    /// Creates an empty bit set able to hold `capacity` bits without growing.
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(Self::BITS_PER_WORD)],
        }
    }

    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        (index / Self::BITS_PER_WORD, index % Self::BITS_PER_WORD)
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        let (word, bit) = Self::word_and_bit(index);
        self.words.get(word).is_some_and(|w| w & (1u64 << bit) != 0)
    }

    /// Sets the bit at `index`. Returns true if it was not previously set.
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        let (word, bit) = Self::word_and_bit(index);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let mask = 1u64 << bit;
        if self.words[word] & mask != 0 {
            return false;
        }
        self.words[word] |= mask;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let bs = BitSet::default();
        assert!(!bs.contains(0));
        assert!(!bs.contains(100));
    }

    #[test]
    fn test_insert_contains() {
        let mut bs = BitSet::new(10);
        assert!(bs.insert(3));
        assert!(!bs.insert(3));
        assert!(bs.insert(130));
        assert!(bs.contains(3));
        assert!(bs.contains(130));
        assert!(!bs.contains(4));
        assert!(!bs.contains(129));
    }

    #[test]
    fn test_word_boundaries() {
        let mut bs = BitSet::new(100);
        for i in [63, 64, 127] {
            assert!(bs.insert(i));
        }
        assert!(bs.contains(63) && bs.contains(64) && bs.contains(127));
        assert!(!bs.contains(62) && !bs.contains(65) && !bs.contains(128));
    }
}
