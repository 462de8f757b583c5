//! Character sets as sorted runs of 16-bit code units.
//!
//! A `LetterSet` stores the characters it contains as a sorted sequence of
//! disjoint, non-adjacent inclusive ranges. Every constructor and operation
//! re-establishes that canonical form, so two sets are equal exactly when
//! their representations are equal. This is what lets the automaton builder
//! use sets as map keys and compare them structurally.
//!
//! The universe is the full 16-bit code-unit space (`0x0000..=0xFFFF`), the
//! units produced by `str::encode_utf16`. Surrogate code units are ordinary
//! members; pairing them up is the caller's concern, not ours.

use std::ops::{BitAnd, BitOr, Not};

use smallvec::SmallVec;

use crate::size::Size;

/// The largest code unit in the universe.
const UNIT_MAX: u16 = u16::MAX;

/// An immutable set of 16-bit code units.
///
/// Real-world classes like `[A-Za-z0-9_]` are a handful of ranges, so the
/// range list is inline-allocated up to four entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LetterSet {
    /// Sorted, disjoint, non-adjacent inclusive `(lo, hi)` ranges.
    ranges: SmallVec<[(u16, u16); 4]>,
}

impl LetterSet {
    /// The set containing no code units.
    pub fn empty() -> LetterSet {
        LetterSet {
            ranges: SmallVec::new(),
        }
    }

    /// The set containing every code unit.
    pub fn full() -> LetterSet {
        LetterSet {
            ranges: SmallVec::from_slice(&[(0, UNIT_MAX)]),
        }
    }

    /// The set matched by the `.` wildcard: everything that is not nothing.
    ///
    /// This includes the newline and both surrogate halves.
    pub fn dot() -> LetterSet {
        LetterSet::empty().complement()
    }

    /// The set containing a single code unit.
    pub fn single(cu: u16) -> LetterSet {
        LetterSet {
            ranges: SmallVec::from_slice(&[(cu, cu)]),
        }
    }

    /// The set containing the inclusive range `lo..=hi`.
    ///
    /// Requires `lo <= hi`.
    pub fn range(lo: u16, hi: u16) -> LetterSet {
        assert!(lo <= hi, "invalid range {:#06x}-{:#06x}", lo, hi);
        LetterSet {
            ranges: SmallVec::from_slice(&[(lo, hi)]),
        }
    }

    /// True when the set has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// True when the set contains every code unit.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ranges.len() == 1 && self.ranges[0] == (0, UNIT_MAX)
    }

    /// Number of code units in the set.
    pub fn len(&self) -> u32 {
        self.ranges
            .iter()
            .map(|&(lo, hi)| hi as u32 - lo as u32 + 1)
            .sum()
    }

    /// Cardinality of the set as a `Size`.
    pub fn size(&self) -> Size {
        Size::from(self.len())
    }

    /// Membership test by binary search over range starts.
    pub fn contains(&self, cu: u16) -> bool {
        self.ranges
            .binary_search_by(|&(lo, hi)| {
                if cu < lo {
                    std::cmp::Ordering::Greater
                } else if cu > hi {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Iterate the inclusive `(lo, hi)` ranges in ascending order.
    pub fn ranges(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.ranges.iter().copied()
    }

    /// The union of two sets.
    pub fn union(&self, other: &LetterSet) -> LetterSet {
        let merged: SmallVec<[(u16, u16); 4]> = self
            .ranges
            .iter()
            .chain(other.ranges.iter())
            .copied()
            .collect();
        LetterSet::normalize(merged)
    }

    /// The intersection of two sets, by a sorted two-pointer walk.
    pub fn intersection(&self, other: &LetterSet) -> LetterSet {
        let mut out = SmallVec::new();
        let (a, b) = (&self.ranges, &other.ranges);
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let (alo, ahi) = a[i];
            let (blo, bhi) = b[j];
            let lo = alo.max(blo);
            let hi = ahi.min(bhi);
            if lo <= hi {
                out.push((lo, hi));
            }
            // Advance whichever range ends first.
            if ahi < bhi {
                i += 1;
            } else {
                j += 1;
            }
        }
        LetterSet { ranges: out }
    }

    /// The complement within the full 16-bit space.
    pub fn complement(&self) -> LetterSet {
        let mut out = SmallVec::new();
        // Tracked as u32 so the point past 0xFFFF does not wrap.
        let mut next: u32 = 0;
        for &(lo, hi) in &self.ranges {
            if (lo as u32) > next {
                out.push((next as u16, lo - 1));
            }
            next = hi as u32 + 1;
        }
        if next <= UNIT_MAX as u32 {
            out.push((next as u16, UNIT_MAX));
        }
        LetterSet { ranges: out }
    }

    /// Sort and coalesce overlapping or adjacent ranges into canonical form.
    fn normalize(mut ranges: SmallVec<[(u16, u16); 4]>) -> LetterSet {
        if ranges.is_empty() {
            return LetterSet::empty();
        }
        ranges.sort_unstable_by_key(|r| r.0);

        let mut out: SmallVec<[(u16, u16); 4]> = SmallVec::new();
        let mut current = ranges[0];
        for &(lo, hi) in ranges.iter().skip(1) {
            if lo as u32 > current.1 as u32 + 1 {
                out.push(current);
                current = (lo, hi);
            } else if hi > current.1 {
                current.1 = hi;
            }
        }
        out.push(current);
        LetterSet { ranges: out }
    }
}

impl FromIterator<u16> for LetterSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> LetterSet {
        let ranges: SmallVec<[(u16, u16); 4]> = iter.into_iter().map(|cu| (cu, cu)).collect();
        LetterSet::normalize(ranges)
    }
}

impl BitOr for &LetterSet {
    type Output = LetterSet;

    fn bitor(self, rhs: &LetterSet) -> LetterSet {
        self.union(rhs)
    }
}

impl BitAnd for &LetterSet {
    type Output = LetterSet;

    fn bitand(self, rhs: &LetterSet) -> LetterSet {
        self.intersection(rhs)
    }
}

impl Not for &LetterSet {
    type Output = LetterSet;

    fn not(self) -> LetterSet {
        self.complement()
    }
}

impl Not for LetterSet {
    type Output = LetterSet;

    fn not(self) -> LetterSet {
        self.complement()
    }
}
