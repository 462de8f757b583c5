//! Partial maps keyed by disjoint code-unit ranges.
//!
//! A `LetterMap<V>` maps a union of disjoint inclusive ranges to values, one
//! value per range. Lookup of a code unit binary-searches for the containing
//! range. The interesting operation is `merge`, which overlays two maps: the
//! output ranges are the coarsest refinement in which every range lies wholly
//! inside one input, the other, or both, and ranges covered by both carry the
//! combined value. Merge is associative whenever the combining function is,
//! which is what lets the automaton builder fold any number of per-state
//! transition tables into one edge table in any order.

use crate::letter_set::LetterSet;

/// A map from 16-bit code units to `V`, with range-compressed keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterMap<V> {
    /// Sorted, disjoint `(range, value)` entries.
    entries: Vec<((u16, u16), V)>,
}

impl<V> Default for LetterMap<V> {
    fn default() -> Self {
        LetterMap::new()
    }
}

impl<V> LetterMap<V> {
    /// The map with empty domain.
    pub fn new() -> LetterMap<V> {
        LetterMap {
            entries: Vec::new(),
        }
    }

    /// True when the domain is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of range entries (not the number of code units covered).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up the value whose range contains `cu`.
    pub fn get(&self, cu: u16) -> Option<&V> {
        self.entries
            .binary_search_by(|probe| {
                let (lo, hi) = probe.0;
                if cu < lo {
                    std::cmp::Ordering::Greater
                } else if cu > hi {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .ok()
            .map(|i| &self.entries[i].1)
    }

    /// Iterate `(range, value)` entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&(u16, u16), &V)> {
        self.entries.iter().map(|(r, v)| (r, v))
    }
}

impl<V: Clone> LetterMap<V> {
    /// Map every range of `keys` to (a clone of) `value`.
    pub fn from_set(keys: &LetterSet, value: V) -> LetterMap<V> {
        LetterMap {
            entries: keys.ranges().map(|r| (r, value.clone())).collect(),
        }
    }

    /// Overlay `other` onto `self`, combining doubly-covered ranges with `f`.
    ///
    /// Output ranges are split so that each lies wholly inside one input, the
    /// other, or both. Where only one input covers, its value carries over
    /// unchanged; where both cover, the entry holds `f(left, right)`.
    pub fn merge<F>(self, other: LetterMap<V>, f: F) -> LetterMap<V>
    where
        F: Fn(V, V) -> V,
    {
        let mut out = Vec::with_capacity(self.entries.len() + other.entries.len());
        let mut la = self.entries.into_iter();
        let mut ra = other.entries.into_iter();
        let mut lcur = la.next();
        let mut rcur = ra.next();

        loop {
            match (lcur, rcur) {
                (None, None) => break,
                (Some(e), None) => {
                    out.push(e);
                    lcur = la.next();
                    rcur = None;
                }
                (None, Some(e)) => {
                    out.push(e);
                    lcur = None;
                    rcur = ra.next();
                }
                (Some(((llo, lhi), lv)), Some(((rlo, rhi), rv))) => {
                    if lhi < rlo {
                        // Left entry is entirely before the right one.
                        out.push(((llo, lhi), lv));
                        lcur = la.next();
                        rcur = Some(((rlo, rhi), rv));
                    } else if rhi < llo {
                        out.push(((rlo, rhi), rv));
                        lcur = Some(((llo, lhi), lv));
                        rcur = ra.next();
                    } else if llo < rlo {
                        // Emit the left-only prefix, keep the rest for the
                        // next round.
                        out.push(((llo, rlo - 1), lv.clone()));
                        lcur = Some(((rlo, lhi), lv));
                        rcur = Some(((rlo, rhi), rv));
                    } else if rlo < llo {
                        out.push(((rlo, llo - 1), rv.clone()));
                        lcur = Some(((llo, lhi), lv));
                        rcur = Some(((llo, rhi), rv));
                    } else {
                        // Starts are aligned: emit the shared piece.
                        if lhi == rhi {
                            out.push(((llo, lhi), f(lv, rv)));
                            lcur = la.next();
                            rcur = ra.next();
                        } else if lhi < rhi {
                            out.push(((llo, lhi), f(lv, rv.clone())));
                            lcur = la.next();
                            rcur = Some(((lhi + 1, rhi), rv));
                        } else {
                            out.push(((llo, rhi), f(lv.clone(), rv)));
                            lcur = Some(((rhi + 1, lhi), lv));
                            rcur = ra.next();
                        }
                    }
                }
            }
        }

        LetterMap { entries: out }
    }
}
