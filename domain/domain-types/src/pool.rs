//! Dynamic interval pool and byte-packed bitmask conversion.
//!
//! Domains built one interval at a time (for example by decoding dense
//! bitmask lines) take interval storage from a [`DynItvPool`]: intervals are
//! appended to the block the pool currently points at, and a fresh block of
//! `itvs_in_block` intervals is pushed onto the domain only when that block
//! is full. A line's intervals always stay contiguous, so the intervals
//! already placed for the current line are carried over into the new block.
//!
//! Bitmask lines are byte-packed with the least significant bit first: bit
//! `i` of a line is `bits[i / 8] & (1 << (i % 8))`.

use tracing::debug;

use crate::domain::{IntervalDomain, LineSlot, check_bounds, span};
use crate::error::{DomainError, DomainResult};
use crate::interval::Interval;

/// Default number of intervals per pool block.
pub const DEFAULT_ITVS_IN_BLOCK: usize = 1024;

/// Cursor into the interval block currently being filled.
///
/// A pool is bound to the domain it first fills; use a fresh pool per
/// domain.
///
/// # Example
///
/// ```
/// use domain_types::{DynItvPool, IntervalDomain};
///
/// let mut dom = IntervalDomain::new(0, 1, 0, 15)?;
/// let mut pool = DynItvPool::new(2);
/// dom.dyn_add(&mut pool, 0, 0, 2)?;
/// dom.dyn_add(&mut pool, 0, 4, 2)?;
/// dom.dyn_add(&mut pool, 1, 8, 8)?; // block full, a new one is taken
/// assert_eq!(dom.block_count(), 2);
/// assert_eq!(dom.interval_count(), 3);
/// # Ok::<(), domain_types::DomainError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DynItvPool {
    itvs_in_block: usize,
    block: Option<usize>,
    block_cap: usize,
    last_line: Option<i32>,
}

impl DynItvPool {
    /// Creates a pool handing out blocks of `itvs_in_block` intervals (at
    /// least one).
    #[must_use]
    pub fn new(itvs_in_block: usize) -> Self {
        Self {
            itvs_in_block: itvs_in_block.max(1),
            block: None,
            block_cap: 0,
            last_line: None,
        }
    }

    /// Number of intervals per block.
    #[must_use]
    pub const fn itvs_in_block(&self) -> usize {
        self.itvs_in_block
    }
}

impl Default for DynItvPool {
    fn default() -> Self {
        Self::new(DEFAULT_ITVS_IN_BLOCK)
    }
}

impl IntervalDomain {
    /// Appends an interval of `len` columns starting at relative column
    /// `left` to `line`, taking storage from `pool`.
    ///
    /// Lines must be filled in increasing order and intervals within a line
    /// from left to right; an interval touching the previous one on the
    /// same line extends it. Lines past `lastln` extend the domain. Call
    /// [`standardize`](Self::standardize) when finished.
    ///
    /// # Errors
    ///
    /// - [`DomainError::LineOutOfRange`] if `line < line1`.
    /// - [`DomainError::MalformedIntervals`] if `len < 1`, the line precedes
    ///   the last line filled through this pool, or the interval starts at or
    ///   before the previous interval's right end.
    pub fn dyn_add(
        &mut self,
        pool: &mut DynItvPool,
        line: i32,
        left: i32,
        len: i32,
    ) -> DomainResult<()> {
        if self.lines.is_empty() || line < self.line1 {
            return Err(DomainError::LineOutOfRange {
                line,
                line1: self.line1,
                lastln: self.lastln,
            });
        }
        if len < 1 {
            return Err(DomainError::MalformedIntervals {
                line,
                details: format!("interval length {len}"),
            });
        }
        if pool.last_line.is_some_and(|l| line < l) {
            return Err(DomainError::MalformedIntervals {
                line,
                details: "lines must be added in increasing order".to_string(),
            });
        }
        if line > self.lastln {
            self.lines.resize(span(self.line1, line), LineSlot::default());
            self.lastln = line;
        }
        pool.last_line = Some(line);

        let idx = span(self.line1, line) - 1;
        let slot = self.lines[idx];
        let itv = Interval::from_len(left, len);

        if slot.len > 0 {
            let prev = self.blocks[slot.block][slot.start + slot.len - 1];
            if itv.left <= prev.right {
                return Err(DomainError::MalformedIntervals {
                    line,
                    details: format!(
                        "interval [{}, {}] overlaps or precedes [{}, {}]",
                        itv.left, itv.right, prev.left, prev.right
                    ),
                });
            }
            if itv.left == prev.right + 1 {
                self.blocks[slot.block][slot.start + slot.len - 1].right = itv.right;
                return Ok(());
            }
        }

        let reuse = pool.block.filter(|&b| {
            self.blocks.get(b).is_some_and(|blk| blk.len() < pool.block_cap)
                && (slot.len == 0
                    || (slot.block == b && slot.start + slot.len == self.blocks[b].len()))
        });
        let block = if let Some(b) = reuse {
            b
        } else {
            let cap = pool.itvs_in_block.max(slot.len + 1);
            let mut fresh = Vec::with_capacity(cap);
            if slot.len > 0 {
                fresh.extend_from_slice(self.slot_intervals(idx));
            }
            self.blocks.push(fresh);
            let b = self.blocks.len() - 1;
            self.lines[idx] = LineSlot {
                block: b,
                start: 0,
                len: slot.len,
            };
            pool.block = Some(b);
            pool.block_cap = cap;
            b
        };

        let slot = &mut self.lines[idx];
        if slot.len == 0 {
            slot.block = block;
            slot.start = self.blocks[block].len();
        }
        self.blocks[block].push(itv);
        slot.len += 1;
        Ok(())
    }

    /// Decodes one byte-packed bitmask line into intervals on `line`.
    ///
    /// Bit `i` maps to relative column `i`. Bits at or beyond `width` are
    /// ignored and an all-zero line adds nothing. Whole zero and whole one
    /// bytes are skipped a byte at a time.
    ///
    /// # Errors
    ///
    /// Propagates [`dyn_add`](Self::dyn_add) errors.
    pub fn add_bitmask_line(
        &mut self,
        pool: &mut DynItvPool,
        bits: &[u8],
        line: i32,
        width: usize,
    ) -> DomainResult<()> {
        let width = width.min(bits.len() * 8);
        let mut bit = 0usize;
        let mut run: Option<usize> = None;
        while bit < width {
            let byte = bits[bit / 8];
            if bit % 8 == 0 && bit + 8 <= width && (byte == 0x00 || byte == 0xff) {
                if byte == 0x00 {
                    if let Some(start) = run.take() {
                        self.dyn_add(pool, line, col(start), col(bit - start))?;
                    }
                } else if run.is_none() {
                    run = Some(bit);
                }
                bit += 8;
                continue;
            }
            let set = byte & (1 << (bit % 8)) != 0;
            match (set, run) {
                (true, None) => run = Some(bit),
                (false, Some(start)) => {
                    self.dyn_add(pool, line, col(start), col(bit - start))?;
                    run = None;
                }
                _ => {}
            }
            bit += 1;
        }
        if let Some(start) = run {
            self.dyn_add(pool, line, col(start), col(width - start))?;
        }
        Ok(())
    }

    /// Builds a standardized domain from byte-packed rows.
    ///
    /// Row `i` describes line `line1 + i`; bit `j` of a row describes column
    /// `kol1 + j`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBounds`] if `width` is zero while rows
    /// are given.
    ///
    /// # Example
    ///
    /// ```
    /// use domain_types::IntervalDomain;
    ///
    /// let rows = [[0b0110_0011u8], [0b0000_0000], [0b1000_0000]];
    /// let dom = IntervalDomain::from_bitmask(0, 0, 8, &rows)?;
    /// assert_eq!(dom.interval_count(), 3);
    /// assert_eq!(dom.area(), 5);
    /// # Ok::<(), domain_types::DomainError>(())
    /// ```
    pub fn from_bitmask<R>(line1: i32, kol1: i32, width: usize, rows: &[R]) -> DomainResult<Self>
    where
        R: AsRef<[u8]>,
    {
        if rows.is_empty() {
            return Ok(Self::empty());
        }
        let lastln = line1 + i32::try_from(rows.len() - 1).unwrap_or(i32::MAX);
        let lastkl = kol1 + i32::try_from(width).unwrap_or(i32::MAX) - 1;
        check_bounds("column", kol1, lastkl)?;
        let mut dom = Self::new(line1, lastln, kol1, lastkl)?;
        let mut pool = DynItvPool::new(width / 2 + 1);
        for (line, row) in (line1..).zip(rows) {
            dom.add_bitmask_line(&mut pool, row.as_ref(), line, width)?;
        }
        dom.standardize();
        debug!(
            rows = rows.len(),
            width,
            intervals = dom.interval_count(),
            blocks = dom.block_count(),
            "Decoded bitmask domain"
        );
        Ok(dom)
    }

    /// Encodes the domain as byte-packed rows covering its bounding box.
    ///
    /// Row `i` describes line `line1 + i`, bit `j` column `kol1 + j`.
    #[must_use]
    pub fn to_bitmask(&self) -> Vec<Vec<u8>> {
        let width = span(self.kol1, self.lastkl);
        self.lines()
            .map(|(_, itvs)| {
                let mut row = vec![0u8; width.div_ceil(8)];
                for itv in itvs {
                    set_bit_interval(&mut row, itv.left, itv.right, width);
                }
                row
            })
            .collect()
    }
}

/// Sets the bits of a byte-packed line within `[left, right]`, clipped to
/// `[0, width)`.
///
/// # Example
///
/// ```
/// use domain_types::set_bit_interval;
///
/// let mut bits = [0u8; 3];
/// set_bit_interval(&mut bits, 6, 17, 20);
/// assert_eq!(bits, [0b1100_0000, 0xff, 0b0000_0011]);
/// ```
pub fn set_bit_interval(bits: &mut [u8], left: i32, right: i32, width: usize) {
    let width = width.min(bits.len() * 8);
    let (Ok(left), Ok(right)) = (usize::try_from(left.max(0)), usize::try_from(right)) else {
        return;
    };
    if left >= width {
        return;
    }
    let right = right.min(width - 1);
    let mut bit = left;
    while bit <= right {
        if bit % 8 == 0 && bit + 7 <= right {
            bits[bit / 8] = 0xff;
            bit += 8;
        } else {
            bits[bit / 8] |= 1 << (bit % 8);
            bit += 1;
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn col(n: usize) -> i32 {
    n as i32
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn pool_keeps_line_contiguous_across_blocks() {
        let mut dom = IntervalDomain::new(0, 0, 0, 63).unwrap();
        let mut pool = DynItvPool::new(2);
        for k in 0..5 {
            dom.dyn_add(&mut pool, 0, k * 4, 2).unwrap();
        }
        let itvs = dom.line_intervals(0);
        assert_eq!(itvs.len(), 5);
        assert!(itvs.windows(2).all(|w| w[0].right + 1 < w[1].left));
        assert!(dom.block_count() >= 2);
    }

    #[test]
    fn pool_rejects_backwards_lines_and_overlaps() {
        let mut dom = IntervalDomain::new(0, 5, 0, 9).unwrap();
        let mut pool = DynItvPool::new(8);
        dom.dyn_add(&mut pool, 3, 0, 4).unwrap();
        assert!(dom.dyn_add(&mut pool, 2, 0, 1).is_err());
        assert!(dom.dyn_add(&mut pool, 3, 2, 1).is_err());
        assert!(dom.dyn_add(&mut pool, 3, 6, 0).is_err());
        assert!(matches!(
            dom.dyn_add(&mut pool, -1, 0, 1),
            Err(DomainError::LineOutOfRange { .. })
        ));
    }

    #[test]
    fn pool_merges_adjacent_runs() {
        let mut dom = IntervalDomain::new(0, 0, 0, 9).unwrap();
        let mut pool = DynItvPool::default();
        dom.dyn_add(&mut pool, 0, 0, 3).unwrap();
        dom.dyn_add(&mut pool, 0, 3, 2).unwrap();
        assert_eq!(dom.line_intervals(0), &[Interval::new(0, 4)]);
    }

    #[test]
    fn pool_extends_lastln() {
        let mut dom = IntervalDomain::new(0, 0, 0, 9).unwrap();
        let mut pool = DynItvPool::default();
        dom.dyn_add(&mut pool, 4, 1, 1).unwrap();
        assert_eq!(dom.lastln(), 4);
        dom.standardize();
        assert_eq!(dom.line1(), 4);
    }

    #[test]
    fn bitmask_fast_paths() {
        let mut dom = IntervalDomain::new(0, 0, 0, 31).unwrap();
        let mut pool = DynItvPool::default();
        dom.add_bitmask_line(&mut pool, &[0x00, 0xff, 0xff, 0x01], 0, 32).unwrap();
        assert_eq!(dom.line_intervals(0), &[Interval::new(8, 24)]);
    }

    #[test]
    fn bitmask_ignores_bits_beyond_width() {
        let mut dom = IntervalDomain::new(0, 0, 0, 15).unwrap();
        let mut pool = DynItvPool::default();
        dom.add_bitmask_line(&mut pool, &[0xf0, 0xff], 0, 6).unwrap();
        assert_eq!(dom.line_intervals(0), &[Interval::new(4, 5)]);
    }

    #[test]
    fn all_zero_bitmask_is_empty() {
        let dom = IntervalDomain::from_bitmask(0, 0, 16, &[[0u8, 0u8]]).unwrap();
        assert!(dom.is_empty());
    }

    #[test]
    fn bitmask_round_trip() {
        let dom = IntervalDomain::from_intervals(
            2,
            &[vec![(3, 3), (5, 12), (14, 30)], vec![], vec![(3, 10)]],
        )
        .unwrap();
        let rows = dom.to_bitmask();
        let width = usize::try_from(dom.lastkl() - dom.kol1() + 1).unwrap();
        let back = IntervalDomain::from_bitmask(dom.line1(), dom.kol1(), width, &rows).unwrap();
        assert_eq!(back, dom);
    }

    #[test]
    fn set_bit_interval_clips() {
        let mut bits = [0u8; 2];
        set_bit_interval(&mut bits, -5, 2, 16);
        assert_eq!(bits, [0b0000_0111, 0]);
        set_bit_interval(&mut bits, 14, 40, 15);
        assert_eq!(bits, [0b0000_0111, 0b0100_0000]);
        set_bit_interval(&mut bits, 20, 30, 16);
        assert_eq!(bits, [0b0000_0111, 0b0100_0000]);
    }
}
