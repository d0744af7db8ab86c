//! Lookup tables turning a "greater than pivot" lane mask into a lane order
//! that moves the `<=` lanes to the front and the `>` lanes to the back.
//!
//! Row `m` lists the lanes whose bit is clear in `m` (low to high) followed by
//! the lanes whose bit is set (low to high), so both groups keep their
//! relative order inside the block. Each table is kept twice: once as packed
//! lane indices and once as 32-byte rows of dword indices that can be fed
//! straight into an aligned vector load for `vpermd`.

use std::fmt;

/// Dword-index rows, 64-byte aligned so every 32-byte row is vector aligned.
#[repr(C, align(64))]
pub struct AlignedRows<const ENTRIES: usize>([[i32; 8]; ENTRIES]);

pub struct PermutationTable<const LANES: usize, const ENTRIES: usize> {
    natural: [[u8; LANES]; ENTRIES],
    aligned: AlignedRows<ENTRIES>,
}

/// 8 lanes of 32-bit elements, 256 rows.
pub static PERM_8X32: PermutationTable<8, 256> = PermutationTable::generate();

/// 4 lanes of 64-bit elements, 16 rows. Aligned rows hold dword pairs.
pub static PERM_4X64: PermutationTable<4, 16> = PermutationTable::generate();

impl<const LANES: usize, const ENTRIES: usize> PermutationTable<LANES, ENTRIES> {
    const fn generate() -> Self {
        assert!(ENTRIES == 1 << LANES);
        assert!(8 % LANES == 0);
        let dwords = 8 / LANES;

        let mut natural = [[0u8; LANES]; ENTRIES];
        let mut aligned = [[0i32; 8]; ENTRIES];
        let mut mask = 0;
        while mask < ENTRIES {
            let mut out = 0;
            // bit-clear lanes first, then bit-set lanes
            let mut pass = 0;
            while pass < 2 {
                let mut lane = 0;
                while lane < LANES {
                    if (mask >> lane) & 1 == pass {
                        natural[mask][out] = lane as u8;
                        let mut d = 0;
                        while d < dwords {
                            aligned[mask][out * dwords + d] = (lane * dwords + d) as i32;
                            d += 1;
                        }
                        out += 1;
                    }
                    lane += 1;
                }
                pass += 1;
            }
            mask += 1;
        }

        Self {
            natural,
            aligned: AlignedRows(aligned),
        }
    }

    /// Number of rows, `2^LANES`.
    #[inline]
    pub const fn entries(&self) -> usize {
        ENTRIES
    }

    /// Lane order for `mask`. `mask` must be below `2^LANES`; higher bits
    /// are ignored in release builds.
    #[inline(always)]
    pub fn lanes(&self, mask: u32) -> &[u8; LANES] {
        debug_assert!((mask as usize) < ENTRIES, "mask {mask:#x} out of range");
        &self.natural[mask as usize & (ENTRIES - 1)]
    }

    /// The 32-byte aligned dword-index row for `mask`.
    #[inline(always)]
    pub fn aligned_row(&self, mask: u32) -> &[i32; 8] {
        debug_assert!((mask as usize) < ENTRIES, "mask {mask:#x} out of range");
        &self.aligned.0[mask as usize & (ENTRIES - 1)]
    }
}

impl<const LANES: usize, const ENTRIES: usize> fmt::Debug for PermutationTable<LANES, ENTRIES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermutationTable")
            .field("lanes", &LANES)
            .field("entries", &ENTRIES)
            .finish()
    }
}

/// Lane order for a block of `lanes` elements.
#[inline(always)]
pub(crate) fn lane_order(lanes: usize, mask: u32) -> &'static [u8] {
    match lanes {
        8 => PERM_8X32.lanes(mask),
        4 => PERM_4X64.lanes(mask),
        _ => panic!("no permutation table for {lanes} lanes"),
    }
}
