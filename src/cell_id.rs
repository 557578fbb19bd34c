//! Quadtree cell identifiers.
//!
//! A [`QuadCellId`] names one node of a quadtree that splits every rectangle
//! into four equal quadrants. Its path from the root is a sequence of base-4
//! digits, packed two bits per digit into a `u64`:
//!
//! ```text
//! bit  63..60   59..58    57..56    ...   1..0
//!      unused   digit 0   digit 1   ...   digit 29
//! ```
//!
//! Digits are left-aligned and unused positions stay zero, so comparing
//! `(bits, level)` orders cells exactly like their string encodings.
//!
//! Quadrant numbering: bit 0 of a digit selects the high-x half, bit 1 the
//! high-y half.
//!
//! ```text
//!   +---+---+
//!   | 2 | 3 |
//!   +---+---+
//!   | 0 | 1 |
//!   +---+---+
//! ```

use crate::error::{QuadCellError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Largest supported number of depth levels (30 path digits).
pub const MAX_DEPTH_LEVELS: u8 = 31;

/// Depth used by the geographic presets and by [`FromStr`].
pub const DEFAULT_DEPTH_LEVELS: u8 = 19;

#[inline]
const fn digit_shift(index: u8) -> u32 {
    2 * (MAX_DEPTH_LEVELS - 2 - index) as u32
}

/// Number of cells in a full subtree rooted at `level`.
#[inline]
const fn subtree_size_at(level: u8, depth_levels: u8) -> i64 {
    (((1u64 << (2 * (depth_levels - level) as u32)) - 1) / 3) as i64
}

/// One node of a fixed-depth quadtree.
///
/// Cells are small `Copy` values; navigation is pure computation over the
/// packed path. The configured number of depth levels travels with the cell
/// so that [`QuadCellId::child`] and the string decoder can enforce it.
///
/// # Examples
///
/// ```
/// use quadcell::QuadCellId;
///
/// let cell: QuadCellId = "0312".parse().unwrap();
/// assert_eq!(cell.level(), 4);
/// assert_eq!(cell.parent().to_string(), "031");
/// assert_eq!(cell.child(2).to_string(), "03122");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuadCellId {
    bits: u64,
    level: u8,
    depth_levels: u8,
}

impl QuadCellId {
    /// The level-0 cell spanning the whole domain.
    ///
    /// # Panics
    ///
    /// Panics if `depth_levels` is not in `1..=MAX_DEPTH_LEVELS`.
    pub fn root(depth_levels: u8) -> Self {
        assert!(
            (1..=MAX_DEPTH_LEVELS).contains(&depth_levels),
            "Depth levels must be between 1 and {}",
            MAX_DEPTH_LEVELS
        );
        Self {
            bits: 0,
            level: 0,
            depth_levels,
        }
    }

    /// Depth of this cell; the root is level 0.
    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Number of depth levels of the tree this cell belongs to.
    #[inline]
    pub fn depth_levels(&self) -> u8 {
        self.depth_levels
    }

    /// Deepest level a cell of this tree can have.
    #[inline]
    pub fn max_level(&self) -> u8 {
        self.depth_levels - 1
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    /// True for cells at the finest level of the tree.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.level == self.max_level()
    }

    /// The `quadrant`-th sub-quadrant, one level deeper.
    ///
    /// # Panics
    ///
    /// Panics if `quadrant > 3` or the cell is already at the finest level.
    pub fn child(&self, quadrant: u8) -> Self {
        assert!(quadrant < 4, "Quadrant must be in 0..4, got {}", quadrant);
        assert!(
            self.level + 1 < self.depth_levels,
            "Cell at level {} has no children with {} depth levels",
            self.level,
            self.depth_levels
        );
        Self {
            bits: self.bits | (u64::from(quadrant) << digit_shift(self.level)),
            level: self.level + 1,
            depth_levels: self.depth_levels,
        }
    }

    /// All four children in quadrant order.
    pub fn children(&self) -> [Self; 4] {
        [self.child(0), self.child(1), self.child(2), self.child(3)]
    }

    /// The cell one level up.
    ///
    /// # Panics
    ///
    /// Panics on the root cell.
    pub fn parent(&self) -> Self {
        self.try_parent().expect("Root cell has no parent")
    }

    /// The cell one level up, or `None` for the root.
    pub fn try_parent(&self) -> Option<Self> {
        if self.level == 0 {
            return None;
        }
        Some(self.ancestor_at_level(self.level - 1))
    }

    /// Ancestor at `level` (the cell itself when `level == self.level()`).
    ///
    /// # Panics
    ///
    /// Panics if `level` is deeper than this cell.
    pub fn ancestor_at_level(&self, level: u8) -> Self {
        assert!(
            level <= self.level,
            "Ancestor level {} is deeper than cell level {}",
            level,
            self.level
        );
        let bits = if level == 0 {
            0
        } else {
            self.bits & !((1u64 << digit_shift(level - 1)) - 1)
        };
        Self {
            bits,
            level,
            depth_levels: self.depth_levels,
        }
    }

    /// Digit chosen at `index` (0 = the root's split).
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.level()`.
    pub fn digit(&self, index: u8) -> u8 {
        assert!(index < self.level, "Digit index {} out of range", index);
        ((self.bits >> digit_shift(index)) & 3) as u8
    }

    /// Path digits from the root downward.
    pub fn digits(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.level).map(move |index| self.digit(index))
    }

    /// True when `other` is this cell or one of its descendants.
    pub fn is_ancestor_of(&self, other: &QuadCellId) -> bool {
        self.depth_levels == other.depth_levels
            && self.level <= other.level
            && other.ancestor_at_level(self.level) == *self
    }

    /// Deepest cell that is an ancestor of (or equal to) both `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if the cells belong to trees with different depth levels.
    pub fn common_ancestor(a: &QuadCellId, b: &QuadCellId) -> QuadCellId {
        assert_eq!(
            a.depth_levels, b.depth_levels,
            "Cells belong to trees of different depth"
        );
        let level = a.level.min(b.level);
        let a = a.ancestor_at_level(level);
        let b = b.ancestor_at_level(level);
        let diff = a.bits ^ b.bits;
        if diff == 0 {
            return a;
        }
        // Four unused high bits precede digit 0.
        let shared = ((diff.leading_zeros() - 4) / 2) as u8;
        a.ancestor_at_level(shared)
    }

    /// Side length of this cell measured in finest-level cells.
    #[inline]
    pub fn size_in_finest_cells(&self) -> u32 {
        1u32 << (self.depth_levels - 1 - self.level)
    }

    /// Low corner of this cell on the finest-level grid.
    ///
    /// The grid has `2^(depth_levels - 1)` columns and rows.
    pub fn xy(&self) -> (u32, u32) {
        let (mut x, mut y) = (0u32, 0u32);
        for digit in self.digits() {
            x = (x << 1) | u32::from(digit & 1);
            y = (y << 1) | u32::from(digit >> 1);
        }
        let scale = self.depth_levels - 1 - self.level;
        (x << scale, y << scale)
    }

    /// The cell at `level` containing finest-grid position `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `level` is not below `depth_levels` or the position lies
    /// outside the grid.
    pub fn from_xy(x: u32, y: u32, level: u8, depth_levels: u8) -> Self {
        let mut cell = Self::root(depth_levels);
        assert!(
            level < depth_levels,
            "Level {} out of range for {} depth levels",
            level,
            depth_levels
        );
        let grid = cell.size_in_finest_cells();
        assert!(
            x < grid && y < grid,
            "Grid position ({}, {}) outside {}x{} grid",
            x,
            y,
            grid,
            grid
        );
        for index in 0..level {
            let bit = u32::from(depth_levels - 2 - index);
            let quadrant = ((x >> bit) & 1) | (((y >> bit) & 1) << 1);
            cell = cell.child(quadrant as u8);
        }
        cell
    }

    /// Decode a digit string for a tree with `depth_levels` levels.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadcell::QuadCellId;
    ///
    /// let cell = QuadCellId::from_str_with_depth("21", 3).unwrap();
    /// assert_eq!(cell.level(), 2);
    /// assert!(QuadCellId::from_str_with_depth("210", 3).is_err());
    /// assert!(QuadCellId::from_str_with_depth("24", 3).is_err());
    /// ```
    pub fn from_str_with_depth(s: &str, depth_levels: u8) -> Result<Self> {
        let mut cell = Self::root(depth_levels);
        for (position, found) in s.chars().enumerate() {
            let quadrant = match found {
                '0'..='3' => found as u8 - b'0',
                _ => return Err(QuadCellError::InvalidCellDigit { position, found }),
            };
            if cell.is_leaf() {
                return Err(QuadCellError::CellTooDeep {
                    length: s.chars().count(),
                    depth_levels,
                });
            }
            cell = cell.child(quadrant);
        }
        Ok(cell)
    }

    /// Number of cells in the subtree rooted here, this cell included.
    pub fn subtree_size(&self) -> i64 {
        subtree_size_at(self.level, self.depth_levels)
    }

    /// Position of this cell in a pre-order walk of the full tree, starting
    /// at 1 for the root.
    ///
    /// All descendants of a cell have keys in
    /// `preorder_key()..preorder_key() + subtree_size()`, which turns a cell
    /// into a contiguous key range for integer-keyed stores.
    pub fn preorder_key(&self) -> i64 {
        let mut key = 1i64;
        for (index, digit) in self.digits().enumerate() {
            let child_level = index as u8 + 1;
            key += 1 + i64::from(digit) * subtree_size_at(child_level, self.depth_levels);
        }
        key
    }

    /// Inverse of [`QuadCellId::preorder_key`].
    pub fn from_preorder_key(key: i64, depth_levels: u8) -> Result<Self> {
        let mut cell = Self::root(depth_levels);
        if key < 1 || key > cell.subtree_size() {
            return Err(QuadCellError::InvalidCellKey { key, depth_levels });
        }
        let mut offset = key - 1;
        while offset > 0 {
            offset -= 1;
            let child_size = subtree_size_at(cell.level + 1, depth_levels);
            cell = cell.child((offset / child_size) as u8);
            offset %= child_size;
        }
        Ok(cell)
    }
}

impl Ord for QuadCellId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bits
            .cmp(&other.bits)
            .then(self.level.cmp(&other.level))
            .then(self.depth_levels.cmp(&other.depth_levels))
    }
}

impl PartialOrd for QuadCellId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for QuadCellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.digits() {
            fmt::Write::write_char(f, char::from(b'0' + digit))?;
        }
        Ok(())
    }
}

impl fmt::Debug for QuadCellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("QuadCellId")
            .field(&self.to_string())
            .finish()
    }
}

impl FromStr for QuadCellId {
    type Err = QuadCellError;

    /// Decodes with [`DEFAULT_DEPTH_LEVELS`].
    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_depth(s, DEFAULT_DEPTH_LEVELS)
    }
}

impl Serialize for QuadCellId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for QuadCellId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        encoded.parse().map_err(D::Error::custom)
    }
}
