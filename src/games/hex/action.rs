//! Hex stone placements.
//!
//! ```
//! use rust_turnsim::games::hex::HexAction;
//!
//! assert_eq!(HexAction::new(1, 4).to_string(), "B4");
//! ```

use serde::{Deserialize, Serialize};

/// Stone placement at `(x, y)`.
///
/// Displays as a column letter followed by the raw row index, so `(1, 4)`
/// is `B4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HexAction {
    pub x: u8,
    pub y: u8,
}

impl HexAction {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// The cell mirrored across the main diagonal.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        Self { x: self.y, y: self.x }
    }
}

impl std::fmt::Display for HexAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.x {
            0..=25 => write!(f, "{}{}", char::from(b'A' + self.x), self.y),
            _ => write!(f, "({}, {})", self.x, self.y),
        }
    }
}
