//! Plain-text rendering of packs
//!
//! ```text
//! Pack Number: 1
//! 1001,6200,30,9.653
//! Pack Length: 6200, Pack Weight: 289.59
//! ```

use std::fmt;

use crate::item::Fragment;
use crate::pack::Pack;

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{:.3}",
            self.id, self.length, self.quantity, self.weight
        )
    }
}

impl fmt::Display for Pack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pack Number: {}", self.number())?;
        for fragment in self.fragments() {
            writeln!(f, "{fragment}")?;
        }
        write!(
            f,
            "Pack Length: {}, Pack Weight: {:.2}",
            self.max_length(),
            self.total_weight()
        )
    }
}

/// Render every non-empty pack, each block followed by a newline
pub fn render_packs(packs: &[Pack]) -> String {
    let mut out = String::new();
    for pack in packs.iter().filter(|p| !p.is_empty()) {
        out.push_str(&pack.to_string());
        out.push('\n');
    }
    out
}
