pub mod change;
pub mod dominance;
pub mod magnitude;

pub use change::{change_table, percentage_change};
pub use dominance::{classify, DominanceReport};
pub use magnitude::{rank, MagnitudeCategory, RankedColumn};
