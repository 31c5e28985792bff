mod item;
mod list;
mod reload;

pub use item::{RefreshOutcome, SourceItem};
pub use list::{SourceList, SourceListBuilder};
