//! 状态存储：全部领域集合的唯一事实源。
//!
//! 每次变更同步跑完后把整体快照写回持久层，对外看不到任何中间状态。

pub mod seed;
pub mod snapshot;
pub mod spreadsheet;
pub mod store;

pub use snapshot::{JournalSnapshot, LocalFileStore, NullStore, SnapshotStore};
pub use spreadsheet::{ImportOutcome, RowError};
pub use store::{ExecutionReceipt, ImportReport, JournalStore};
