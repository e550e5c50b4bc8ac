// Memory and process sampling module

mod meminfo;
mod process;

pub use meminfo::MemSnapshot;
pub use process::ProcessRecord;
