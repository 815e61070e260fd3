//! Export formatters and file sinks
//!
//! Formatters are pure: they take snapshots and return strings. Only a
//! [`FileSink`] touches the outside world.

pub mod csv;
pub mod downloads;
pub mod json;
pub mod records;
pub mod report;
pub mod sink;

pub use self::csv::{escape_field, to_csv};
pub use downloads::{name_slug, DownloadCenter, ExportFile, ExportKind};
pub use json::to_pretty_json;
pub use records::{CompleteBackup, ProfileExport, QuestionRow, EXPORT_VERSION};
pub use report::progress_report;
pub use sink::{DirectorySink, FileSink, MemorySink};
