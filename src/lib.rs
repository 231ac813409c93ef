pub mod archive;
pub mod calendar;
pub mod cell;
pub mod config;
pub mod error;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod layout;
pub mod logging;
pub mod pipeline;
pub mod source;
pub mod spreadsheet;
pub mod synthesize;
pub mod table;

pub use archive::{Upload, build_archive, process_batch};
pub use calendar::{DayType, ExpandedDate, expand};
pub use cell::Cell;
pub use config::{ConfigError, ServiceConfig};
pub use error::{TimetableError, TimetableResult};
pub use layout::{DayTypeLabels, SourceLayout};
pub use pipeline::{expand_table, load_table, output_file_name, process};
pub use source::{Direction, Grid, SourceRow, SourceTable};
pub use spreadsheet::SpreadsheetFormat;
pub use synthesize::{ScheduleIndex, synthesize};
pub use table::{OutputRow, OutputTable};
