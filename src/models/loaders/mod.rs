pub mod toml_loader;

pub use toml_loader::{load_report_job, parse_report_job, DragMove, JobFiles, ReportJob};
