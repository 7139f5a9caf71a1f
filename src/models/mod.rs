pub mod category;
pub mod file_entry;
pub mod form;
pub mod loaders;
pub mod report;

pub use category::Category;
pub use file_entry::{EntryId, FileEntry, SelectedFile};
pub use form::{GenerationMode, ReportForm, TemplateSelection};
pub use loaders::{load_report_job, DragMove, ReportJob};
pub use report::{
    GenerateReportResponse, ReportImage, SendMessageResponse, TemplateFiles, UserProfile,
    UserRecord,
};
