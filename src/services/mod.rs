pub mod drag_reorder;
pub mod image_descriptions;
pub mod list_renderer;
pub mod message_service;
pub mod report_renderer;
pub mod session;
pub mod status_board;
pub mod submission;
pub mod upload_panel;
pub mod upload_set;

pub use drag_reorder::{DragEvent, DragOutcome, DragPhase, DragReorderController, DragSession};
pub use image_descriptions::{ImageDescriptionEditor, ImageThumb};
pub use list_renderer::ListRenderer;
pub use message_service::MessageService;
pub use report_renderer::{MarkdownPipeline, ReportRenderer};
pub use session::{SessionContext, SubmitControl};
pub use status_board::{StatusBoard, StatusKind, StatusMessage};
pub use submission::{PartValue, SubmissionAssembler, SubmissionPayload, ValidationError};
pub use upload_panel::UploadPanel;
pub use upload_set::{UploadRejection, UploadSet};
