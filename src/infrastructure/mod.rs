pub mod dom;
pub mod http_executor;

pub use dom::{Cursor, ElementId, ItemElement, ItemSpec, ListContainer};
pub use http_executor::HttpExecutor;
