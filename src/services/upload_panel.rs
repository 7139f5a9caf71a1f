//! 上传面板 - 业务能力层
//!
//! 持有上传队列和三个列表容器。`render` 是唯一的重绘入口：
//! 先按队列重建列表，再为可排序分类重新绑定拖拽处理器，两步不可拆开调用。

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::infrastructure::ListContainer;
use crate::models::{Category, EntryId, SelectedFile};
use crate::services::drag_reorder::{DragEvent, DragOutcome, DragReorderController};
use crate::services::list_renderer::ListRenderer;
use crate::services::status_board::StatusBoard;
use crate::services::upload_set::UploadSet;

/// 单个分类的视图
#[derive(Debug)]
struct CategoryView {
    list: ListContainer,
    /// 只有可排序分类才有
    reorder: Option<DragReorderController>,
}

/// 上传面板
#[derive(Debug)]
pub struct UploadPanel {
    uploads: UploadSet,
    views: BTreeMap<Category, CategoryView>,
}

impl UploadPanel {
    pub fn new(max_file_size: u64) -> Self {
        let views = Category::ALL
            .iter()
            .map(|&category| {
                let view = CategoryView {
                    list: ListContainer::new(category.list_id()),
                    reorder: category
                        .is_reorderable()
                        .then(DragReorderController::new),
                };
                (category, view)
            })
            .collect();

        let mut panel = Self {
            uploads: UploadSet::new(max_file_size),
            views,
        };
        for category in Category::ALL {
            panel.render(category);
        }
        panel
    }

    /// 选择或拖入文件
    ///
    /// 不合规的文件逐个提示并跳过，其余照常加入。有文件加入时重绘一次。
    pub fn add_files(
        &mut self,
        category: Category,
        files: Vec<SelectedFile>,
        status: &mut StatusBoard,
    ) -> Vec<EntryId> {
        let mut added = Vec::new();
        for file in files {
            match self.uploads.add(category, file) {
                Ok(id) => added.push(id),
                Err(rejection) => status.show_error(rejection.to_string()),
            }
        }

        if !added.is_empty() {
            info!("✓ {} 新增 {} 个文件", category.name(), added.len());
            self.render(category);
        }
        added
    }

    /// 删除同名文件（全部匹配项）
    pub fn remove_file(&mut self, category: Category, name: &str) -> usize {
        let removed = self.uploads.remove(category, name);
        if removed > 0 {
            debug!("{} 删除 {} 个同名文件: {}", category.name(), removed, name);
            self.render(category);
        }
        removed
    }

    /// 直接调整顺序；位置相同或越界时不重绘
    pub fn reorder(&mut self, category: Category, from: usize, to: usize) -> bool {
        if !self.uploads.reorder(category, from, to) {
            return false;
        }
        self.render(category);
        true
    }

    /// 把拖拽事件交给对应分类的控制器
    pub fn dispatch_drag(&mut self, category: Category, event: DragEvent) -> DragOutcome {
        let Some(view) = self.views.get_mut(&category) else {
            return DragOutcome::Unbound;
        };
        let Some(controller) = view.reorder.as_mut() else {
            return DragOutcome::Unbound;
        };

        let outcome = controller.handle(&mut view.list, event);
        if let DragOutcome::Reorder { from, to } = outcome {
            if self.reorder(category, from, to) {
                debug!(
                    "文件顺序已更新: {:?}",
                    self.uploads.order(category).collect::<Vec<_>>()
                );
            }
        }
        outcome
    }

    /// 重绘分类列表并重新绑定拖拽
    pub fn render(&mut self, category: Category) {
        let Some(view) = self.views.get_mut(&category) else {
            return;
        };
        if let Some(controller) = view.reorder.as_mut() {
            controller.cancel(&mut view.list);
        }
        ListRenderer::rebuild(&mut view.list, category, self.uploads.entries(category));
        if let Some(controller) = view.reorder.as_mut() {
            controller.install(&mut view.list);
        }
    }

    pub fn uploads(&self) -> &UploadSet {
        &self.uploads
    }

    pub fn list(&self, category: Category) -> Option<&ListContainer> {
        self.views.get(&category).map(|v| &v.list)
    }

    pub fn controller(&self, category: Category) -> Option<&DragReorderController> {
        self.views.get(&category).and_then(|v| v.reorder.as_ref())
    }
}
