//! 文件列表渲染
//!
//! 把某个分类的文件序列画成列表元素，一个文件一个元素，顺序一致。

use crate::infrastructure::{ItemSpec, ListContainer};
use crate::models::{Category, FileEntry};

/// 资料文件的拖拽提示
const DRAG_HINT: &str = " (可拖拽调整顺序)";

pub struct ListRenderer;

impl ListRenderer {
    /// 销毁容器内全部元素并按序重建
    ///
    /// 只负责画，拖拽绑定由 `UploadPanel::render` 紧接着完成
    pub(crate) fn rebuild(list: &mut ListContainer, category: Category, entries: &[FileEntry]) {
        list.clear();
        for entry in entries {
            list.append(Self::item_spec(category, entry));
        }
    }

    fn item_spec(category: Category, entry: &FileEntry) -> ItemSpec {
        let reorderable = category.is_reorderable();
        let label = if reorderable {
            format!("{}{}", entry.name, DRAG_HINT)
        } else {
            entry.name.clone()
        };
        ItemSpec {
            entry_id: entry.id,
            remove_target: entry.name.clone(),
            label,
            has_grip: reorderable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryId;

    fn entry(id: u64, name: &str) -> FileEntry {
        FileEntry {
            id: EntryId(id),
            name: name.to_string(),
            content: Vec::new(),
            size: 0,
            extension: "md".to_string(),
            mime: "text/markdown",
        }
    }

    #[test]
    fn test_rebuild_matches_entries() {
        let mut list = ListContainer::new(Category::Data.list_id());
        let entries = vec![entry(1, "a.md"), entry(2, "b.md")];

        ListRenderer::rebuild(&mut list, Category::Data, &entries);
        assert_eq!(list.entry_ids(), vec![EntryId(1), EntryId(2)]);
        assert_eq!(list.children()[0].label(), "a.md (可拖拽调整顺序)");
        assert!(list.children()[0].has_grip());

        ListRenderer::rebuild(&mut list, Category::Data, &entries[1..]);
        assert_eq!(list.entry_ids(), vec![EntryId(2)]);
    }

    #[test]
    fn test_template_items_have_no_drag_affordance() {
        let mut list = ListContainer::new(Category::Cover.list_id());
        ListRenderer::rebuild(&mut list, Category::Cover, &[entry(1, "cover.docx")]);
        let item = &list.children()[0];
        assert_eq!(item.label(), "cover.docx");
        assert!(!item.has_grip());
        assert_eq!(item.remove_target(), "cover.docx");
    }
}
