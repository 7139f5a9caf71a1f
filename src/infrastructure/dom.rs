//! 页面元素模型 - 基础设施层
//!
//! 以内存结构表示页面上的文件列表容器及其子元素。
//! 元素只能整体销毁重建，每次重建都会分配新的元素 ID 并递增容器代数，
//! 因此旧元素的 ID 在重建后不会再被解析到任何元素。

use std::collections::BTreeSet;
use std::fmt;

use crate::models::EntryId;

/// 元素标识（在同一容器内单调递增，永不复用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el-{}", self.0)
    }
}

/// 鼠标样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Grab,
    Grabbing,
}

/// 列表中的一个文件元素
#[derive(Debug, Clone)]
pub struct ItemElement {
    id: ElementId,
    entry_id: EntryId,
    /// 删除按钮对应的文件名
    remove_target: String,
    label: String,
    has_grip: bool,
    draggable: bool,
    cursor: Cursor,
    opacity: f32,
    classes: BTreeSet<&'static str>,
}

impl ItemElement {
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn entry_id(&self) -> EntryId {
        self.entry_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn remove_target(&self) -> &str {
        &self.remove_target
    }

    pub fn has_grip(&self) -> bool {
        self.has_grip
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &'static str) {
        self.classes.insert(class);
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }
}

/// 新建元素的描述
#[derive(Debug, Clone)]
pub struct ItemSpec {
    pub entry_id: EntryId,
    pub remove_target: String,
    pub label: String,
    pub has_grip: bool,
}

/// 列表容器
#[derive(Debug)]
pub struct ListContainer {
    dom_id: String,
    children: Vec<ItemElement>,
    generation: u64,
    next_element: u64,
}

impl ListContainer {
    pub fn new(dom_id: impl Into<String>) -> Self {
        Self {
            dom_id: dom_id.into(),
            children: Vec::new(),
            generation: 0,
            next_element: 0,
        }
    }

    pub fn dom_id(&self) -> &str {
        &self.dom_id
    }

    /// 重建次数
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 销毁全部子元素
    pub fn clear(&mut self) {
        self.children.clear();
        self.generation += 1;
    }

    /// 追加一个新元素
    pub fn append(&mut self, spec: ItemSpec) -> ElementId {
        self.next_element += 1;
        let id = ElementId(self.next_element);
        let mut classes = BTreeSet::new();
        classes.insert("uploaded-file-item");
        self.children.push(ItemElement {
            id,
            entry_id: spec.entry_id,
            remove_target: spec.remove_target,
            label: spec.label,
            has_grip: spec.has_grip,
            draggable: false,
            cursor: Cursor::Default,
            opacity: 1.0,
            classes,
        });
        id
    }

    pub fn children(&self) -> &[ItemElement] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// 元素当前所在位置；已销毁的元素返回 None
    pub fn position_of(&self, id: ElementId) -> Option<usize> {
        self.children.iter().position(|c| c.id == id)
    }

    pub fn element(&self, id: ElementId) -> Option<&ItemElement> {
        self.children.iter().find(|c| c.id == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut ItemElement> {
        self.children.iter_mut().find(|c| c.id == id)
    }

    pub fn element_at(&self, index: usize) -> Option<&ItemElement> {
        self.children.get(index)
    }

    /// 按顺序列出元素对应的文件 ID
    pub fn entry_ids(&self) -> Vec<EntryId> {
        self.children.iter().map(|c| c.entry_id).collect()
    }

    /// 清除所有元素上的某个样式类
    pub fn remove_class_everywhere(&mut self, class: &str) {
        for child in &mut self.children {
            child.classes.remove(class);
        }
    }
}
