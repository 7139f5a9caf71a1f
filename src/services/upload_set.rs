//! 上传队列 - 业务能力层
//!
//! 每个分类一个有序文件序列。只有资料文件的顺序有业务含义。

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::models::file_entry::extension_of;
use crate::models::{Category, EntryId, FileEntry, SelectedFile};
use crate::utils::format_file_size;

/// 文件被拒绝加入队列的原因（文本即用户看到的提示）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("不支持的文件类型: {name}")]
    UnsupportedType { name: String },
    #[error("文件过大: {name}")]
    TooLarge { name: String, size: u64, limit: u64 },
}

/// 上传队列
#[derive(Debug)]
pub struct UploadSet {
    entries: BTreeMap<Category, Vec<FileEntry>>,
    max_file_size: u64,
    next_id: u64,
}

impl UploadSet {
    pub fn new(max_file_size: u64) -> Self {
        let entries = Category::ALL.iter().map(|&c| (c, Vec::new())).collect();
        Self {
            entries,
            max_file_size,
            next_id: 0,
        }
    }

    /// 校验并追加到分类末尾
    pub fn add(&mut self, category: Category, file: SelectedFile) -> Result<EntryId, UploadRejection> {
        let extension = match file.extension() {
            Some(ext) if category.allows_extension(&ext) => ext,
            _ => return Err(UploadRejection::UnsupportedType { name: file.name }),
        };

        let size = file.size();
        if size > self.max_file_size {
            debug!(
                "{} 超过大小上限: {} > {}",
                file.name,
                format_file_size(size),
                format_file_size(self.max_file_size)
            );
            return Err(UploadRejection::TooLarge {
                name: file.name,
                size,
                limit: self.max_file_size,
            });
        }

        self.next_id += 1;
        let id = EntryId(self.next_id);
        debug!("加入{}: {} ({})", category.name(), file.name, id);
        self.sequence_mut(category)
            .push(FileEntry::from_selected(id, file, extension));
        Ok(id)
    }

    /// 删除分类中所有同名文件，返回删除数量
    pub fn remove(&mut self, category: Category, name: &str) -> usize {
        let sequence = self.sequence_mut(category);
        let before = sequence.len();
        sequence.retain(|entry| entry.name != name);
        before - sequence.len()
    }

    /// 把 `from` 位置的文件移动到 `to`
    ///
    /// 位置相同或越界时不做任何修改，返回 false
    pub fn reorder(&mut self, category: Category, from: usize, to: usize) -> bool {
        let sequence = self.sequence_mut(category);
        if from == to || from >= sequence.len() || to >= sequence.len() {
            return false;
        }
        let moved = sequence.remove(from);
        sequence.insert(to, moved);
        true
    }

    /// 当前顺序下的文件名（可重复遍历）
    pub fn order(&self, category: Category) -> impl Iterator<Item = &str> + Clone + '_ {
        self.entries(category).iter().map(|entry| entry.name.as_str())
    }

    pub fn entries(&self, category: Category) -> &[FileEntry] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self, category: Category) -> usize {
        self.entries(category).len()
    }

    pub fn is_empty(&self, category: Category) -> bool {
        self.entries(category).is_empty()
    }

    fn sequence_mut(&mut self, category: Category) -> &mut Vec<FileEntry> {
        self.entries.entry(category).or_default()
    }
}
