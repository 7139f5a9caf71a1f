//! 拖拽排序控制器 - 业务能力层
//!
//! 状态机：`Idle → Dragging → (Dropped | Cancelled) → Idle`
//!
//! 控制器只负责解释拖拽事件并给出排序决定，不直接修改上传队列。
//! 每次列表重建后由 [`UploadPanel`](crate::services::UploadPanel) 调用 [`install`](DragReorderController::install)
//! 重新绑定，旧元素上的绑定随之全部丢弃。

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::infrastructure::{Cursor, ElementId, ListContainer};

const DRAGGING_CLASS: &str = "dragging";
const DRAG_OVER_CLASS: &str = "drag-over";

/// 拖拽事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// 开始拖拽某个元素
    Start(ElementId),
    /// 拖拽经过某个元素
    Over(ElementId),
    /// 离开某个元素
    Leave(ElementId),
    /// 在某个元素上松开
    Drop(ElementId),
    /// 源元素的拖拽结束（无论是否放下）
    End(ElementId),
}

impl DragEvent {
    pub fn target(self) -> ElementId {
        match self {
            DragEvent::Start(id)
            | DragEvent::Over(id)
            | DragEvent::Leave(id)
            | DragEvent::Drop(id)
            | DragEvent::End(id) => id,
        }
    }
}

/// 当前阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// 事件处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// 目标元素没有绑定（已销毁或不属于本列表）
    Unbound,
    /// 进入拖拽状态
    Started { source: usize },
    /// 只改变了高亮
    Highlight,
    /// 放下且需要排序，控制器已回到 Idle
    Reorder { from: usize, to: usize },
    /// 放在自身或没有活动会话，仅清除高亮
    NoOp,
    /// 没有放下就结束，会话已清除
    Cancelled,
}

/// 一次拖拽会话
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub source_index: usize,
    pub source_element: ElementId,
    /// 会话开始时的列表代数
    pub generation: u64,
}

/// 拖拽排序控制器
#[derive(Debug, Default)]
pub struct DragReorderController {
    /// 元素 → 绑定时的位置；每个元素恰好一组处理器
    bindings: HashMap<ElementId, usize>,
    bound_generation: u64,
    session: Option<DragSession>,
}

impl DragReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为当前列表中的全部元素重新绑定
    ///
    /// 旧绑定整体丢弃，活动会话一并清除
    pub(crate) fn install(&mut self, list: &mut ListContainer) {
        if let Some(session) = self.session.take() {
            debug!("列表重建，丢弃拖拽会话: {:?}", session);
        }
        self.bindings.clear();
        self.bound_generation = list.generation();

        let ids: Vec<ElementId> = list.children().iter().map(|c| c.id()).collect();
        for (index, id) in ids.into_iter().enumerate() {
            if let Some(item) = list.element_mut(id) {
                item.set_draggable(true);
                item.set_cursor(Cursor::Grab);
            }
            self.bindings.insert(id, index);
        }

        debug!(
            "拖拽排序已启用: {} ({} 个文件)",
            list.dom_id(),
            self.bindings.len()
        );
    }

    /// 处理一个拖拽事件
    pub fn handle(&mut self, list: &mut ListContainer, event: DragEvent) -> DragOutcome {
        let target = event.target();
        let Some(&index) = self.bindings.get(&target) else {
            debug!("忽略未绑定元素上的事件: {:?}", event);
            return DragOutcome::Unbound;
        };

        match event {
            DragEvent::Start(_) => self.on_start(list, target, index),
            DragEvent::Over(_) => {
                if let Some(session) = self.session {
                    if session.source_element != target {
                        if let Some(item) = list.element_mut(target) {
                            item.add_class(DRAG_OVER_CLASS);
                        }
                    }
                }
                DragOutcome::Highlight
            }
            DragEvent::Leave(_) => {
                if let Some(item) = list.element_mut(target) {
                    item.remove_class(DRAG_OVER_CLASS);
                }
                DragOutcome::Highlight
            }
            DragEvent::Drop(_) => self.on_drop(list, target, index),
            DragEvent::End(_) => {
                reset_source_visuals(list, target);
                match self.session.take() {
                    Some(_) => {
                        list.remove_class_everywhere(DRAG_OVER_CLASS);
                        debug!("拖拽未放下，已取消");
                        DragOutcome::Cancelled
                    }
                    None => DragOutcome::NoOp,
                }
            }
        }
    }

    /// 清除活动会话（非拖拽途径修改列表前调用）
    pub fn cancel(&mut self, list: &mut ListContainer) {
        if let Some(session) = self.session.take() {
            reset_source_visuals(list, session.source_element);
            list.remove_class_everywhere(DRAG_OVER_CLASS);
            debug!("拖拽会话已取消");
        }
    }

    pub fn phase(&self) -> DragPhase {
        if self.session.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// 当前绑定的处理器组数量
    pub fn bound_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_bound(&self, id: ElementId) -> bool {
        self.bindings.contains_key(&id)
    }

    fn on_start(&mut self, list: &mut ListContainer, target: ElementId, index: usize) -> DragOutcome {
        if let Some(stale) = self.session.take() {
            warn!("⚠️ 上一次拖拽会话未清除，已重置: {:?}", stale);
            reset_source_visuals(list, stale.source_element);
        }

        if let Some(item) = list.element_mut(target) {
            item.add_class(DRAGGING_CLASS);
            item.set_cursor(Cursor::Grabbing);
            item.set_opacity(0.5);
            debug!("开始拖拽文件: {}", item.label());
        }

        self.session = Some(DragSession {
            source_index: index,
            source_element: target,
            generation: self.bound_generation,
        });
        DragOutcome::Started { source: index }
    }

    fn on_drop(&mut self, list: &mut ListContainer, target: ElementId, index: usize) -> DragOutcome {
        if let Some(item) = list.element_mut(target) {
            item.remove_class(DRAG_OVER_CLASS);
        }

        let Some(session) = self.session.take() else {
            return DragOutcome::NoOp;
        };
        reset_source_visuals(list, session.source_element);

        if session.generation != list.generation() {
            warn!("⚠️ 列表已变化，丢弃过期的拖拽会话");
            return DragOutcome::NoOp;
        }
        if session.source_index == index {
            return DragOutcome::NoOp;
        }

        info!("交换文件位置: {} -> {}", session.source_index, index);
        DragOutcome::Reorder {
            from: session.source_index,
            to: index,
        }
    }
}

fn reset_source_visuals(list: &mut ListContainer, id: ElementId) {
    if let Some(item) = list.element_mut(id) {
        item.remove_class(DRAGGING_CLASS);
        item.set_cursor(Cursor::Grab);
        item.set_opacity(1.0);
    }
}
