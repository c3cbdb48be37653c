//! 拖拽重排的客户端状态
//!
//! 客户端保存一份最近一次拉取的项目列表，拖拽放下后：
//!
//! 1. 按数组移动语义更新本地顺序（乐观更新，先于服务端确认）
//! 2. 把完整的 id 序列作为重排提交发给服务端
//! 3. 提交失败时调用 [`ProjectBoard::reconcile`]，用重新拉取的权威列表覆盖本地顺序

use crate::ranking::Ranked;

#[derive(Debug, Clone, Default)]
pub struct ProjectBoard<T> {
    items: Vec<T>,
}

impl<T: Ranked> ProjectBoard<T> {
    /// 用一次完整拉取的结果初始化
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 当前本地顺序对应的 id 序列
    pub fn ordered_ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id().to_string()).collect()
    }

    /// 处理一次放下事件
    ///
    /// 将 `from` 位置的元素移到 `to` 位置，其余元素相对顺序不变。
    /// 位置没有变化或下标越界时不做任何事并返回 `None`，否则返回需要提交的完整 id 序列。
    pub fn move_item(&mut self, from: usize, to: usize) -> Option<Vec<String>> {
        if from == to || from >= self.items.len() || to >= self.items.len() {
            return None;
        }

        let item = self.items.remove(from);
        self.items.insert(to, item);

        Some(self.ordered_ids())
    }

    /// 按 id 移动，拖拽库通常给出的是被拖动项和目标项的 id
    pub fn move_by_id(&mut self, active: &str, over: &str) -> Option<Vec<String>> {
        let from = self.position(active)?;
        let to = self.position(over)?;
        self.move_item(from, to)
    }

    /// 用服务端的权威列表替换本地顺序
    pub fn reconcile(&mut self, canonical: Vec<T>) {
        self.items = canonical;
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}
