//! 项目排序规则
//!
//! 每个项目带有一个整数 `rank`，展示顺序按 `rank` 升序，`rank` 相同时按创建时间倒序。
//!
//! - 新建项目：`rank = 当前最大 rank + 1`，集合为空时为 1，总是排在最后
//! - 重排提交：按提交序列的下标（从 0 开始）重写每个项目的 `rank`
//!
//! `rank` 只是排序提示，不要求唯一，也不要求连续。

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;

/// 可参与展示排序的记录
pub trait Ranked {
    fn id(&self) -> &str;
    fn rank(&self) -> i32;
    fn created_at(&self) -> DateTime<Utc>;
}

/// 计算新建项目的 rank
///
/// 不会尝试填补空洞，只是追加到当前顺序的末尾。
pub fn next_rank<I>(existing: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    existing.into_iter().max().unwrap_or(0).saturating_add(1)
}

/// 将有序的 id 序列转换为 `(id, rank)` 列表
///
/// 同一个 id 出现多次时以最后一次出现的位置为准，与逐条顺序更新的结果一致。
/// 返回结果保持 id 首次出现的顺序。
pub fn assign_positions<S: AsRef<str>>(ids: &[S]) -> Vec<(String, i32)> {
    let mut positions: Vec<(String, i32)> = Vec::with_capacity(ids.len());
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(ids.len());

    for (position, id) in ids.iter().enumerate() {
        let id = id.as_ref();
        let rank = i32::try_from(position).unwrap_or(i32::MAX);
        match seen.get(id) {
            Some(&slot) => positions[slot].1 = rank,
            None => {
                seen.insert(id, positions.len());
                positions.push((id.to_string(), rank));
            }
        }
    }

    positions
}

/// 展示顺序比较：rank 升序，创建时间倒序，最后按 id 升序保证结果稳定
pub fn compare_display_order<T: Ranked>(a: &T, b: &T) -> Ordering {
    a.rank()
        .cmp(&b.rank())
        .then_with(|| b.created_at().cmp(&a.created_at()))
        .then_with(|| a.id().cmp(b.id()))
}

/// 原地按展示顺序排序
pub fn sort_for_display<T: Ranked>(items: &mut [T]) {
    items.sort_by(|a, b| compare_display_order(a, b));
}
