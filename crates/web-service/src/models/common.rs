use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 封装符合json-api的单个返回对象
///
/// 具体参考：<https://jsonapi.org>
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct Reply<T> {
    pub data: T,
}

/// 封装符合json-api的列表对象
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ReplyList<T> {
    pub data: Vec<T>,

    #[schema(example = 12)]
    /// 列表总数
    pub total: u32,
}

impl<T> ReplyList<T> {
    pub fn new(data: Vec<T>) -> Self {
        let total = u32::try_from(data.len()).unwrap_or(u32::MAX);
        Self { data, total }
    }
}

/// 不返回数据的操作结果
#[derive(Deserialize, Debug, ToSchema, Serialize, PartialEq, Eq)]
pub struct Success {
    #[schema(example = true)]
    pub success: bool,
}

impl Success {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
