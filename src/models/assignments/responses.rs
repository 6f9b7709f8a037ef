use serde::{Deserialize, Serialize};

use super::entities::{Assignment, Submission};

/// 作业详情：作业本身与调用者可见的提交
///
/// 班级教师看到全部提交，其他用户只看到自己的。
#[derive(Debug, Serialize, Deserialize)]
pub struct AssignmentDetailResponse {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub submissions: Vec<Submission>,
}
