//! 班级邀请码生成
//!
//! 存在性检查与插入冲突重试共用一份尝试预算，候选码总数不超过
//! `classes.code_max_attempts`，耗尽时返回 `Conflict`。

use std::sync::Arc;
use tracing::warn;

use crate::errors::{ClassHubError, Result};
use crate::storage::Storage;

/// 邀请码长度
pub const CLASS_CODE_LENGTH: usize = 6;

/// 邀请码尝试预算
#[derive(Debug, Clone, Copy)]
pub struct AttemptBudget {
    max: usize,
    used: usize,
}

impl AttemptBudget {
    pub fn new(max: usize) -> Self {
        Self { max, used: 0 }
    }

    /// 消耗一次尝试，返回本次的序号；预算耗尽时返回 None
    fn take(&mut self) -> Option<usize> {
        if self.used >= self.max {
            return None;
        }
        self.used += 1;
        Some(self.used)
    }

    pub fn used(&self) -> usize {
        self.used
    }

    fn exhausted(&self) -> ClassHubError {
        ClassHubError::conflict(format!(
            "Unable to generate a unique class code after {} attempts",
            self.max
        ))
    }
}

/// 从候选来源中取下一个未被占用的邀请码
///
/// 只读存储；在真正插入前邀请码并未被保留。
pub async fn generate_unique_code<F>(
    storage: &Arc<dyn Storage>,
    budget: &mut AttemptBudget,
    candidate: &mut F,
) -> Result<String>
where
    F: FnMut() -> String,
{
    while let Some(attempt) = budget.take() {
        let code = candidate();
        if !storage.class_code_exists(&code).await? {
            return Ok(code);
        }
        warn!("Class code collision on attempt {}: {}", attempt, code);
    }

    Err(budget.exhausted())
}
