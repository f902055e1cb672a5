/// 阶段结果的标签联合。"从不向上传播、总是退化"的策略在类型层面成立：
/// 退化分支仍携带一份完整、结构良好的更新。
#[derive(Debug, Clone)]
pub enum StageOutcome<T> {
    Success(T),
    Degraded { value: T, cause: String },
}

impl<T> StageOutcome<T> {
    pub fn degraded(value: T, cause: impl Into<String>) -> Self {
        StageOutcome::Degraded {
            value,
            cause: cause.into(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, StageOutcome::Degraded { .. })
    }

    pub fn cause(&self) -> Option<&str> {
        match self {
            StageOutcome::Success(_) => None,
            StageOutcome::Degraded { cause, .. } => Some(cause),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            StageOutcome::Success(value) => value,
            StageOutcome::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            StageOutcome::Success(value) => value,
            StageOutcome::Degraded { value, .. } => value,
        }
    }
}
