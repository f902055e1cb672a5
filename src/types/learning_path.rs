use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 学习路径中的单个课程模块
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Module {
    /// 清晰、描述性的模块标题
    pub title: String,
    /// 模块概述（100-200词）
    pub overview: String,
    /// 3-5个关键学习目标
    pub learning_objectives: Vec<String>,
    /// 该模块在整个学习旅程中的重要性说明
    pub importance: String,
}

/// 路径合成阶段的结构化输出
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ModulePlan {
    /// 按学习顺序排列的课程模块，每个模块建立在之前的知识之上
    pub modules: Vec<Module>,
}

/// 学习路径元信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathMetadata {
    /// 生成时间（ISO 8601）
    pub generated_at: String,
    /// 最终模块数量
    pub num_modules: usize,
}

/// 管线的最终产物。即使合成失败也始终存在，此时模块列表为空。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPath {
    pub topic: String,
    pub modules: Vec<Module>,
    pub metadata: PathMetadata,
}

impl LearningPath {
    pub fn new(topic: impl Into<String>, modules: Vec<Module>) -> Self {
        let num_modules = modules.len();
        Self {
            topic: topic.into(),
            modules,
            metadata: PathMetadata {
                generated_at: Utc::now().to_rfc3339(),
                num_modules,
            },
        }
    }

    /// 失败或无输入路径上的空模块哨兵
    pub fn empty(topic: impl Into<String>) -> Self {
        Self::new(topic, Vec::new())
    }
}
