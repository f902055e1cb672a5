use anyhow::Result;
use async_trait::async_trait;

use crate::types::learning_path::ModulePlan;
use crate::types::search::SearchQueryPlan;

/// 搜索端口 - 对外部搜索服务的单次查询调用
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// 执行一次搜索，返回原始响应文本
    async fn search(&self, keywords: &str) -> Result<String>;
}

/// 语言模型端口 - 管线消费的两种结构化生成调用
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// 从主题分析提示词中提取搜索查询计划
    async fn extract_query_plan(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<SearchQueryPlan>;

    /// 从合成提示词中提取课程模块计划
    async fn extract_module_plan(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ModulePlan>;

    /// 启动时的连通性预检，失败不应中断管线
    async fn check_connection(&self) -> Result<()> {
        Ok(())
    }
}

/// 进度通知端口 - 可选的观测钩子，不参与控制流
#[async_trait]
pub trait ProgressNotifier: Send + Sync {
    async fn notify(&self, message: &str);
}

/// 空通知器，通知缺席时的等价替身
pub struct NoopNotifier;

#[async_trait]
impl ProgressNotifier for NoopNotifier {
    async fn notify(&self, _message: &str) {}
}
