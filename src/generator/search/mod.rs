//! 搜索阶段 - 单次搜索执行与批量并发编排

pub mod executor;
pub mod orchestrator;

pub use executor::execute_single_search;
pub use orchestrator::SearchOrchestrator;
