use crate::generator::ports::SearchProvider;
use crate::types::search::{SearchQuery, SearchResult};

/// 执行单次搜索。对调用方从不失败：网络、鉴权、响应异常
/// 一律转化为携带错误标记的退化结果。
pub async fn execute_single_search(
    search: &dyn SearchProvider,
    query: &SearchQuery,
) -> SearchResult {
    println!("🔍 搜索: {}", query.keywords);

    match search.search(&query.keywords).await {
        Ok(content) => SearchResult::succeeded(
            query.keywords.clone(),
            Some(query.rationale.clone()),
            content,
        ),
        Err(e) => {
            eprintln!("❌ 搜索 '{}' 失败: {}", query.keywords, e);
            SearchResult::degraded(
                query.keywords.clone(),
                Some(query.rationale.clone()),
                format!("Error performing search: {}", e),
            )
        }
    }
}
