/// 转义自由文本中的花括号，防止其被下游的提示词模板系统误认为占位符
pub fn escape_curly_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}
