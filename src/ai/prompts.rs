//! Prompt templates for the improvement oracle

/// System instruction sent with every completion request.
///
/// Asks the model to rewrite the request into a clear, structured prompt in
/// the same language, with no commentary and no Markdown.
pub const SYSTEM_PROMPT: &str = "Ты — эксперт по улучшению промптов. \
Преобразуй пользовательский запрос в чёткий, структурированный промпт. \
Сохраняй язык исходного запроса. Не добавляй объяснений и комментариев. \
Выводи только готовый промпт без Markdown.";

/// Wrap the raw prompt into the user turn
pub fn user_message(prompt: &str) -> String {
    format!("Исходный запрос:\n{prompt}")
}
