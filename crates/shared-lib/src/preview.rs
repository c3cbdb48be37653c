//! 预览图地址
//!
//! 没有手动设置预览图时，用截图服务根据项目地址实时生成一张。

/// 截图服务地址前缀
pub const SCREENSHOT_SERVICE: &str = "https://s0.wp.com/mshots/v1/";

/// 返回最终展示用的预览图地址
pub fn effective_preview(preview: Option<&str>, url: &str) -> String {
    match preview.map(str::trim).filter(|p| !p.is_empty()) {
        Some(preview) => preview.to_string(),
        None => format!("{SCREENSHOT_SERVICE}{}?w=600&h=400", urlencoding::encode(url)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_preview_wins() {
        assert_eq!(
            effective_preview(Some("https://cdn.example.com/a.png"), "https://example.com"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_falls_back_to_screenshot_service() {
        assert_eq!(
            effective_preview(None, "https://example.com/a?b=c"),
            "https://s0.wp.com/mshots/v1/https%3A%2F%2Fexample.com%2Fa%3Fb%3Dc?w=600&h=400"
        );
        assert_eq!(
            effective_preview(Some("  "), "https://x.dev"),
            "https://s0.wp.com/mshots/v1/https%3A%2F%2Fx.dev?w=600&h=400"
        );
    }
}
