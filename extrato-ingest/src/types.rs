use serde::Serialize;

/// Text of one document page, 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageText {
    pub number: usize,
    pub text: String,
}

/// Marker placed before every page's text in the joined document.
pub fn page_marker(number: usize) -> String {
    format!("\n--- PÁGINA {number} ---\n")
}

/// Join pages into one text blob. Blank pages are dropped.
pub fn join_pages(pages: &[PageText]) -> String {
    let mut out = String::new();
    for page in pages.iter().filter(|p| !p.text.trim().is_empty()) {
        out.push_str(&page_marker(page.number));
        out.push_str(&page.text);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_skips_blank_pages() {
        let pages = vec![
            PageText { number: 1, text: "10/01/2024 PIX 10,00 D".to_string() },
            PageText { number: 2, text: "   \n ".to_string() },
            PageText { number: 3, text: "11/01/2024 TED 20,00 C".to_string() },
        ];
        let text = join_pages(&pages);
        assert!(text.contains("--- PÁGINA 1 ---"));
        assert!(!text.contains("--- PÁGINA 2 ---"));
        assert!(text.contains("--- PÁGINA 3 ---\n11/01/2024 TED 20,00 C\n"));
    }

    #[test]
    fn test_join_no_pages_is_empty() {
        assert!(join_pages(&[]).is_empty());
    }
}
