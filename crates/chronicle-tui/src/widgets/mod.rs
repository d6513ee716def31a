mod era_detail;
mod favorites;
mod history;
mod status_bar;
mod timeline_strip;

pub use era_detail::EraDetailWidget;
pub use favorites::FavoritesWidget;
pub use history::HistoryWidget;
pub use status_bar::StatusBarWidget;
pub use timeline_strip::TimelineStripWidget;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap text respecting unicode character widths (CJK = 2 columns)
pub(crate) fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();
    let max_width = max_width.max(1);

    for paragraph in text.lines() {
        if paragraph.is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_width = 0;

        for ch in paragraph.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);

            if current_width + ch_width > max_width && !current_line.is_empty() {
                result.push(std::mem::take(&mut current_line));
                current_width = 0;
            }

            current_line.push(ch);
            current_width += ch_width;
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }

    result
}

/// Cut `text` to at most `max_width` columns, marking the cut with `…`
pub(crate) fn truncate(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > budget {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    if max_width > 0 {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_counts_wide_chars() {
        assert_eq!(wrap_text("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_text("仙逆编年", 5), vec!["仙逆", "编年"]);
        assert_eq!(wrap_text("a\n\nb", 4), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", 4), vec![""]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 8), "a longe…");
        assert_eq!(truncate("仙逆编年史", 5), "仙逆…");
        assert_eq!(truncate("abc", 0), "");
    }
}
