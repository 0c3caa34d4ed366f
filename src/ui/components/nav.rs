use crate::ui::Theme;
use ratatui::text::{Line, Span};

/// Footer of `[key]Label` pairs
pub fn nav_line<'a>(bindings: &[(&'a str, &'a str)]) -> Line<'a> {
    let spans: Vec<Span<'a>> = bindings
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!("[{}]", key), Theme::nav_key()),
                Span::styled(format!("{} ", label), Theme::nav_label()),
            ]
        })
        .collect();
    Line::from(spans)
}

pub fn status_line(message: Option<&str>) -> Line<'_> {
    match message {
        Some(msg) => Line::from(Span::styled(msg, Theme::highlight())),
        None => Line::from(Span::styled("Ready", Theme::dim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_line_renders_pairs() {
        let line = nav_line(&[("g", "Generate"), ("q", "Quit")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[g]Generate [q]Quit ");
    }
}
