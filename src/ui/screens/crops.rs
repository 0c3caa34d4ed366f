use crate::models::{CropSuitabilityEntry, SoilType};
use crate::ui::components::{nav_line, status_line};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct CropsScreen<'a> {
    pub entries: &'a [CropSuitabilityEntry],
    pub soil_type: Option<SoilType>,
    pub selected_index: usize,
    pub status: Option<&'a str>,
}

impl<'a> CropsScreen<'a> {
    pub fn new(entries: &'a [CropSuitabilityEntry], soil_type: Option<SoilType>) -> Self {
        Self {
            entries,
            soil_type,
            selected_index: 0,
            status: None,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }
}

impl Widget for CropsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let soil = self
            .soil_type
            .map(|s| s.as_str())
            .unwrap_or("no soil selected");
        let title = Line::from(vec![
            Span::styled("Crop Suitability", Theme::title()),
            Span::styled(format!(" - {}", soil), Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        self.render_list(content[0], buf);
        self.render_details(content[1], buf);

        Paragraph::new(status_line(self.status)).render(chunks[2], buf);
        Paragraph::new(nav_line(&[
            ("↑↓", "Navigate"),
            ("r", "Refresh"),
            ("1-3", "Screens"),
            ("q", "Quit"),
        ]))
        .render(chunks[3], buf);
    }
}

impl CropsScreen<'_> {
    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Recommended")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.entries.is_empty() {
            Paragraph::new(Span::styled(
                "No specific recommendations for these conditions",
                Theme::dim(),
            ))
            .wrap(Wrap { trim: true })
            .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };

                let line = Line::from(vec![
                    Span::styled(format!("{:<12}", entry.crop_name), Theme::normal()),
                    Span::styled(
                        entry.suitability.as_str(),
                        Style::default().fg(entry.suitability.color()),
                    ),
                ]);
                ListItem::new(line).style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_details(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(entry) = self.entries.get(self.selected_index) else {
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(entry.crop_name.as_str(), Theme::header())),
            Line::from(vec![
                Span::styled("Conditions: ", Theme::dim()),
                Span::styled(
                    format!("{} soil, {} weather", entry.soil_type, entry.moisture_regime),
                    Theme::normal(),
                ),
            ]),
            Line::from(""),
        ];

        let fields = [
            ("Planting: ", &entry.planting_window),
            ("Harvest: ", &entry.harvest_window),
            ("Yield: ", &entry.expected_yield_range),
        ];
        for (label, value) in fields {
            if !value.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled(label, Theme::dim()),
                    Span::styled(value.as_str(), Theme::highlight()),
                ]));
            }
        }

        if !entry.notes.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Notes:", Theme::dim())));
            for note in &entry.notes {
                lines.push(Line::from(Span::styled(
                    format!("  • {}", note),
                    Theme::normal(),
                )));
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
