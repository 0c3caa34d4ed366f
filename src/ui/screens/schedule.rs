use crate::models::{DayOutlook, IrrigationPlanEntry, SavedPlan, Weekday};
use crate::ui::components::{nav_line, status_line};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};

pub struct ScheduleScreen<'a> {
    pub plan: Option<&'a SavedPlan>,
    /// Outlook the next regenerate will use; may differ from the plan's
    pub pending_outlook: &'a [DayOutlook],
    pub selected_index: usize,
    pub status: Option<&'a str>,
}

impl<'a> ScheduleScreen<'a> {
    pub fn new(plan: Option<&'a SavedPlan>, pending_outlook: &'a [DayOutlook]) -> Self {
        Self {
            plan,
            pending_outlook,
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

impl Widget for ScheduleScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(11), // Week table
                Constraint::Min(4),    // Rationale
                Constraint::Length(1), // Status
                Constraint::Length(1), // Nav
            ])
            .split(area);

        self.render_title(chunks[0], buf);
        self.render_week(chunks[1], buf);
        self.render_rationale(chunks[2], buf);

        Paragraph::new(status_line(self.status)).render(chunks[3], buf);
        Paragraph::new(nav_line(&[
            ("↑↓", "Day"),
            ("Enter", "Done/Undo"),
            ("w", "Outlook"),
            ("g", "Generate"),
            ("1-3", "Screens"),
            ("q", "Quit"),
        ]))
        .render(chunks[4], buf);
    }
}

impl ScheduleScreen<'_> {
    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled("Irrigation Schedule", Theme::title())];

        if let Some(plan) = self.plan {
            spans.push(Span::styled(
                format!(
                    " - {} soil, {:.1} ha, {} | {}/{} done, {:.1} L total",
                    plan.soil_type,
                    plan.area_hectares,
                    plan.crops.join(", "),
                    plan.completed_count(),
                    plan.entries.len() - plan.skipped_count(),
                    plan.total_volume_liters()
                ),
                Theme::dim(),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn render_week(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("This Week")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let header = Row::new(vec![
            Cell::from(""),
            Cell::from("Day"),
            Cell::from("Outlook"),
            Cell::from("Time"),
            Cell::from("Minutes"),
            Cell::from("Litres"),
            Cell::from("Status"),
        ])
        .style(Theme::header());

        let rows: Vec<Row> = Weekday::all()
            .iter()
            .enumerate()
            .map(|(i, day)| {
                let entry = self.plan.and_then(|p| p.entry(*day));
                let outlook = self.pending_outlook.get(i).copied();
                self.week_row(i, *day, outlook, entry)
            })
            .collect();

        let widths = [
            Constraint::Length(2),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(12),
        ];

        Table::new(rows, widths).header(header).render(inner, buf);
    }

    fn week_row(
        &self,
        index: usize,
        day: Weekday,
        outlook: Option<DayOutlook>,
        entry: Option<&IrrigationPlanEntry>,
    ) -> Row<'static> {
        let style = if index == self.selected_index {
            Theme::selected()
        } else {
            Style::default()
        };

        // Mark days whose pending outlook no longer matches the saved plan
        let changed = matches!((outlook, entry), (Some(o), Some(e)) if o != e.outlook);

        let outlook_cell = match outlook {
            Some(o) => Cell::from(format!(
                "{} {}{}",
                o.symbol(),
                o,
                if changed { "*" } else { "" }
            ))
            .style(Style::default().fg(Theme::outlook_color(o))),
            None => Cell::from("-"),
        };

        let cells = match entry {
            Some(e) => vec![
                Cell::from(e.state.symbol()).style(Theme::plan_state(e.state)),
                Cell::from(day.as_str()),
                outlook_cell,
                Cell::from(e.scheduled_time.clone()),
                Cell::from(e.duration_minutes.to_string()),
                Cell::from(format!("{:.1}", e.volume_liters)),
                Cell::from(e.state.as_str()).style(Theme::plan_state(e.state)),
            ],
            None => vec![
                Cell::from(""),
                Cell::from(day.as_str()),
                outlook_cell,
                Cell::from("-"),
                Cell::from("-"),
                Cell::from("-"),
                Cell::from("not planned").style(Theme::dim()),
            ],
        };

        Row::new(cells).style(style)
    }

    fn render_rationale(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Why")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let text = match self.plan {
            None => Span::styled(
                "No plan saved yet. Press g to generate one from the current outlook.",
                Theme::dim(),
            ),
            Some(plan) => match plan.entries.get(self.selected_index) {
                Some(entry) => Span::styled(entry.rationale.as_str(), Theme::normal()),
                None => Span::styled("", Theme::dim()),
            },
        };

        Paragraph::new(Line::from(text))
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
