use crate::logic::moisture_regime;
use crate::models::{MoistureRegime, WeatherSnapshot};
use crate::ui::components::{
    humidity_gauge, nav_line, rainfall_gauge, status_line, temperature_gauge, wind_gauge,
};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

pub struct WeatherScreen<'a> {
    pub weather: &'a WeatherSnapshot,
    pub status: Option<&'a str>,
    pub refreshing: bool,
}

impl<'a> WeatherScreen<'a> {
    pub fn new(weather: &'a WeatherSnapshot) -> Self {
        Self {
            weather,
            status: None,
            refreshing: false,
        }
    }

    pub fn with_refreshing(mut self, refreshing: bool) -> Self {
        self.refreshing = refreshing;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }
}

impl Widget for WeatherScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(5), // Gauges
                Constraint::Length(3), // Conditions
                Constraint::Min(6),    // Forecast
                Constraint::Length(1), // Status
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let updated = if self.refreshing {
            "refreshing...".to_string()
        } else {
            self.weather
                .fetched_at
                .map(|dt| format!("updated {}", dt.format("%Y-%m-%d %H:%M UTC")))
                .unwrap_or_else(|| "updated n/a".to_string())
        };

        let origin_style = if self.weather.is_fallback() {
            Theme::warning()
        } else {
            Theme::success()
        };

        let title = Line::from(vec![
            Span::styled("Weather", Theme::title()),
            Span::styled(format!(" - {} ", self.weather.location), Theme::normal()),
            Span::styled(format!("[{}]", self.weather.origin), origin_style),
            Span::styled(format!(" {}", updated), Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_gauges(chunks[1], buf);
        self.render_conditions(chunks[2], buf);
        self.render_forecast(chunks[3], buf);

        Paragraph::new(status_line(self.status)).render(chunks[4], buf);
        Paragraph::new(nav_line(&[
            ("r", "Refresh"),
            ("1-3", "Screens"),
            ("q", "Quit"),
        ]))
        .render(chunks[5], buf);
    }
}

impl WeatherScreen<'_> {
    fn render_gauges(&self, area: Rect, buf: &mut Buffer) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25); 4])
            .split(area);

        temperature_gauge(self.weather.temperature_c).render(cols[0], buf);
        humidity_gauge(self.weather.humidity_pct).render(cols[1], buf);
        rainfall_gauge(self.weather.rainfall_mm).render(cols[2], buf);
        wind_gauge(self.weather.wind_speed_ms).render(cols[3], buf);
    }

    fn render_conditions(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Conditions")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let (regime_label, regime_color) = match moisture_regime(self.weather) {
            MoistureRegime::Wet => ("wet", Theme::RAIN),
            MoistureRegime::Dry => ("dry", Theme::SUNNY),
        };

        let line = Line::from(vec![
            Span::styled(
                format!("{} {}", self.weather.condition.symbol(), self.weather.condition),
                Theme::normal(),
            ),
            Span::styled("   Moisture regime: ", Theme::dim()),
            Span::styled(regime_label, Style::default().fg(regime_color)),
        ]);
        Paragraph::new(line).render(inner, buf);
    }

    fn render_forecast(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Forecast")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.weather.forecast.is_empty() {
            Paragraph::new(Span::styled("No forecast available", Theme::dim())).render(inner, buf);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Day"),
            Cell::from("High"),
            Cell::from("Sky"),
            Cell::from("Rain"),
        ])
        .style(Theme::header());

        let rows: Vec<Row> = self
            .weather
            .forecast
            .iter()
            .map(|day| {
                let outlook = day.condition.outlook();
                Row::new(vec![
                    Cell::from(day.day_label.as_str()),
                    Cell::from(format!("{:.0}°C", day.temp_c))
                        .style(Style::default().fg(Theme::temp_color(day.temp_c))),
                    Cell::from(format!("{} {}", day.condition.symbol(), day.condition))
                        .style(Style::default().fg(Theme::outlook_color(outlook))),
                    Cell::from(format!("{:.1} mm", day.rain_mm)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(16),
            Constraint::Length(10),
        ];

        Table::new(rows, widths).header(header).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_row(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn title_shows_refresh_in_progress() {
        let weather = WeatherSnapshot::fallback();
        let area = Rect::new(0, 0, 100, 24);

        let mut buf = Buffer::empty(area);
        WeatherScreen::new(&weather).render(area, &mut buf);
        assert!(title_row(&buf).contains("updated n/a"));

        let mut buf = Buffer::empty(area);
        WeatherScreen::new(&weather)
            .with_refreshing(true)
            .render(area, &mut buf);
        let title = title_row(&buf);
        assert!(title.contains("refreshing..."));
        assert!(title.contains("[Fallback]"));
    }
}
