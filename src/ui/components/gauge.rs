use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Boxed reading with a one-line fill bar underneath
pub struct GaugeWidget<'a> {
    title: &'a str,
    value: f64,
    unit: &'a str,
    min: f64,
    max: f64,
    thresholds: Vec<(f64, Color)>,
    precision: usize,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: f64, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            thresholds: Vec::new(),
            precision: 1,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<(f64, Color)>) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn color(&self) -> Color {
        self.thresholds
            .iter()
            .rev()
            .find(|(threshold, _)| self.value >= *threshold)
            .map(|(_, color)| *color)
            .unwrap_or(Theme::FG)
    }

    fn fill_ratio(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.value - self.min) / span).clamp(0.0, 1.0)
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let color = self.color();
        let value_str = format!("{:.prec$}{}", self.value, self.unit, prec = self.precision);
        Paragraph::new(Line::from(vec![Span::styled(
            value_str,
            Style::default().fg(color),
        )]))
        .render(inner, buf);

        if inner.height >= 2 {
            let bar = Rect {
                x: inner.x,
                y: inner.y + 1,
                width: inner.width,
                height: 1,
            };
            let filled = (bar.width as f64 * self.fill_ratio()) as u16;

            for x in bar.x..bar.x + bar.width {
                let ch = if x < bar.x + filled { '█' } else { '░' };
                buf[(x, bar.y)].set_char(ch).set_fg(color);
            }
        }
    }
}

pub fn temperature_gauge(value: f64) -> GaugeWidget<'static> {
    GaugeWidget::new("Temperature", value, "°C")
        .range(-10.0, 45.0)
        .thresholds(vec![
            (f64::NEG_INFINITY, Theme::TEMP_COLD),
            (5.0, Theme::TEMP_MILD),
            (18.0, Theme::TEMP_WARM),
            (30.0, Theme::TEMP_HOT),
        ])
}

/// Humidity turns the wet colour once it crosses the recommender's wet threshold
pub fn humidity_gauge(value: f64) -> GaugeWidget<'static> {
    GaugeWidget::new("Humidity", value, "%")
        .range(0.0, 100.0)
        .precision(0)
        .thresholds(vec![(0.0, Theme::SUNNY), (70.0, Theme::RAIN)])
}

pub fn rainfall_gauge(value: f64) -> GaugeWidget<'static> {
    GaugeWidget::new("Rainfall", value, " mm")
        .range(0.0, 20.0)
        .thresholds(vec![(0.0, Theme::SUNNY), (1.0, Theme::RAIN)])
}

pub fn wind_gauge(value: f64) -> GaugeWidget<'static> {
    GaugeWidget::new("Wind", value, " m/s")
        .range(0.0, 20.0)
        .thresholds(vec![(0.0, Theme::SUCCESS), (10.0, Theme::WARNING), (15.0, Theme::ERROR)])
}
