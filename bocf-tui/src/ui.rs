// TUI rendering: membrane potential and gates vs. time + status panel.

use std::io::Stdout;

use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Terminal,
};

use bocf_core::Variable;

use crate::app::App;
use crate::backend::CellBackend;

const SERIES: [(Variable, Color); 4] = [
    (Variable::U, Color::Yellow),
    (Variable::V, Color::Cyan),
    (Variable::W, Color::Green),
    (Variable::S, Color::Magenta),
];

/// Draws the UI each frame:
/// - Top: u, v, w, s over the rolling time window.
/// - Bottom: Status including time, current state, run state, controls.
pub fn draw<B: CellBackend>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &App<B>,
) -> anyhow::Result<()> {
    let points: Vec<Vec<(f64, f64)>> = SERIES.iter().map(|(var, _)| app.series(*var)).collect();
    let [t0, t1] = app.time_bounds();

    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Percentage(80), Constraint::Percentage(20)].as_ref())
            .split(f.size());

        let datasets = SERIES
            .iter()
            .zip(points.iter())
            .map(|((var, color), data)| {
                Dataset::default()
                    .name(var.name())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(*color))
                    .data(data)
            })
            .collect();

        let chart = Chart::new(datasets)
            .block(Block::default().title("Action potential  (time →)").borders(Borders::ALL))
            .x_axis(
                Axis::default()
                    .title("t")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([t0, t1])
                    .labels(vec![Span::raw(format!("{:.1}", t0)), Span::raw(format!("{:.1}", t1))]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds([-0.1, 1.7])
                    .labels(vec![Span::raw("0"), Span::raw("0.8"), Span::raw("1.6")]),
            );
        f.render_widget(chart, chunks[0]);

        let s = app.backend.state();
        let status = format!(
            "t: {:.2} | u: {:.4} v: {:.4} w: {:.4} s: {:.4} | {} | steps/frame: {} | Running: {}\n\
             Controls: [s] Step  [r] Run/Pause  [+/-] Speed  [q] Quit",
            app.time(),
            s.u,
            s.v,
            s.w,
            s.s,
            app.backend.label(),
            app.steps_per_tick,
            if app.running { "yes" } else { "no" }
        );
        let status_widget = Paragraph::new(status)
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().title("Status").borders(Borders::ALL));
        f.render_widget(status_widget, chunks[1]);
    })?;
    Ok(())
}
