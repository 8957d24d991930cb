use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use super::{ContentError, PanelContent};
use crate::ui::UiFrame;
use crate::window::PanelKind;

const SETTINGS: &str = indoc! {"
    Survey file, model and inversion settings.
    Loaded data sets appear here once a survey is opened.
"};

const RESPONSE_PLOT: &str = indoc! {"
    Amplitude and phase of the CSEM responses
    against offset, per receiver and frequency.
"};

const BATHYMETRY: &str = indoc! {"
    Seafloor depth with transmitter tow lines
    and receiver positions overlaid.
"};

const CUSTOM_PLOT: &str = indoc! {"
    Pick any two data columns to plot
    against each other.
"};

const MISFIT_STATS: &str = indoc! {"
    Normalized misfit by receiver, frequency
    and component for the current model.
"};

/// Static description of a panel, shown until real content is mounted.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderContent {
    kind: PanelKind,
}

impl PlaceholderContent {
    pub fn new(kind: PanelKind) -> Self {
        Self { kind }
    }

    fn body(&self) -> &'static str {
        match self.kind {
            PanelKind::Settings => SETTINGS,
            PanelKind::ResponsePlot => RESPONSE_PLOT,
            PanelKind::Bathymetry => BATHYMETRY,
            PanelKind::CustomPlot => CUSTOM_PLOT,
            PanelKind::MisfitStats => MISFIT_STATS,
        }
    }
}

impl PanelContent for PlaceholderContent {
    fn render(
        &mut self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        focused: bool,
    ) -> Result<(), ContentError> {
        let heading = if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let mut lines = vec![Line::from(Span::styled(self.kind.label(), heading))];
        lines.extend(self.body().lines().map(Line::from));
        let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        Ok(())
    }
}
