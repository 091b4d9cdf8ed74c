//! The jump flow, from capture to restore.

use par_jump_config::Config;
use par_jump_tmux::Host;

use crate::error::{JumpError, Result};
use crate::input::KeyReader;
use crate::jump::{JumpExecutor, JumpOutcome};
use crate::labels::{assign_by_proximity, find_label, generate_labels, pick_label_length};
use crate::mode::ModeController;
use crate::overlay;
use crate::pane::PaneModel;
use crate::search::{Position, SearchEngine};

/// How a run ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing on screen matched the key.
    NoMatch,
    Jumped(JumpOutcome),
}

/// Main application: one jump per run.
pub struct App {
    config: Config,
    reader: KeyReader,
}

impl App {
    pub fn new(config: Config, reader: KeyReader) -> Self {
        Self { config, reader }
    }

    /// Capture, search, label, read the label, jump.
    ///
    /// A single match is jumped to without showing labels. Whatever the
    /// overlay changed on the pane is undone before this returns. An interrupt
    /// ends the run as [`InputError::Cancelled`](crate::error::InputError::Cancelled)
    /// before the next step that would change the pane.
    pub fn run<H: Host + ?Sized>(&self, host: &mut H) -> Result<RunOutcome> {
        let pane = PaneModel::capture(host, &self.config)?;
        self.reader.check_interrupted()?;
        let mut controller = ModeController::new(&pane, self.config.style);
        controller.begin(host)?;

        let key = self.reader.read_key(host, &self.config)?;
        let engine = SearchEngine::new(self.config.smart_case, &self.config.regions);
        let positions = engine.search(&pane.lines, &key);

        let target = match positions.as_slice() {
            [] => {
                log::info!("no matches for {:?}", key);
                return Ok(RunOutcome::NoMatch);
            }
            [only] => only.clone(),
            _ => self.choose(host, &mut controller, &pane, &key, &positions)?,
        };

        self.reader.check_interrupted()?;
        let (x, y) = target.cell();
        JumpExecutor::new(&self.config)
            .jump(host, &mut controller, &pane, x, y)
            .map(RunOutcome::Jumped)
    }

    /// Label every match, show the overlay and let the user pick one.
    fn choose<H: Host + ?Sized>(
        &self,
        host: &mut H,
        controller: &mut ModeController,
        pane: &PaneModel,
        key: &str,
        positions: &[Position],
    ) -> Result<Position> {
        let alphabet = self.config.label_alphabet();
        let length = pick_label_length(alphabet.len(), key.chars().count(), positions.len());
        let labels = generate_labels(&alphabet, length, positions.len());
        if labels.len() < positions.len() {
            log::info!(
                "{} matches but only {} labels, the farthest stay unlabeled",
                positions.len(),
                labels.len()
            );
        }

        let cursor = self.reference_cursor(controller);
        let assigned = assign_by_proximity(&labels, positions, cursor, self.config.row_weight);
        let rendered = overlay::render(
            &pane.lines,
            positions,
            &assigned,
            &self.config.text_attrs,
            &self.config.label_attrs,
        );

        self.reader.check_interrupted()?;
        let label = controller.with_overlay(host, pane, &rendered, |host| {
            self.reader.select_label(host, &labels)
        })?;

        match find_label(&label, &assigned, positions) {
            Some(position) => Ok(position.clone()),
            None => Err(JumpError::InvalidLabel(label)),
        }
    }

    /// 0-based cell labels are ranked against.
    fn reference_cursor(&self, controller: &ModeController) -> (i64, i64) {
        match self.config.cursor_pos {
            Some((x, y)) => (x as i64 - 1, y as i64 - 1),
            None => controller.cursor(),
        }
    }
}
