use std::io::{BufRead, Write};

use tracing::warn;

use crate::report::{header, render_step};
use crate::train::observer::{Milestone, Step, StepDecision, StepObserver};

/// Prints each milestone and waits for a line of input before continuing.
///
/// A line starting with `s` skips to the end of training; anything else,
/// including an empty line, continues. End of input also skips to the end.
pub struct ConsoleObserver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleObserver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsoleObserver { input, output }
    }

    fn show(&mut self, step: &Step<'_>) -> std::io::Result<()> {
        match step.milestone {
            Milestone::Visible => {
                write!(self.output, "{}", header("Positive phase of contrastive divergence"))?;
            }
            Milestone::NegativeVisible => {
                write!(self.output, "{}", header("Negative phase of contrastive divergence"))?;
            }
            _ => {}
        }
        write!(self.output, "{}", render_step(step))?;
        writeln!(self.output, "Skip to the end (s) | Else continue (Enter)")?;
        self.output.flush()
    }

    fn ask(&mut self) -> std::io::Result<StepDecision> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(StepDecision::RunToEnd);
        }
        if line.trim_start().starts_with('s') {
            Ok(StepDecision::RunToEnd)
        } else {
            Ok(StepDecision::Continue)
        }
    }
}

impl<R: BufRead, W: Write> StepObserver for ConsoleObserver<R, W> {
    fn on_step(&mut self, step: &Step<'_>) -> StepDecision {
        match self.show(step).and_then(|_| self.ask()) {
            Ok(decision) => decision,
            Err(e) => {
                warn!(error = %e, "console unavailable, running to completion");
                StepDecision::RunToEnd
            }
        }
    }
}
