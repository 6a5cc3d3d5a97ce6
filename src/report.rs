use std::fmt::{Display, Write};

use crate::math::matrix::Matrix;
use crate::rbm::machine::Rbm;
use crate::train::observer::{Step, StepView};

/// `[a, b, c]`
pub fn format_vector<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let items: Vec<String> = values.into_iter().map(|x| x.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// A heading followed by an 80-column rule, preceded by a blank line.
pub fn header(heading: &str) -> String {
    format!("\n{heading}\n{}\n", "-".repeat(80))
}

fn fixed(values: &[f64]) -> String {
    format_vector(values.iter().map(|x| format!("{x:.4}")))
}

fn matrix_rows(m: &Matrix) -> String {
    (0..m.rows()).map(|r| fixed(m.row(r)) + "\n").collect()
}

/// Bias vectors followed by a table of hidden-to-visible weights.
pub fn render_state(rbm: &Rbm) -> String {
    let nv = rbm.num_visible();
    let nh = rbm.num_hidden();
    let w = rbm.weights();
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Bias of visible nodes ({nv}):\t{}", fixed(&rbm.visible_bias()));
    let _ = writeln!(out, "Bias of hidden nodes ({nh}):\t{}", fixed(&rbm.hidden_bias()));

    let _ = writeln!(out, "Weights:");
    let _ = write!(out, "{:>12}", "|");
    for v in 1..=nv {
        let _ = write!(out, "{:>8}", format!("#{v}"));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "-".repeat(12 + nv * 8));

    for h in 1..=nh {
        let _ = write!(out, "{:>10} |", format!("Hidden #{h}"));
        for v in 1..=nv {
            let _ = write!(out, "{:>8.4}", w[(h, v)]);
        }
        let _ = writeln!(out);
    }

    out
}

/// `label = value` for one training milestone.
pub fn render_step(step: &Step<'_>) -> String {
    let label = step.milestone.label();
    match step.view {
        StepView::Activations(a) => format!("{label} = {}\n", format_vector(a.as_slice())),
        StepView::Stats(s) => format!("{label} =\n{}", matrix_rows(s.matrix())),
        StepView::Weights(m) => format!("{label} =\n{}", matrix_rows(m)),
    }
}
