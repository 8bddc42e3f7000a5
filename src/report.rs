use airdeck::{ResultRecord, Status};
use std::fmt::Write;

/// Render a textual summary of a deck approximation.
///
/// The report lists the model quantities first so a reader can check them
/// against hand calculations, then the response, then any fallbacks taken.
#[must_use]
pub fn render_summary(record: &ResultRecord) -> String {
    let mut output = String::new();
    let diagnostics = &record.diagnostics;

    writeln!(
        &mut output,
        "Airbeam deck approximation ({} nodes, {:?} scheme, {:?} solver)",
        diagnostics.solved_nodes, diagnostics.scheme, diagnostics.solver
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Section: EI = {:.4e} N·mm², T = {:.3} N, k = {:.4} N/mm², lever = {:.1} mm",
        diagnostics.flexural_rigidity,
        diagnostics.tension,
        diagnostics.distributed_stiffness,
        diagnostics.lever_length
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Maximum deflection: {:.4} mm",
        record.max_deflection
    )
    .expect("writing to string cannot fail");

    // Strap forces share one deflection sample, so a range is enough.
    let lowest = record.strap_forces.iter().copied().fold(f64::INFINITY, f64::min);
    let highest = record
        .strap_forces
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if record.strap_forces.is_empty() {
        output.push_str("Strap forces: none\n");
    } else {
        writeln!(
            &mut output,
            "Strap forces: {} lines, {lowest:.1} N to {highest:.1} N",
            record.strap_forces.len()
        )
        .expect("writing to string cannot fail");
    }

    match record.status() {
        Status::Ok => output.push_str("Status: ok\n"),
        Status::Warning(warnings) => {
            writeln!(&mut output, "Status: {} warning(s)", warnings.len())
                .expect("writing to string cannot fail");
            for warning in warnings {
                writeln!(&mut output, "  - {warning}").expect("writing to string cannot fail");
            }
        }
    }

    output
}
