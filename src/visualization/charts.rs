use colored::Colorize;

use crate::calc::{VolumeBand, HIGH_VOLUME_ABOVE, LOW_VOLUME_BELOW};
use crate::models::SoilState;

const BAR_WIDTH: usize = 40;
/// Right edge of the volume gauge in L/ha.
const VOLUME_SCALE_MAX: f64 = 400.0;

fn position(value: f64, max: f64) -> usize {
    let clamped = value.clamp(0.0, max);
    ((clamped / max) * BAR_WIDTH as f64).round() as usize
}

/// Format a text gauge of current vs. target base saturation.
pub fn format_saturation_gauge(state: &SoilState, target_saturation: f64) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Base Saturation".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let filled = position(state.current_saturation, 100.0);
    let marker = position(target_saturation, 100.0).min(BAR_WIDTH - 1);

    let mut bar = String::new();
    for i in 0..BAR_WIDTH {
        if i == marker {
            bar.push('|');
        } else if i < filled {
            bar.push('\u{2588}');
        } else {
            bar.push('\u{2591}');
        }
    }

    let bar = if state.current_saturation >= target_saturation {
        bar.green()
    } else {
        bar.yellow()
    };
    output.push_str(&format!(
        "  [{}]  {:.1}% / target {:.1}%\n",
        bar, state.current_saturation, target_saturation
    ));
    output
}

/// Print the saturation gauge.
pub fn print_saturation_gauge(state: &SoilState, target_saturation: f64) {
    print!("{}", format_saturation_gauge(state, target_saturation));
}

/// Format a text gauge placing an application volume among the bands.
pub fn format_volume_gauge(volume_per_ha: f64) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Application Volume".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let low_edge = position(LOW_VOLUME_BELOW, VOLUME_SCALE_MAX);
    let high_edge = position(HIGH_VOLUME_ABOVE, VOLUME_SCALE_MAX);
    let needle = position(volume_per_ha, VOLUME_SCALE_MAX).min(BAR_WIDTH - 1);

    let mut scale = String::new();
    for i in 0..BAR_WIDTH {
        let ch = if i == needle {
            "\u{25bc}".bold().to_string()
        } else if i < low_edge {
            "-".yellow().to_string()
        } else if i <= high_edge {
            "=".green().to_string()
        } else {
            "-".red().to_string()
        };
        scale.push_str(&ch);
    }

    output.push_str(&format!(
        "  [{}]  {:.1} L/ha ({})\n",
        scale,
        volume_per_ha,
        VolumeBand::classify(volume_per_ha)
    ));
    output.push_str(&format!(
        "   0{:>w1$}{:>w2$}{:>w3$}\n",
        LOW_VOLUME_BELOW,
        HIGH_VOLUME_ABOVE,
        VOLUME_SCALE_MAX,
        w1 = low_edge,
        w2 = high_edge - low_edge,
        w3 = BAR_WIDTH - high_edge,
    ));
    output
}

/// Print the volume gauge.
pub fn print_volume_gauge(volume_per_ha: f64) {
    print!("{}", format_volume_gauge(volume_per_ha));
}
