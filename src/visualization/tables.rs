use colored::Colorize;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, ContentArrangement, Table,
};

use crate::calc::{
    BatchEntry, FertilizationAdvice, LimingReport, NutrientLevel, SprayerReport, VolumeBand,
};
use crate::models::SpeedMode;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn level_color(level: NutrientLevel) -> Color {
    match level {
        NutrientLevel::Low => Color::Red,
        NutrientLevel::Medium => Color::Yellow,
        NutrientLevel::Adequate => Color::Green,
    }
}

fn level_cell(level: Option<NutrientLevel>, missing: &str) -> Cell {
    match level {
        Some(level) => Cell::new(level).fg(level_color(level)),
        None => Cell::new(missing),
    }
}

fn band_color(band: VolumeBand) -> Color {
    match band {
        VolumeBand::Low => Color::Yellow,
        VolumeBand::Ideal => Color::Green,
        VolumeBand::High => Color::Red,
    }
}

/// Format the soil exchange-complex summary as a string.
pub fn format_soil_summary(report: &LimingReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("Soil Analysis: {}", report.analysis.label()).bold().green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table();
    table.set_header(vec!["Metric", "Value", "Unit"]);

    table.add_row(vec![
        Cell::new("Base Sum (SB)"),
        Cell::new(format!("{:.2}", report.state.base_sum)),
        Cell::new("cmol/dm³"),
    ]);
    table.add_row(vec![
        Cell::new("CEC (T)"),
        Cell::new(format!("{:.2}", report.state.cec)),
        Cell::new("cmol/dm³"),
    ]);
    table.add_row(vec![
        Cell::new("Current Saturation (V%)"),
        Cell::new(format!("{:.1}", report.state.current_saturation)),
        Cell::new("%"),
    ]);
    table.add_row(vec![
        Cell::new("Target Saturation"),
        Cell::new(format!("{:.1}", report.target.target_saturation)),
        Cell::new("%"),
    ]);
    table.add_row(vec![
        Cell::new("Difference to Target"),
        Cell::new(format!("{:+.1}", report.saturation_delta)),
        Cell::new("% points"),
    ]);

    output.push_str(&format!("{table}\n"));
    output
}

/// Print the soil summary table.
pub fn print_soil_summary(report: &LimingReport) {
    print!("{}", format_soil_summary(report));
}

/// Format the liming recommendation as a string.
pub fn format_liming_recommendation(report: &LimingReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Liming Recommendation".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let rec = &report.recommendation;
    if rec.is_needed() {
        output.push_str(&format!(
            "  Liming need (NC): {}\n",
            format!("{:.2} t/ha", rec.needed_tons_per_ha).bold()
        ));
        output.push_str(&format!(
            "  {}\n",
            format!(
                "Apply lime with PRNT {}%. Recalculate if a different PRNT is used.",
                rec.prnt
            )
            .dimmed()
        ));
    } else {
        output.push_str(&format!(
            "  {}\n",
            "Soil already corrected. No lime needed.".green()
        ));
    }
    output
}

/// Print the liming recommendation.
pub fn print_liming_recommendation(report: &LimingReport) {
    print!("{}", format_liming_recommendation(report));
}

/// Format fertilization guidance as a string.
pub fn format_fertilization_table(advice: &FertilizationAdvice) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Fertilization Guidance".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table();
    table.set_header(vec!["Nutrient", "Level", "Guidance"]);
    table.add_row(vec![
        Cell::new("Phosphorus (P)"),
        level_cell(advice.phosphorus, "Not measured"),
        Cell::new(advice.phosphorus_message()),
    ]);
    table.add_row(vec![
        Cell::new("Potassium (K)"),
        Cell::new(advice.potassium).fg(level_color(advice.potassium)),
        Cell::new(advice.potassium_message()),
    ]);

    output.push_str(&format!("{table}\n"));
    output
}

/// Print fertilization guidance.
pub fn print_fertilization_table(advice: &FertilizationAdvice) {
    print!("{}", format_fertilization_table(advice));
}

/// Format sprayer calibration results as a string.
pub fn format_sprayer_report(report: &SprayerReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Sprayer Calibration".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table();
    table.set_header(vec!["Metric", "Value", "Unit"]);

    let speed_label = match report.speed_mode {
        SpeedMode::Direct => "Speed (panel)",
        SpeedMode::Timed => "Speed (timed)",
    };
    table.add_row(vec![
        Cell::new(speed_label),
        Cell::new(format!("{:.1}", report.speed_kmh)),
        Cell::new("km/h"),
    ]);
    table.add_row(vec![
        Cell::new("Application Volume"),
        Cell::new(format!("{:.1}", report.result.volume_per_ha)),
        Cell::new("L/ha"),
    ]);
    table.add_row(vec![
        Cell::new("Volume Band"),
        Cell::new(report.result.band.description()).fg(band_color(report.result.band)),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Tank Autonomy"),
        Cell::new(format!("{:.1}", report.result.autonomy_ha)),
        Cell::new("ha"),
    ]);

    output.push_str(&format!("{table}\n"));
    output.push_str(&format!(
        "  {}\n",
        format!("Area covered with a {} L tank", report.setup.tank_capacity).dimmed()
    ));
    output
}

/// Print sprayer calibration results.
pub fn print_sprayer_report(report: &SprayerReport) {
    print!("{}", format_sprayer_report(report));
}

/// Format batch results as a string.
pub fn format_batch_table(entries: &[BatchEntry]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Batch Liming Results".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(70)));

    let mut table = new_table();
    table.set_header(vec!["Sample", "SB", "CEC", "V%", "NC (t/ha)", "P", "K", "Status"]);

    for entry in entries {
        match (&entry.report, &entry.error) {
            (Some(r), _) => {
                let status = if r.already_corrected {
                    "corrected"
                } else {
                    "apply lime"
                };
                table.add_row(vec![
                    Cell::new(&entry.sample_id),
                    Cell::new(format!("{:.2}", r.state.base_sum)),
                    Cell::new(format!("{:.2}", r.state.cec)),
                    Cell::new(format!("{:.1}", r.state.current_saturation)),
                    Cell::new(format!("{:.2}", r.recommendation.needed_tons_per_ha)),
                    level_cell(r.fertilization.phosphorus, "-"),
                    Cell::new(r.fertilization.potassium)
                        .fg(level_color(r.fertilization.potassium)),
                    Cell::new(status),
                ]);
            }
            (None, error) => {
                table.add_row(vec![
                    Cell::new(&entry.sample_id),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new(error.as_deref().unwrap_or("failed")).fg(Color::Red),
                ]);
            }
        }
    }

    output.push_str(&format!("{table}\n"));
    let failed = entries.iter().filter(|e| e.report.is_none()).count();
    output.push_str(&format!("  {} samples, {failed} failed\n", entries.len()));
    output
}

/// Print batch results.
pub fn print_batch_table(entries: &[BatchEntry]) {
    print!("{}", format_batch_table(entries));
}
