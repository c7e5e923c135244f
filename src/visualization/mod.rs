mod tables;
mod charts;

pub use tables::{
    format_soil_summary, print_soil_summary,
    format_liming_recommendation, print_liming_recommendation,
    format_fertilization_table, print_fertilization_table,
    format_sprayer_report, print_sprayer_report,
    format_batch_table, print_batch_table,
};
pub use charts::{
    format_saturation_gauge, print_saturation_gauge,
    format_volume_gauge, print_volume_gauge,
};
