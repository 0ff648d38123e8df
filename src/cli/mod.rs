mod crop;
mod options;
mod stats;

pub(crate) use crop::crop_entries;
pub use crop::{run_crop_list, run_crop_reset, run_crop_set, run_crop_unset, CropEntry, CropSource};
pub use options::run_options;
pub use stats::{compute_stats, parse_crop_override, run_stats, GroupBy, StatsOptions, StatsReport};
