mod catalog_vm;
mod filter_vm;
mod markdown_vm;
mod study_vm;
mod time_fmt;

pub use catalog_vm::{
    DomainTileVm, HeaderStatsVm, TaskRowVm, completion_label, map_domain_tiles,
    map_header_stats, map_task_rows,
};
pub use filter_vm::{ChipVm, FilterPanelVm, map_filter_panel};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use study_vm::{CardFaceVm, OptionState, OptionVm, StudyCardVm, map_study_card};
pub use time_fmt::format_last_review;
