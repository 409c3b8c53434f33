//! Output artifacts: windowed pair lists, interaction lines and the
//! per-patient timeline tree.

pub mod error;
pub mod lists;
pub mod paths;
pub mod timeline_xml;

pub use error::{ReportError, Result};
pub use lists::{
    render_interactions, render_pair_list, write_interactions, write_pair_list,
    write_windowed_pairs,
};
pub use paths::{
    INTERACTIONS_FILE, OutputPaths, PLUS_48H_FILE, SAME_DAY_FILE, TIMELINE_FILE, WITHIN_6H_FILE,
};
pub use timeline_xml::{
    TIMESTAMP_FORMAT, parse_timeline_xml, read_timeline_xml, render_timeline_xml,
    write_timeline_xml,
};
