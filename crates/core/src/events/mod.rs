//! Event processing: parse stage, visibility policy and the pipeline

pub mod parse;
pub mod pipeline;
pub mod ports;
pub mod visibility;

pub use parse::{map_search_link, process_event, process_events};
pub use pipeline::EventPipeline;
pub use ports::{CalendarAccess, PrivilegeCheck};
pub use visibility::{filter_by_tags, is_visible};
