//! Dashboard model: layouts, styles, legend and selection summaries.
//!
//! The interactive shell that renders these is an external collaborator; this
//! module produces the data it consumes and re-renders styles when the shell
//! reports a change.

mod layout;
mod legend;
mod model;
mod selection;
mod style;

pub use layout::{Layout, LayoutConfig, UnknownLayout};
pub use legend::{Legend, LegendEntry};
pub use model::{
    DASHBOARD_TITLE, DashboardModel, DashboardOptions, ServerSettings, choose_color_attribute,
};
pub use selection::{EMPTY_SELECTION_PROMPT, SelectedNode, SelectionSummary};
pub use style::{StyleRule, base_stylesheet, color_rules, restyle, stylesheet};
