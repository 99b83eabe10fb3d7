mod marquee_table;
mod status_bar;

pub use marquee_table::MarqueeTableWidget;
pub use status_bar::StatusBarWidget;
