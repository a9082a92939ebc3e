pub mod bar_chart;
pub mod data_table;
pub mod header;
pub mod pagination;
pub mod search_bar;
