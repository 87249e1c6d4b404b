pub mod badge;
pub mod file_picker;
pub mod pagination_controls;
pub mod resource_table;
pub mod row_actions;
pub mod stat_card;
