pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod export;
pub mod file_encode;
pub mod http;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod modal_stack;
pub mod notifications;
pub mod number_format;
pub mod page_frame;
pub mod page_standard;
pub mod record_form;
pub mod resource_store;
pub mod rest_resource;
