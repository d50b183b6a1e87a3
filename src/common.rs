pub mod db_utils;
pub mod error;
pub mod forms;
pub mod i18n;
