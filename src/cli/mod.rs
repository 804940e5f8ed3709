pub mod convert;
pub mod currencies;
pub mod settings;
pub mod setup;
pub mod table;
pub mod ui;
