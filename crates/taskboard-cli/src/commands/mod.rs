pub mod add;
pub mod category;
pub mod clear;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;
pub mod stats;
pub mod toggle;
