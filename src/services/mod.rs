pub mod content;
pub mod dashboard;
pub mod history;
