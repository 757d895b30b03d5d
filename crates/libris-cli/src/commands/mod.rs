pub mod books;
pub mod config;
pub mod site;
