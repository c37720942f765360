pub mod books;

pub mod reports;

pub mod system;

pub use books::configure_book_routes;
pub use reports::configure_report_routes;
pub use system::configure_system_routes;
