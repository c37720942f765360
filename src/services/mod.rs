pub mod books;
pub mod reports;
pub mod system;

pub use books::BookService;
pub use reports::ReportService;
pub use system::SystemService;
