pub mod shutdown;
pub mod startup;

pub use shutdown::listen_for_shutdown;
pub use startup::prepare_server_startup;
