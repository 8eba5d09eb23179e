pub mod frontend;

pub mod uploads;

pub use frontend::configure_frontend_routes;
pub use uploads::{configure_public_file_routes, configure_upload_routes};
