mod contact_handler;

pub use contact_handler::{__path_send_contact, send_contact};
