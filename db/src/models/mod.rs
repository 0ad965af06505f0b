pub mod ticket;
pub mod ticket_response;
pub mod user;
