pub mod m202507010001_create_users;
pub mod m202507010002_create_tickets;
pub mod m202507010003_create_ticket_responses;
