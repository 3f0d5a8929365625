pub mod auth;
pub mod bookings;
pub mod contact;
pub mod inquiries;
pub mod products;
