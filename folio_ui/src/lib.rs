//! State and behavior behind the portfolio page: the contact form and the
//! navigation highlighting. Rendering is left to the frontend.

pub mod client;
pub mod form;
pub mod sections;
