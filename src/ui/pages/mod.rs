//! Page body rendering, one module per page kind

mod identity;
mod info;
mod question;
mod rating;
