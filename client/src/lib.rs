#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]

pub mod cfg {
    mod api_settings;
    mod auth_settings;
    mod checkin_settings;
    mod client_settings;

    pub use api_settings::*;
    pub use auth_settings::*;
    pub use checkin_settings::*;
    pub use client_settings::*;
}

pub mod core {
    mod context;

    pub use context::*;
}

pub mod auth {
    mod claims;
    mod session;
    mod store;

    pub use claims::*;
    pub use session::*;
    pub use store::*;
}

pub mod tenant {
    mod config;
    mod resolver;

    pub use config::*;
    pub use resolver::*;
}

pub mod api {
    pub mod auth;
    pub mod chat;
    pub mod checkin;
    pub mod client;
    pub mod hotel_info;
    pub mod landing;
    pub mod tenants;
}

pub mod checkin {
    mod liveness;
    mod wizard;

    pub use liveness::*;
    pub use wizard::*;
}

pub mod app {
    mod cli;

    pub use cli::*;
}

#[cfg(test)]
mod tests {
    mod claims_tests;
    mod resolver_tests;
    mod store_tests;
    mod wizard_tests;
}
