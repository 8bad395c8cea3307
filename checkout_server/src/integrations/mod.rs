//! Side effects that ride on the engine's event hooks, kept out of the request path.
pub mod mailer;
