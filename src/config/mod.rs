mod color;
mod defaults;
mod io;
mod schema;
mod validate;


pub use color::HostColor;
pub use io::load_config;
#[allow(unused_imports)]
pub use schema::{Config, Email, HostEntry, Paths, Perfdata, Report, SmtpSecurity};
pub use validate::ConfigError;
