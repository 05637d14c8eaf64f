use std::fmt::{Display, Formatter};

use crate::admin::AdminError;
use crate::config::ConfigError;
use crate::impl_err;
use crate::source::SourceError;
use crate::store::TableError;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Config(ConfigError),
    Table(TableError),
    Admin(AdminError),
    Source(SourceError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl_err!(std::io::Error, Io);
impl_err!(ConfigError, Config);
impl_err!(TableError, Table);
impl_err!(AdminError, Admin);
impl_err!(SourceError, Source);

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "io: {err}"),
            Error::Config(err) => write!(f, "config: {err}"),
            Error::Table(err) => write!(f, "table: {err}"),
            Error::Admin(err) => write!(f, "admin polygons: {err}"),
            Error::Source(err) => write!(f, "source: {err}"),
        }
    }
}

impl std::error::Error for Error {}
