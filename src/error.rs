use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not read index page at {path:?}: {source}")]
    IndexPage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no running process matching \"{0}\" found")]
    ProcessNotFound(String),
    #[error("server stopped: {0}")]
    Server(#[from] rocket::Error),
}
