use crate::client::ClientError;
use crate::seed::{SeedLedger, Stage};

#[derive(thiserror::Error, Debug)]
pub enum SeedError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("no location named {0:?} exists for the merchant")]
    LocationNotFound(String),
    #[error("seeding aborted at {stage} with {} entities already created: {source}", .created.len())]
    Aborted {
        stage: Stage,
        created: SeedLedger,
        #[source]
        source: Box<SeedError>,
    },
}

impl SeedError {
    /// The underlying error, looking through any `Aborted` wrapper.
    pub fn root(&self) -> &SeedError {
        match self {
            SeedError::Aborted { source, .. } => source.root(),
            other => other,
        }
    }

    /// Entities left behind on the remote system by an aborted run.
    pub fn created(&self) -> Option<&SeedLedger> {
        match self {
            SeedError::Aborted { created, .. } => Some(created),
            _ => None,
        }
    }
}
