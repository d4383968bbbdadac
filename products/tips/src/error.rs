use platform_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TipsError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to encode slot {slot}")]
    Encode {
        slot: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type TipsResult<T> = Result<T, TipsError>;
