/// Reconsolidation subsystem errors.
///
/// The executor folds these into report notes instead of propagating them.
#[derive(Debug, thiserror::Error)]
pub enum ReconsolidationError {
    #[error("supersession references draft {index} but only {created} memories were created")]
    DraftIndexOutOfRange { index: usize, created: usize },
}
