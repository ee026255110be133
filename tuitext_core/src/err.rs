//! Errors and results.

/// [`anyhow::Result`] with `T` if ok, [`anyhow::Error`] if error. Used only in
/// test/bench-internal glue, never on the public API surface.
pub type AnyResult<T> = anyhow::Result<T>;

/// All error kinds the public API can return.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CoreError {
  #[error("allocation failed")]
  OutOfMemory,

  #[error("index out of range: {what} {value} (limit {limit})")]
  InvalidIndex {
    what: &'static str,
    value: usize,
    limit: usize,
  },

  #[error("mem-id {0} is not a registered slot")]
  InvalidMemId(u8),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),
}

/// [`Result`] with `T` if ok, [`CoreError`] if error.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
  pub fn invalid_index(what: &'static str, value: usize, limit: usize) -> Self {
    CoreError::InvalidIndex { what, value, limit }
  }
}
