/// Failure signal carried by a stream's error notification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
  /// A failure raised by a producer or by a fallible operator such as [`Observable::try_map`].
  ///
  /// [`Observable::try_map`]: crate::Observable::try_map
  #[error("{0}")]
  Thrown(String),

  /// No notification arrived within the window given to [`Observable::timeout`].
  ///
  /// [`Observable::timeout`]: crate::Observable::timeout
  #[error("timeout has occurred after {after} time units")]
  Timeout { after: u64 },
}

impl StreamError {
  pub fn thrown(message: impl Into<String>) -> Self {
    Self::Thrown(message.into())
  }

  pub fn is_timeout(&self) -> bool {
    matches!(self, StreamError::Timeout { .. })
  }
}
