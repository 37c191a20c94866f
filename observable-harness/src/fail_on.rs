use clap::ValueEnum;

/// Which suite outcomes turn into a non-zero exit status.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum FailOn {
  /// Non-zero when any scenario failed (default).
  #[default]
  Any,
  /// Always zero.
  None,
}

impl FailOn {
  pub fn should_fail(&self, failed_scenarios: usize) -> bool {
    match self {
      FailOn::Any => failed_scenarios > 0,
      FailOn::None => false,
    }
  }
}
