//! The exercise catalogue.
//!
//! Every exercise names a stream transformation to implement, builds fixed fixtures for it, and
//! compares a candidate implementation against the trusted one scenario by scenario.

mod combining;
mod single_source;

use crate::data::AlertOp;
use crate::data::PartialUser;
use crate::data::ReunionNames;
use crate::data::UserAuth;
use crate::data::UserBasic;
use crate::data::UserProfile;
use crate::data::UserSocial;
use crate::suite::Harness;
use clap::ValueEnum;
use observable_js::Observable;
use serde::Serialize;

/// One implementation of every exercise's transformation.
///
/// Implementations must be pure recipes: they compose operators over the given sources and must
/// not subscribe to them.
pub trait Solutions {
  /// Prefix every string with `Echo:`. Failures must propagate.
  fn example_echo(&self, source: Observable<String>) -> Observable<String>;

  /// Split each string on `\n` and emit the pieces one by one.
  fn newline_tokenization(&self, source: Observable<String>) -> Observable<String>;

  /// Multiply every number by 10, skipping absent values.
  fn multiply(&self, source: Observable<Option<f64>>) -> Observable<f64>;

  /// Read the sources one after another and parse every string as a number, failing on the first
  /// string that is not one.
  fn single_file(&self, sources: Vec<Observable<String>>) -> Observable<f64>;

  /// Pair owners with pets positionally.
  fn reunion(&self, owners: Observable<String>, pets: Observable<String>) -> Observable<ReunionNames>;

  /// Decide the alert once all three preferences are known:
  /// `(T,T,T)` shows it, `(T,T,F)` waits, anything else is a no-op.
  fn all_the_facts(
    &self,
    global_allow_alerts: Observable<bool>,
    mentioned_alerts: Observable<bool>,
    was_mentioned: Observable<bool>,
  ) -> Observable<AlertOp>;

  /// Add each number to the previous one, treating `6` as the value before the first.
  fn twins(&self, source: Observable<f64>) -> Observable<f64>;

  /// Emit `"Hare"` or `"Tortoise"` for whichever stream emits a zero first.
  fn aesop(&self, hare: Observable<f64>, tortoise: Observable<f64>) -> Observable<String>;

  /// Merge the user parts as they arrive, emitting an empty user first and then every
  /// accumulated state.
  fn not_chunky(
    &self,
    basic: Observable<UserBasic>,
    auth: Observable<UserAuth>,
    profile: Observable<UserProfile>,
    social: Observable<UserSocial>,
  ) -> Observable<PartialUser>;
}

fn strings(values: &[&str]) -> Vec<String> {
  values.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Exercise {
  ExampleEcho,
  NewlineTokenization,
  Multiply,
  SingleFile,
  Reunion,
  AllTheFacts,
  Twins,
  Aesop,
  NotChunky,
}

impl Exercise {
  /// Every exercise, in authoring order.
  pub const ALL: [Exercise; 9] = [
    Exercise::ExampleEcho,
    Exercise::NewlineTokenization,
    Exercise::Multiply,
    Exercise::SingleFile,
    Exercise::Reunion,
    Exercise::AllTheFacts,
    Exercise::Twins,
    Exercise::Aesop,
    Exercise::NotChunky,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Exercise::ExampleEcho => "ExampleEcho",
      Exercise::NewlineTokenization => "NewlineTokenization",
      Exercise::Multiply => "Multiply",
      Exercise::SingleFile => "SingleFile",
      Exercise::Reunion => "Reunion",
      Exercise::AllTheFacts => "AllTheFacts",
      Exercise::Twins => "Twins",
      Exercise::Aesop => "Aesop",
      Exercise::NotChunky => "NotChunky",
    }
  }

  /// Build this exercise's scenarios for `candidate` and fold them into one verdict.
  pub fn drive(self, harness: &Harness, candidate: &dyn Solutions) -> Observable<bool> {
    tracing::debug!(exercise = self.name(), "building scenarios");
    match self {
      Exercise::ExampleEcho => single_source::example_echo(harness, candidate),
      Exercise::NewlineTokenization => single_source::newline_tokenization(harness, candidate),
      Exercise::Multiply => single_source::multiply(harness, candidate),
      Exercise::SingleFile => combining::single_file(harness, candidate),
      Exercise::Reunion => combining::reunion(harness, candidate),
      Exercise::AllTheFacts => combining::all_the_facts(harness, candidate),
      Exercise::Twins => single_source::twins(harness, candidate),
      Exercise::Aesop => combining::aesop(harness, candidate),
      Exercise::NotChunky => combining::not_chunky(harness, candidate),
    }
  }
}
