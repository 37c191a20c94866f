//! The candidate's workbook.
//!
//! ExampleEcho is solved as a worked example; every other exercise returns a placeholder stream
//! that fails its scenarios until it is replaced with a real pipeline.

use crate::context::ReportContext;
use crate::data::AlertOp;
use crate::data::PartialUser;
use crate::data::ReunionNames;
use crate::data::UserAuth;
use crate::data::UserBasic;
use crate::data::UserProfile;
use crate::data::UserSocial;
use crate::debug::log_everything;
use crate::debug::LogFlags;
use crate::exercises::Solutions;
use observable_js::Observable;

#[derive(Debug, Clone)]
pub struct Workbook {
  context: ReportContext,
}

impl Workbook {
  /// `context` receives the output of the workbook's debugging taps.
  pub fn new(context: &ReportContext) -> Self {
    Self {
      context: context.clone(),
    }
  }
}

impl Solutions for Workbook {
  fn example_echo(&self, source: Observable<String>) -> Observable<String> {
    let before = log_everything(&source, &self.context, "Before Echo", LogFlags::ALL);
    let echoed = before.map(|text| format!("Echo:{text}"));
    log_everything(&echoed, &self.context, "After Echo", LogFlags::NEXT_ONLY)
  }

  fn newline_tokenization(&self, _source: Observable<String>) -> Observable<String> {
    Observable::just(String::new())
  }

  fn multiply(&self, _source: Observable<Option<f64>>) -> Observable<f64> {
    Observable::just(0.0)
  }

  fn single_file(&self, _sources: Vec<Observable<String>>) -> Observable<f64> {
    Observable::just(1.0)
  }

  fn reunion(&self, _owners: Observable<String>, _pets: Observable<String>) -> Observable<ReunionNames> {
    Observable::just(ReunionNames {
      owner: String::new(),
      pet: String::new(),
    })
  }

  fn all_the_facts(
    &self,
    _global_allow_alerts: Observable<bool>,
    _mentioned_alerts: Observable<bool>,
    _was_mentioned: Observable<bool>,
  ) -> Observable<AlertOp> {
    Observable::empty()
  }

  fn twins(&self, _source: Observable<f64>) -> Observable<f64> {
    Observable::just(-12345.0)
  }

  fn aesop(&self, _hare: Observable<f64>, _tortoise: Observable<f64>) -> Observable<String> {
    Observable::just("Deer".to_string())
  }

  fn not_chunky(
    &self,
    _basic: Observable<UserBasic>,
    _auth: Observable<UserAuth>,
    _profile: Observable<UserProfile>,
    _social: Observable<UserSocial>,
  ) -> Observable<PartialUser> {
    Observable::just(PartialUser::default())
  }
}
