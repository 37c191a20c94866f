//! The trusted transformation for every exercise.

use crate::data::AlertOp;
use crate::data::PartialUser;
use crate::data::ReunionNames;
use crate::data::UserAuth;
use crate::data::UserBasic;
use crate::data::UserProfile;
use crate::data::UserSocial;
use crate::exercises::Solutions;
use observable_js::Observable;
use observable_js::StreamError;

const TWINS_SEED: f64 = 6.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceSolutions;

impl Solutions for ReferenceSolutions {
  fn example_echo(&self, source: Observable<String>) -> Observable<String> {
    source.map(|text| format!("Echo:{text}"))
  }

  fn newline_tokenization(&self, source: Observable<String>) -> Observable<String> {
    source.switch_map(|text| Observable::of(text.split('\n').map(str::to_owned).collect::<Vec<_>>()))
  }

  fn multiply(&self, source: Observable<Option<f64>>) -> Observable<f64> {
    source.filter_map(|n| n.map(|n| n * 10.0))
  }

  fn single_file(&self, sources: Vec<Observable<String>>) -> Observable<f64> {
    Observable::concat(sources).try_map(|text| {
      parse_number(&text)
        .ok_or_else(|| StreamError::thrown(format!("cannot convert {text:?} to a number")))
    })
  }

  fn reunion(&self, owners: Observable<String>, pets: Observable<String>) -> Observable<ReunionNames> {
    owners
      .zip_with(pets)
      .map(|(owner, pet)| ReunionNames { owner, pet })
  }

  fn all_the_facts(
    &self,
    global_allow_alerts: Observable<bool>,
    mentioned_alerts: Observable<bool>,
    was_mentioned: Observable<bool>,
  ) -> Observable<AlertOp> {
    Observable::fork_join(vec![global_allow_alerts, mentioned_alerts, was_mentioned]).filter_map(
      |flags| match flags[..] {
        [global, mentioned, _] if !global || !mentioned => Some(AlertOp::Noop),
        [_, _, true] => Some(AlertOp::ShowAlert),
        [_, _, false] => Some(AlertOp::Wait),
        _ => None,
      },
    )
  }

  fn twins(&self, source: Observable<f64>) -> Observable<f64> {
    Observable::merge(vec![Observable::just(TWINS_SEED), source])
      .pairwise()
      .map(|(previous, current)| previous + current)
  }

  fn aesop(&self, hare: Observable<f64>, tortoise: Observable<f64>) -> Observable<String> {
    let first_zero = |racer: Observable<f64>, name: &'static str| {
      racer.filter(|n| *n == 0.0).map(move |_| name.to_string())
    };
    Observable::race(vec![
      first_zero(tortoise, "Tortoise"),
      first_zero(hare, "Hare"),
    ])
    .take(1)
  }

  fn not_chunky(
    &self,
    basic: Observable<UserBasic>,
    auth: Observable<UserAuth>,
    profile: Observable<UserProfile>,
    social: Observable<UserSocial>,
  ) -> Observable<PartialUser> {
    Observable::merge(vec![
      basic.map(PartialUser::from),
      auth.map(PartialUser::from),
      profile.map(PartialUser::from),
      social.map(PartialUser::from),
    ])
    .start_with([PartialUser::default()])
    .scan(PartialUser::default(), PartialUser::assign)
  }
}

/// Convert a string to a number the way JavaScript's `Number(..)` does, returning `None` where
/// that would produce `NaN`.
pub fn parse_number(text: &str) -> Option<f64> {
  let text = text.trim();
  match text {
    "" => return Some(0.0),
    "Infinity" | "+Infinity" => return Some(f64::INFINITY),
    "-Infinity" => return Some(f64::NEG_INFINITY),
    _ => {}
  }
  let radix = match text.get(..2).map(str::to_ascii_lowercase).as_deref() {
    Some("0x") => Some(16),
    Some("0o") => Some(8),
    Some("0b") => Some(2),
    _ => None,
  };
  if let Some(radix) = radix {
    let digits = &text[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
      return None;
    }
    return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
  }
  let decimal = text
    .chars()
    .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
  if !decimal {
    return None;
  }
  text.parse().ok()
}
