use super::strings;
use super::Solutions;
use crate::data::Timestamp;
use crate::data::UserAuth;
use crate::data::UserBasic;
use crate::data::UserProfile;
use crate::data::UserSocial;
use crate::fixture::point_stream;
use crate::fixture::sequence_stream;
use crate::reference::ReferenceSolutions;
use crate::suite::Harness;
use crate::value::Value;
use observable_js::Observable;
use observable_js::Scheduler;
use std::collections::BTreeMap;

const RACE_SPACING: i64 = 5;

/// One single-value stream per string.
fn points(scheduler: &Scheduler, values: &[&str]) -> Vec<Observable<String>> {
  values
    .iter()
    .map(|value| point_stream(scheduler, value.to_string()))
    .collect()
}

pub(super) fn single_file(harness: &Harness, candidate: &dyn Solutions) -> Observable<bool> {
  let scheduler = harness.scheduler();
  let nums = vec![
    sequence_stream(scheduler, strings(&["1", "10"]), None),
    sequence_stream(scheduler, strings(&["-1", "3.14"]), None),
  ];
  let names = points(scheduler, &["alice", "bob"]);
  let mixed = vec![
    sequence_stream(scheduler, strings(&["2", "one"]), None),
    sequence_stream(scheduler, strings(&["3", "zero"]), None),
  ];
  let many = points(scheduler, &["1", "2", "3", "4", "5", "6"]);
  let fractions = points(scheduler, &["7.25", "0.5", "9.875"]);
  let reference = ReferenceSolutions;

  harness.all_pass(vec![
    harness.compare_success(
      "SingleFile Nums",
      candidate.single_file(nums.clone()),
      reference.single_file(nums),
    ),
    harness.compare_failure(
      "SingleFile NaN",
      candidate.single_file(names.clone()),
      reference.single_file(names),
    ),
    harness.compare_failure(
      "SingleFile Mixed",
      candidate.single_file(mixed.clone()),
      reference.single_file(mixed),
    ),
    harness.compare_success(
      "SingleFile Many Sources",
      candidate.single_file(many.clone()),
      reference.single_file(many),
    ),
    harness.compare_success(
      "SingleFile Fractions",
      candidate.single_file(fractions.clone()),
      reference.single_file(fractions),
    ),
  ])
}

pub(super) fn reunion(harness: &Harness, candidate: &dyn Solutions) -> Observable<bool> {
  let scheduler = harness.scheduler();
  let owners = sequence_stream(scheduler, strings(&["DanTori", "LeeDani", "Chritchell"]), None);
  let pets = sequence_stream(scheduler, strings(&["Peaches", "CocoMaya", "Frisket"]), None);
  let reference = ReferenceSolutions;

  harness.compare_success(
    "Reunion",
    candidate.reunion(owners.clone(), pets.clone()),
    reference.reunion(owners, pets),
  )
}

pub(super) fn all_the_facts(harness: &Harness, candidate: &dyn Solutions) -> Observable<bool> {
  let scheduler = harness.scheduler();
  let reference = ReferenceSolutions;
  let cases = [
    ("ShowAlert", [true, true, true]),
    ("Wait", [true, true, false]),
    ("Noop1", [true, false, true]),
    ("Noop2", [false, true, true]),
  ];

  harness.all_pass(
    cases
      .into_iter()
      .map(|(name, flags)| {
        let [global, mentioned, was_mentioned] = flags.map(|flag| point_stream(scheduler, flag));
        harness.compare_success(
          format!("AllTheFacts {name}"),
          candidate.all_the_facts(global.clone(), mentioned.clone(), was_mentioned.clone()),
          reference.all_the_facts(global, mentioned, was_mentioned),
        )
      })
      .collect(),
  )
}

pub(super) fn aesop(harness: &Harness, candidate: &dyn Solutions) -> Observable<bool> {
  let scheduler = harness.scheduler();
  let tortoise = sequence_stream(scheduler, vec![5.0, 4.0, 3.0, 2.0, 1.0, 0.0], Some(RACE_SPACING));
  let hare = sequence_stream(scheduler, vec![3.0, 2.0, 1.0, 0.0, 0.0, 0.0], Some(RACE_SPACING));
  let reference = ReferenceSolutions;

  harness.all_pass(vec![
    harness.compare_success(
      "Aesop 1",
      candidate.aesop(hare.clone(), tortoise.clone()),
      reference.aesop(hare.clone(), tortoise.clone()),
    ),
    harness.compare_success(
      "Aesop 2",
      candidate.aesop(tortoise.clone(), hare.clone()),
      reference.aesop(tortoise, hare),
    ),
  ])
}

pub(super) fn not_chunky(harness: &Harness, candidate: &dyn Solutions) -> Observable<bool> {
  let scheduler = harness.scheduler();
  let basic = Observable::just(UserBasic {
    user_name: "Norma Jean".to_string(),
    last_login: Timestamp(-1375473600000.0),
  })
  .delay(scheduler, 10);
  let auth = Observable::just(UserAuth {
    last_password_changed: Timestamp(-233784000000.0),
    groups: strings(&["actress", "model", "singer"]),
  })
  .delay(scheduler, 50);
  let profile = Observable::just(UserProfile {
    avatar_path: "imgs/MM".to_string(),
    preferences: BTreeMap::from([("drink".to_string(), Value::from("champagne"))]),
  })
  .delay(scheduler, 100);
  let social = Observable::just(UserSocial {
    friend_list: strings(&["Amy Greene", "Ella Fitzgerald"]),
  })
  .delay(scheduler, 150);
  let reference = ReferenceSolutions;

  harness.compare_success(
    "Not Chunky",
    candidate.not_chunky(basic.clone(), auth.clone(), profile.clone(), social.clone()),
    reference.not_chunky(basic, auth, profile, social),
  )
}
