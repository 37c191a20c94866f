//! Record types flowing through the exercises.
//!
//! Each converts into a [`Value`] so the comparer can inspect it; record keys keep the field names
//! the exercises are phrased in (`UserName`, `FriendList`, ...).

use crate::value::Value;
use std::collections::BTreeMap;

/// Decision produced by the AllTheFacts exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertOp {
  ShowAlert,
  Wait,
  Noop,
}

impl AlertOp {
  pub fn as_str(self) -> &'static str {
    match self {
      AlertOp::ShowAlert => "ShowAlert",
      AlertOp::Wait => "Wait",
      AlertOp::Noop => "Noop",
    }
  }
}

impl From<AlertOp> for Value {
  fn from(op: AlertOp) -> Self {
    Value::from(op.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReunionNames {
  pub owner: String,
  pub pet: String,
}

impl From<ReunionNames> for Value {
  fn from(names: ReunionNames) -> Self {
    Value::record([("owner", names.owner), ("pet", names.pet)])
  }
}

/// An instant in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timestamp(pub f64);

impl From<Timestamp> for Value {
  fn from(ts: Timestamp) -> Self {
    Value::date(ts.0)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserBasic {
  pub user_name: String,
  pub last_login: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserAuth {
  pub last_password_changed: Timestamp,
  pub groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
  pub avatar_path: String,
  pub preferences: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserSocial {
  pub friend_list: Vec<String>,
}

/// A user assembled from any subset of its parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialUser {
  pub user_name: Option<String>,
  pub last_login: Option<Timestamp>,
  pub last_password_changed: Option<Timestamp>,
  pub groups: Option<Vec<String>>,
  pub avatar_path: Option<String>,
  pub preferences: Option<BTreeMap<String, Value>>,
  pub friend_list: Option<Vec<String>>,
}

impl PartialUser {
  /// Overwrite every field that `part` carries, keeping the rest.
  pub fn assign(mut self, part: PartialUser) -> Self {
    fn merge<T>(slot: &mut Option<T>, incoming: Option<T>) {
      if incoming.is_some() {
        *slot = incoming;
      }
    }
    merge(&mut self.user_name, part.user_name);
    merge(&mut self.last_login, part.last_login);
    merge(&mut self.last_password_changed, part.last_password_changed);
    merge(&mut self.groups, part.groups);
    merge(&mut self.avatar_path, part.avatar_path);
    merge(&mut self.preferences, part.preferences);
    merge(&mut self.friend_list, part.friend_list);
    self
  }
}

impl From<UserBasic> for PartialUser {
  fn from(basic: UserBasic) -> Self {
    PartialUser {
      user_name: Some(basic.user_name),
      last_login: Some(basic.last_login),
      ..Default::default()
    }
  }
}

impl From<UserAuth> for PartialUser {
  fn from(auth: UserAuth) -> Self {
    PartialUser {
      last_password_changed: Some(auth.last_password_changed),
      groups: Some(auth.groups),
      ..Default::default()
    }
  }
}

impl From<UserProfile> for PartialUser {
  fn from(profile: UserProfile) -> Self {
    PartialUser {
      avatar_path: Some(profile.avatar_path),
      preferences: Some(profile.preferences),
      ..Default::default()
    }
  }
}

impl From<UserSocial> for PartialUser {
  fn from(social: UserSocial) -> Self {
    PartialUser {
      friend_list: Some(social.friend_list),
      ..Default::default()
    }
  }
}

impl From<PartialUser> for Value {
  fn from(user: PartialUser) -> Self {
    Value::record([
      ("UserName", Value::from(user.user_name)),
      ("LastLogin", Value::from(user.last_login)),
      ("LastPasswordChanged", Value::from(user.last_password_changed)),
      ("Groups", Value::from(user.groups)),
      ("AvatarPath", Value::from(user.avatar_path)),
      ("Preferences", Value::from(user.preferences)),
      ("FriendList", Value::from(user.friend_list)),
    ])
  }
}
