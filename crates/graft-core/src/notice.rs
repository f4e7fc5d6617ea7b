//! Transient user-facing notices (pending transaction, success, failure).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeKind {
  #[default]
  Default,
  Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub title:       String,
  pub description: String,
  pub kind:        NoticeKind,
}

impl Notice {
  pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      title:       title.into(),
      description: description.into(),
      kind:        NoticeKind::Default,
    }
  }

  pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      title:       title.into(),
      description: description.into(),
      kind:        NoticeKind::Destructive,
    }
  }

  pub fn is_error(&self) -> bool { self.kind == NoticeKind::Destructive }
}

/// Where components deliver their notices.
pub trait Notices {
  fn notify(&mut self, notice: Notice);
}

impl Notices for Vec<Notice> {
  fn notify(&mut self, notice: Notice) { self.push(notice); }
}
