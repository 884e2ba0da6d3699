use {super::*, std::path::Path};

pub(crate) trait PathExt {
  fn try_into_utf8(&self) -> Result<&Utf8Path>;
}

impl PathExt for Path {
  fn try_into_utf8(&self) -> Result<&Utf8Path> {
    Utf8Path::from_path(self).context(error::PathUnicode { path: self })
  }
}
