use super::*;

/// A node's files and their checksums, keyed by filename. Checksums are
/// opaque strings, so the directory accepts whatever a node reports.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Inventory(BTreeMap<String, String>);

impl Inventory {
  /// Checksum every regular file directly inside `root`. Subdirectories are
  /// not descended into, and files that can't be read are left out.
  pub(crate) fn scan(root: &Utf8Path) -> Result<Self> {
    let mut files = BTreeMap::new();

    for result in WalkDir::new(root)
      .min_depth(1)
      .max_depth(1)
      .follow_links(true)
    {
      let entry = match result {
        Ok(entry) => entry,
        Err(err) if err.depth() == 0 => return Err(err).context(error::Scan { root }),
        Err(err) => {
          log::warn!("skipping unreadable entry in `{root}`: {err}");
          continue;
        }
      };

      if !entry.file_type().is_file() {
        continue;
      }

      let path = match entry.path().try_into_utf8() {
        Ok(path) => path,
        Err(err) => {
          log::warn!("skipping file: {err}");
          continue;
        }
      };

      let Some(filename) = path.file_name() else {
        continue;
      };

      match Checksum::file(path) {
        Ok(checksum) => {
          files.insert(filename.to_owned(), checksum.to_string());
        }
        Err(err) => log::warn!("could not read file `{path}`: {err}"),
      }
    }

    Ok(Self(files))
  }

  pub(crate) fn contains(&self, filename: &str) -> bool {
    self.0.contains_key(filename)
  }

  pub(crate) fn filenames(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .0
      .iter()
      .map(|(filename, checksum)| (filename.as_str(), checksum.as_str()))
  }

  pub(crate) fn len(&self) -> usize {
    self.0.len()
  }
}

impl FromIterator<(String, String)> for Inventory {
  fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}
