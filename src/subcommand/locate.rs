use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Locate {
  #[arg(
    long,
    default_value = "127.0.0.1:8000",
    help = "Query the directory at <DIRECTORY>."
  )]
  directory: Address,
  #[arg(help = "Find nodes registered as holding <FILENAME>.")]
  filename: String,
}

impl Locate {
  pub(crate) fn run(self) -> Result {
    let entries = self.entries()?;

    print!("{}", self.render(&entries));

    Ok(())
  }

  fn entries(&self) -> Result<Vec<Entry>> {
    Runtime::new()
      .context(error::Runtime)?
      .block_on(Client::new(self.directory.clone()).find_file(&self.filename))
      .context(error::Locate {
        directory: self.directory.clone(),
      })
  }

  fn render(&self, entries: &[Entry]) -> String {
    if entries.is_empty() {
      return format!("File `{}` not found in the network.\n", self.filename);
    }

    entries
      .iter()
      .map(|Entry { node, checksum }| format!("{node} {checksum}\n"))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use {super::*, crate::directory::Directory};

  fn locate(filename: &str, directory: Address) -> Locate {
    Locate {
      directory,
      filename: filename.into(),
    }
  }

  #[test]
  fn found() {
    let runtime = Runtime::new().unwrap();

    let directory = Arc::new(Directory::default());

    directory.register_file(
      Address::new("10.0.0.1", 8002),
      "report.txt".into(),
      "abc".into(),
    );
    directory.register_file(
      Address::new("10.0.0.2", 8002),
      "report.txt".into(),
      "def".into(),
    );

    let address = runtime.block_on(serve(directory));

    let locate = locate("report.txt", address);

    assert_eq!(
      locate.render(&locate.entries().unwrap()),
      "10.0.0.1:8002 abc\n10.0.0.2:8002 def\n",
    );
  }

  #[test]
  fn not_found() {
    let runtime = Runtime::new().unwrap();

    let (_directory, address) = runtime.block_on(directory());

    let locate = locate("ghost.txt", address);

    let entries = locate.entries().unwrap();

    assert!(entries.is_empty());

    assert_eq!(
      locate.render(&entries),
      "File `ghost.txt` not found in the network.\n",
    );
  }

  #[test]
  fn directory_unreachable() {
    let directory = unused_address();

    assert_matches!(
      locate("report.txt", directory.clone()).run().unwrap_err(),
      Error::Locate { directory: unreachable, .. }
      if unreachable == directory,
    );
  }
}
