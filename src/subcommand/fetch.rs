use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Fetch {
  #[arg(long, help = "Download from the node at <FROM>.")]
  from: Address,
  #[arg(long, default_value = ".", help = "Save the file in <ROOT>.")]
  root: Utf8PathBuf,
  #[arg(help = "Download <FILENAME>.")]
  filename: String,
}

impl Fetch {
  pub(crate) fn run(self) -> Result {
    let path = Runtime::new()
      .context(error::Runtime)?
      .block_on(Library::new(self.root).fetch(&self.from, &self.filename))
      .context(error::Fetch {
        filename: &self.filename,
        from: self.from.clone(),
      })?;

    println!("File `{}` downloaded to `{path}`.", self.filename);

    Ok(())
  }
}
