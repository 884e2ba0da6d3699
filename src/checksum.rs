use super::*;

/// BLAKE3 digest of a file's content, displayed as lowercase hex.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Checksum(blake3::Hash);

impl Checksum {
  const BLOCK: usize = 4096;

  #[cfg(test)]
  pub(crate) fn bytes(input: &[u8]) -> Self {
    Self(blake3::hash(input))
  }

  pub(crate) fn file(path: &Utf8Path) -> io::Result<Self> {
    Self::reader(File::open(path)?)
  }

  pub(crate) fn reader(mut read: impl Read) -> io::Result<Self> {
    let mut hasher = blake3::Hasher::new();

    let mut block = [0; Self::BLOCK];

    loop {
      let n = match read.read(&mut block) {
        Ok(0) => break,
        Ok(n) => n,
        Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
        Err(err) => return Err(err),
      };

      hasher.update(&block[..n]);
    }

    Ok(Self(hasher.finalize()))
  }
}

impl Display for Checksum {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for Checksum {
  type Err = blake3::HexError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self(s.parse()?))
  }
}
