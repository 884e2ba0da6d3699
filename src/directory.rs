use super::*;

/// One `register_file` record: a node claimed to hold a file with this
/// checksum.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct Entry {
  #[serde(flatten)]
  pub(crate) node: Address,
  pub(crate) checksum: String,
}

/// Registry of which node holds which file.
///
/// Two views are kept. The node map holds each node's most recently
/// registered inventory, replaced wholesale on every `register_node`. The
/// file index is an append-only log of `register_file` calls that is never
/// deduplicated or pruned, so it may list files a node no longer reports.
/// `find_file` answers from the file index and `find_node_with_file` from the
/// node map.
///
/// Both views sit behind one lock, held for the duration of each operation,
/// so operations are atomic individually but not as a sequence.
#[derive(Default)]
pub(crate) struct Directory {
  state: Mutex<State>,
}

#[derive(Default)]
struct State {
  files: HashMap<String, Vec<Entry>>,
  // first-registration order, which `find_node_with_file` scans in
  nodes: Vec<(Address, Inventory)>,
}

impl Directory {
  pub(crate) const AUDIT_INTERVAL: Duration = Duration::from_secs(5);

  fn state(&self) -> MutexGuard<'_, State> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub(crate) fn register_node(&self, node: Address, inventory: Inventory) -> bool {
    log::info!("registering node {node} with {} files", inventory.len());

    let mut state = self.state();

    match state.nodes.iter_mut().find(|(address, _)| *address == node) {
      Some((_, existing)) => *existing = inventory,
      None => state.nodes.push((node, inventory)),
    }

    true
  }

  pub(crate) fn register_file(&self, node: Address, filename: String, checksum: String) -> bool {
    log::debug!("registering `{filename}` on node {node}");

    self
      .state()
      .files
      .entry(filename)
      .or_default()
      .push(Entry { node, checksum });

    true
  }

  pub(crate) fn find_file(&self, filename: &str) -> Vec<Entry> {
    self
      .state()
      .files
      .get(filename)
      .cloned()
      .unwrap_or_default()
  }

  pub(crate) fn find_node_with_file(&self, filename: &str) -> Option<Address> {
    self
      .state()
      .nodes
      .iter()
      .find(|(_, inventory)| inventory.contains(filename))
      .map(|(address, _)| address.clone())
  }

  pub(crate) fn nodes(&self) -> Vec<(Address, Inventory)> {
    self.state().nodes.clone()
  }

  pub(crate) fn audit(&self) -> String {
    let mut report = String::from("directory audit:\n");

    for (node, inventory) in self.nodes() {
      if inventory.is_empty() {
        report.push_str(&format!("node {node} has no files\n"));
        continue;
      }

      report.push_str(&format!("node {node} has files:\n"));

      for filename in inventory.filenames() {
        report.push_str(&format!("- {filename}\n"));
      }
    }

    report
  }

  /// Print the audit report every `interval`, forever.
  pub(crate) async fn audit_loop(&self, interval: Duration) {
    let mut interval = tokio::time::interval(interval);

    loop {
      interval.tick().await;
      println!("{}", self.audit());
    }
  }
}

impl Service for Directory {
  fn dispatch(&self, request: Request) -> Response {
    match request {
      Request::RegisterNode {
        host,
        port,
        inventory,
      } => Response::result(self.register_node(Address::new(host, port), inventory)),
      Request::RegisterFile {
        host,
        port,
        filename,
        checksum,
      } => Response::result(self.register_file(Address::new(host, port), filename, checksum)),
      Request::FindFile { filename } => Response::result(self.find_file(&filename)),
      Request::FindNodeWithFile { filename } => {
        Response::result(self.find_node_with_file(&filename))
      }
      Request::Download { .. } => Fault::unsupported(&request).into(),
    }
  }
}
