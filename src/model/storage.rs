use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// On-disk shape of the key-value store: a flat JSON object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageFile {
    pub entries: BTreeMap<String, String>,
}
