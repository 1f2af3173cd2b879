//! Canonical re-serialization of the effective configuration.

use crate::store::ConfigStore;

impl ConfigStore {
    /// Serialize every currently-set key as `key = value` source text, one
    /// line per key in sorted order, using each kind's canonical text form.
    /// Absent fields are omitted, so loading the output into a fresh store
    /// and finalizing reproduces the same values and the same absences.
    /// Reads live state: a `set` after finalize shows up in the next call.
    pub fn export(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.entries() {
            out.push_str(key);
            out.push_str(" = ");
            out.push_str(&value.render());
            out.push('\n');
        }
        out
    }
}
