use std::collections::BTreeMap;

pub struct Catalog {
    entries: BTreeMap<String, u32>,
}

impl Catalog {
    pub fn insert(&mut self, name: &str, value: u32) {
        self.entries.insert(name.to_string(), value);
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

fn main() {
    let mut catalog = Catalog::default();
    catalog.insert("accounts", 1);
    catalog.insert("billing", 2);
    println!("{} entries", catalog.entries.len());
}
