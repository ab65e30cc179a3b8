use hashbrown::HashMap;

/// Converts a list of labels into the ordered set of unique labels and a list of indices into it.
/// Labels are numbered in order of first appearance.
#[derive(Debug)]
pub struct EncodeIndex<'a> {
    pub labels: Vec<&'a str>,
    pub encoding: Vec<usize>,
}
impl<'a> EncodeIndex<'a> {
    pub fn new<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let labels = labels.into_iter();
        let mut map: HashMap<&str, usize> = HashMap::with_capacity(labels.size_hint().0);
        let mut unique = Vec::new();
        let mut encoding = Vec::with_capacity(labels.size_hint().0);
        for label in labels {
            if let Some(e) = map.get(label) {
                encoding.push(*e);
            } else {
                map.insert(label, unique.len());
                encoding.push(unique.len());
                unique.push(label);
            }
        }
        EncodeIndex {
            labels: unique,
            encoding,
        }
    }

    pub fn encoding(&self) -> &[usize] {
        &self.encoding
    }

    pub fn labels(&self) -> &[&'a str] {
        &self.labels
    }

    /// Number of unique labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
