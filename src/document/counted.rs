use serde::ser::{Serialize, SerializeStruct, Serializer};

/// List rendered as `<notes count="N"><note/>...</notes>`: an explicit count plus
/// one element per item named after `tag`.
#[derive(Debug, Clone, PartialEq)]
pub struct Counted<T> {
    tag: &'static str,
    items: Vec<T>,
}

impl<T> Counted<T> {
    pub const fn new(tag: &'static str, items: Vec<T>) -> Self {
        Self { tag, items }
    }

    pub const fn empty(tag: &'static str) -> Self {
        Self::new(tag, Vec::new())
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Serialize> Serialize for Counted<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Counted", 2)?;
        state.serialize_field("@count", &self.items.len())?;
        state.serialize_field(self.tag, &self.items)?;
        state.end()
    }
}

/// Element type of lists that are always written empty.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum Unused {}
