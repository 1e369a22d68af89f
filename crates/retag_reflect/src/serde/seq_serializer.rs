use serde_core::ser::{Serialize, SerializeSeq, Serializer};

use super::SerializeDriver;

/// A serializer for arrays and lists.
pub(super) struct SeqSerializer<'a, 'b, 'k> {
    pub driver: &'b SerializeDriver<'a, 'k>,
}

impl Serialize for SeqSerializer<'_, '_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.driver.value();
        let mut state = serializer.serialize_seq(value.len())?;
        for item in value.items() {
            state.serialize_element(&self.driver.with_value(item))?;
        }
        state.end()
    }
}
