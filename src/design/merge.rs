//! Merging caller overrides into a CI's current attributes.
//!
//! Overrides always win; there is no conflict detection. Each overridden key
//! has its owner property set to the caller's owner tag, and every other key
//! keeps whatever owner the server reported. Because of that, applying two
//! override sets in different orders can leave different owner provenance even
//! when the final values agree.

use crate::models::Attributes;

/// Owner tag recorded for attributes set through platform-component updates.
pub const OWNER_DESIGN: &str = "design";

/// Owner tag recorded by every other flow.
pub const OWNER_UNSET: &str = "";

/// Merged attribute and owner-property maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Merged {
    pub attributes: Attributes,
    pub owner_props: Attributes,
}

pub fn merge(
    existing_attributes: &Attributes,
    existing_owner_props: &Attributes,
    overrides: &Attributes,
    owner_tag: &str,
) -> Merged {
    let mut merged = Merged {
        attributes: existing_attributes.clone(),
        owner_props: existing_owner_props.clone(),
    };
    for (key, value) in overrides {
        merged.attributes.insert(key.clone(), value.clone());
        merged.owner_props.insert(key.clone(), owner_tag.to_string());
    }
    merged
}
