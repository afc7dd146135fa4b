/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Component label mapping.
//!
//! Maps component indexes to semantic labels and back. Labels are matched
//! either verbatim (`"Party Identifier"`) or by their interchange key
//! (`"partyIdentifier"`), the camel-case form used in label maps and JSON.

use crate::schema::FieldDescriptor;

/// Returns the label of the 1-based component `index`.
#[must_use]
pub fn label_of(descriptor: &FieldDescriptor, index: usize) -> Option<&str> {
    descriptor.component(index).map(|c| c.label.as_str())
}

/// Returns the 1-based index of the component matching `label`.
///
/// Exact labels and exact keys are tried first, then a case-insensitive key
/// match.
#[must_use]
pub fn index_of_label(descriptor: &FieldDescriptor, label: &str) -> Option<usize> {
    let components = descriptor.components();
    components
        .iter()
        .find(|c| c.label == label || c.key == label)
        .or_else(|| {
            let wanted = label_key(label);
            components
                .iter()
                .find(|c| c.key.eq_ignore_ascii_case(&wanted))
        })
        .map(|c| c.index)
}

/// Derives the camel-case interchange key of a label.
///
/// Words are split on any non-alphanumeric character: `"Name And Address 2"`
/// becomes `nameAndAddress2` and `"D/C Mark"` becomes `dCMark`.
#[must_use]
pub fn label_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    for (i, word) in label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        let lower = word.to_ascii_lowercase();
        if i == 0 {
            key.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                key.push(first.to_ascii_uppercase());
                key.push_str(chars.as_str());
            }
        }
    }
    key
}
