/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Shared helpers for the IronSwift examples.

use ironswift_core::Tag;
use ironswift_core::error::FieldError;

/// A customer transfer body as ordered tags.
///
/// # Errors
/// Returns `FieldError::InvalidTagName` if a sample tag name is not valid.
pub fn sample_transfer() -> Result<Vec<Tag>, FieldError> {
    Ok(vec![
        Tag::new("20", "REF-2009-0115")?,
        Tag::new("23B", "CRED")?,
        Tag::new("32A", "090115EUR1234,56")?,
        Tag::new("50F", "/ACC/123456\r\n1/JOHN DOE\r\n2/MAIN STREET 1")?,
        Tag::new("59", "/DE89370400440532013000\r\nJANE ROE\r\nBERLIN")?,
        Tag::new("70", "INVOICE 4711\r\nTHANK YOU")?,
        Tag::new("71A", "SHA")?,
    ])
}
