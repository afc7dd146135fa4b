/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Typed field bindings.
//!
//! [`field_binding!`](crate::field_binding) generates a newtype over
//! [`Field`](crate::Field) for one field type of the standard registry, with
//! named accessors for its components. The bindings below cover the most
//! commonly used field types; others can be declared the same way.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Declares a typed binding for a field type of the standard registry.
///
/// Each component entry names the 1-based index and a getter/setter pair.
///
/// ```ignore
/// field_binding! {
///     /// Sender's reference.
///     Field20 => "20" {
///         1 => reference / set_reference,
///     }
/// }
/// ```
#[macro_export]
macro_rules! field_binding {
    (
        $(#[$meta:meta])*
        $binding:ident => $name:literal {
            $( $index:literal => $getter:ident / $setter:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $binding($crate::Field);

        impl $binding {
            /// Field name of this binding.
            pub const NAME: &'static str = $name;

            /// Returns the descriptor from the standard registry.
            ///
            /// # Errors
            /// Returns `FieldError::UnknownField` if the standard registry
            /// does not define the field type.
            pub fn registered_descriptor() -> ::std::result::Result<
                &'static ::std::sync::Arc<$crate::FieldDescriptor>,
                $crate::FieldError,
            > {
                $crate::Registry::standard()
                    .lookup(Self::NAME)
                    .ok_or_else(|| $crate::FieldError::UnknownField(Self::NAME.to_string()))
            }

            /// Creates a binding with every component absent.
            ///
            /// # Errors
            /// Returns `FieldError::UnknownField` if the field type is not
            /// registered.
            pub fn new() -> ::std::result::Result<Self, $crate::FieldError> {
                Ok(Self($crate::Field::new(::std::sync::Arc::clone(Self::registered_descriptor()?))))
            }

            /// Parses a raw wire value.
            ///
            /// # Errors
            /// Returns `FieldError::UnknownField` if the field type is not
            /// registered.
            pub fn parse(value: &str) -> ::std::result::Result<Self, $crate::FieldError> {
                Ok(Self($crate::Field::from_value(
                    ::std::sync::Arc::clone(Self::registered_descriptor()?),
                    value,
                )))
            }

            /// Creates a binding from a tag of the same name.
            ///
            /// # Errors
            /// Returns `FieldError::NameMismatch` if the tag has another name.
            pub fn from_tag(tag: &$crate::Tag) -> ::std::result::Result<Self, $crate::FieldError> {
                $crate::Field::from_tag(::std::sync::Arc::clone(Self::registered_descriptor()?), tag).map(Self)
            }

            /// Returns the first tag of this type as a binding.
            pub fn get_first<'a, I>(tags: I) -> Option<Self>
            where
                I: IntoIterator<Item = &'a $crate::Tag>,
            {
                $crate::FieldLookup::get_first($crate::Registry::standard(), tags, Self::NAME).map(Self)
            }

            /// Returns every tag of this type as a binding, in order.
            pub fn get_all<'a, I>(tags: I) -> Vec<Self>
            where
                I: IntoIterator<Item = &'a $crate::Tag>,
            {
                $crate::FieldLookup::get_all($crate::Registry::standard(), tags, Self::NAME)
                    .into_iter()
                    .map(Self)
                    .collect()
            }

            /// Returns the underlying field.
            #[must_use]
            pub fn into_inner(self) -> $crate::Field {
                self.0
            }

            $(
                #[doc = concat!("Returns component ", stringify!($index), ".")]
                #[must_use]
                pub fn $getter(&self) -> Option<&str> {
                    self.0.component($index)
                }

                #[doc = concat!("Sets component ", stringify!($index), ".")]
                ///
                /// # Errors
                /// Returns `FieldError::IndexOutOfRange` if the registered
                /// descriptor has fewer components.
                pub fn $setter(
                    &mut self,
                    value: impl Into<String>,
                ) -> ::std::result::Result<Option<$crate::ValidationFailure>, $crate::FieldError> {
                    self.0.set_component($index, value)
                }
            )*
        }

        impl ::std::ops::Deref for $binding {
            type Target = $crate::Field;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::std::ops::DerefMut for $binding {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl From<$binding> for $crate::Field {
            fn from(binding: $binding) -> Self {
                binding.0
            }
        }

        impl TryFrom<$crate::Field> for $binding {
            type Error = $crate::FieldError;

            fn try_from(field: $crate::Field) -> ::std::result::Result<Self, Self::Error> {
                if field.name().as_str() == Self::NAME {
                    Ok(Self(field))
                } else {
                    Err($crate::FieldError::NameMismatch {
                        expected: Self::NAME.to_string(),
                        found: field.name().to_string(),
                    })
                }
            }
        }

        impl ::std::fmt::Display for $binding {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

field_binding! {
    /// Sender's reference.
    Field20 => "20" {
        1 => reference / set_reference,
    }
}

field_binding! {
    /// Value date, currency and interbank settled amount.
    Field32A => "32A" {
        1 => date / set_date,
        2 => currency / set_currency,
        3 => amount / set_amount,
    }
}

impl Field32A {
    /// Returns the value date.
    #[must_use]
    pub fn value_date(&self) -> Option<NaiveDate> {
        self.component_as_date(1)
    }

    /// Returns the amount as a decimal.
    #[must_use]
    pub fn amount_decimal(&self) -> Option<Decimal> {
        self.component_as_decimal(3)
    }
}

field_binding! {
    /// Ordering customer identified by party identifier and address lines.
    Field50F => "50F" {
        1 => party_identifier / set_party_identifier,
        2 => name_and_address / set_name_and_address,
        3 => name_and_address_2 / set_name_and_address_2,
        4 => name_and_address_3 / set_name_and_address_3,
        5 => name_and_address_4 / set_name_and_address_4,
    }
}

field_binding! {
    /// Ordering customer identified by account and address lines.
    Field50K => "50K" {
        1 => account / set_account,
        2 => name_and_address / set_name_and_address,
        3 => name_and_address_2 / set_name_and_address_2,
        4 => name_and_address_3 / set_name_and_address_3,
        5 => name_and_address_4 / set_name_and_address_4,
    }
}

field_binding! {
    /// Beneficiary customer.
    Field59 => "59" {
        1 => account / set_account,
        2 => name_and_address / set_name_and_address,
        3 => name_and_address_2 / set_name_and_address_2,
        4 => name_and_address_3 / set_name_and_address_3,
        5 => name_and_address_4 / set_name_and_address_4,
    }
}

field_binding! {
    /// Party identified by BIC.
    Field95P => "95P" {
        1 => qualifier / set_qualifier,
        2 => bic / set_bic,
    }
}

field_binding! {
    /// Indicator with optional data source scheme.
    Field22F => "22F" {
        1 => qualifier / set_qualifier,
        2 => data_source_scheme / set_data_source_scheme,
        3 => indicator / set_indicator,
    }
}

field_binding! {
    /// Qualified date and time.
    Field98C => "98C" {
        1 => qualifier / set_qualifier,
        2 => date / set_date,
        3 => time / set_time,
    }
}

impl Field98C {
    /// Returns the date and time combined.
    #[must_use]
    pub fn date_time(&self) -> Option<NaiveDateTime> {
        Some(self.component_as_date(2)?.and_time(self.component_as_time(3)?))
    }
}

field_binding! {
    /// Free-format narrative.
    Field79 => "79" {
        1 => narrative / set_narrative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;
    use ironswift_core::error::FieldError;
    use ironswift_core::tag::Tag;

    #[test]
    fn test_party_identifier_binding() {
        let field = Field50F::parse("/ACC/123456\nJOHN DOE").unwrap();
        assert_eq!(field.party_identifier(), Some("/ACC/123456"));
        assert_eq!(field.name_and_address(), Some("JOHN DOE"));
        assert_eq!(field.name_and_address_2(), None);
    }

    #[test]
    fn test_build_and_read_back() {
        let mut field = Field50K::new().unwrap();
        field.set_account("DE89").unwrap();
        field.set_name_and_address("JOHN DOE").unwrap();
        let tag = field.to_tag();
        assert_eq!(tag.value(), "/DE89\r\nJOHN DOE");
        let back = Field50K::from_tag(&tag).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_typed_accessors() {
        let field = Field32A::parse("090115EUR1234,56").unwrap();
        assert_eq!(field.value_date(), NaiveDate::from_ymd_opt(2009, 1, 15));
        assert_eq!(field.amount_decimal(), Some(Decimal::new(123_456, 2)));
        assert_eq!(field.currency(), Some("EUR"));

        let field = Field98C::parse(":PREP//20090115120000").unwrap();
        let expected = NaiveDate::from_ymd_opt(2009, 1, 15)
            .and_then(|d| d.and_hms_opt(12, 0, 0));
        assert_eq!(field.date_time(), expected);
    }

    #[test]
    fn test_lookup_bindings() {
        let tags = vec![
            Tag::new("20", "REF1").unwrap(),
            Tag::new("95P", ":SELL//ABCDEFGH").unwrap(),
            Tag::new("95P", ":BUYR//IJKLMNOP").unwrap(),
        ];
        assert_eq!(Field20::get_first(&tags).unwrap().reference(), Some("REF1"));
        let parties = Field95P::get_all(&tags);
        assert_eq!(parties.len(), 2);
        assert_eq!(parties[1].bic(), Some("IJKLMNOP"));
        assert!(Field79::get_all(&tags).is_empty());
        assert!(Field79::get_first(&tags).is_none());
    }

    #[test]
    fn test_try_from_field() {
        let field: Field = Field20::parse("REF1").unwrap().into();
        assert!(Field20::try_from(field.clone()).is_ok());
        assert!(matches!(
            Field79::try_from(field),
            Err(FieldError::NameMismatch { .. })
        ));
    }

    #[test]
    fn test_mismatched_tag() {
        let tag = Tag::new("59", "JOHN").unwrap();
        assert!(matches!(
            Field50K::from_tag(&tag),
            Err(FieldError::NameMismatch { .. })
        ));
    }

    #[test]
    fn test_optional_scheme() {
        let field = Field22F::parse(":PROC//COLL").unwrap();
        assert_eq!(field.data_source_scheme(), None);
        assert_eq!(field.indicator(), Some("COLL"));
        assert_eq!(field.value(), ":PROC//COLL");
    }
}
