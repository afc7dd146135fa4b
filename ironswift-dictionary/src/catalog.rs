/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Embedded descriptor catalog.
//!
//! Declarative records for the common field families. Every family shares the
//! same engine; only the grammar and labels differ.

use crate::format::ValueFormat;
use crate::format::ValueFormat::{Amount, Bic, Currency, Date6, Date8, DebitCredit, Time4, Time6};
use crate::schema::{ComponentSpec, DescriptorSpec};

/// A static catalog record.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Field name.
    pub name: &'static str,
    /// Structural pattern.
    pub parser_pattern: &'static str,
    /// Class and length pattern.
    pub validator_pattern: &'static str,
    /// Component labels and formats.
    pub components: &'static [(&'static str, Option<ValueFormat>)],
}

impl CatalogEntry {
    /// Converts the record into an owned catalog spec.
    #[must_use]
    pub fn to_spec(&self) -> DescriptorSpec {
        DescriptorSpec {
            name: self.name.to_string(),
            parser_pattern: self.parser_pattern.to_string(),
            validator_pattern: self.validator_pattern.to_string(),
            components: self
                .components
                .iter()
                .map(|(label, format)| ComponentSpec {
                    label: (*label).to_string(),
                    format: *format,
                })
                .collect(),
        }
    }
}


const ACCOUNT_AND_ADDRESS: &[(&str, Option<ValueFormat>)] = &[
    ("Account", None),
    ("Name And Address", None),
    ("Name And Address 2", None),
    ("Name And Address 3", None),
    ("Name And Address 4", None),
];

const ACCOUNT_AND_BIC: &[(&str, Option<ValueFormat>)] = &[("Account", None), ("BIC", Some(Bic))];

const NARRATIVE: &[(&str, Option<ValueFormat>)] = &[("Narrative", None)];

const REFERENCE: &[(&str, Option<ValueFormat>)] = &[("Reference", None)];

/// Descriptors for the built-in field types.
pub const STANDARD: &[CatalogEntry] = &[
    CatalogEntry {
        name: "11S",
        parser_pattern: "3!S$6!S[$4!S6!S]",
        validator_pattern: "3!n$6!n[$4!n6!n]",
        components: &[
            ("MT Number", None),
            ("Date", Some(Date6)),
            ("Session Number", None),
            ("ISN", None),
        ],
    },
    CatalogEntry {
        name: "12",
        parser_pattern: "S",
        validator_pattern: "3!n",
        components: &[("Type Of Message", None)],
    },
    CatalogEntry {
        name: "13C",
        parser_pattern: "/S/4!S1!S4!S",
        validator_pattern: "/8c/4!n1!x4!n",
        components: &[
            ("Code", None),
            ("Time Indication", Some(Time4)),
            ("Sign", None),
            ("Time Offset", Some(Time4)),
        ],
    },
    CatalogEntry {
        name: "20",
        parser_pattern: "S",
        validator_pattern: "16x",
        components: REFERENCE,
    },
    CatalogEntry {
        name: "21",
        parser_pattern: "S",
        validator_pattern: "16x",
        components: REFERENCE,
    },
    CatalogEntry {
        name: "22F",
        parser_pattern: ":S/[S]/S",
        validator_pattern: ":4!c/[8c]/4!c",
        components: &[
            ("Qualifier", None),
            ("Data Source Scheme", None),
            ("Indicator", None),
        ],
    },
    CatalogEntry {
        name: "23B",
        parser_pattern: "S",
        validator_pattern: "4!c",
        components: &[("Type", None)],
    },
    CatalogEntry {
        name: "25",
        parser_pattern: "S",
        validator_pattern: "35x",
        components: &[("Account", None)],
    },
    CatalogEntry {
        name: "30",
        parser_pattern: "S",
        validator_pattern: "6!n",
        components: &[("Date", Some(Date6))],
    },
    CatalogEntry {
        name: "32A",
        parser_pattern: "6!S3!SS",
        validator_pattern: "6!n3!a15d",
        components: &[
            ("Date", Some(Date6)),
            ("Currency", Some(Currency)),
            ("Amount", Some(Amount)),
        ],
    },
    CatalogEntry {
        name: "33B",
        parser_pattern: "3!SS",
        validator_pattern: "3!a15d",
        components: &[("Currency", Some(Currency)), ("Amount", Some(Amount))],
    },
    CatalogEntry {
        name: "34F",
        parser_pattern: "3!S[1!a]S",
        validator_pattern: "3!a[1!a]15d",
        components: &[
            ("Currency", Some(Currency)),
            ("D/C Mark", Some(DebitCredit)),
            ("Amount", Some(Amount)),
        ],
    },
    CatalogEntry {
        name: "36",
        parser_pattern: "S",
        validator_pattern: "12d",
        components: &[("Rate", Some(Amount))],
    },
    CatalogEntry {
        name: "50F",
        parser_pattern: "S$S[$S]*3",
        validator_pattern: "35x$35x[$35x]*3",
        components: &[
            ("Party Identifier", None),
            ("Name And Address", None),
            ("Name And Address 2", None),
            ("Name And Address 3", None),
            ("Name And Address 4", None),
        ],
    },
    CatalogEntry {
        name: "50H",
        parser_pattern: "/S$4*S",
        validator_pattern: "/34x$4*35x",
        components: &[("Account", None), ("Name And Address", None)],
    },
    CatalogEntry {
        name: "50K",
        parser_pattern: "[/S$]S[$S]*3",
        validator_pattern: "[/34x$]35x[$35x]*3",
        components: ACCOUNT_AND_ADDRESS,
    },
    CatalogEntry {
        name: "52A",
        parser_pattern: "[/S$]S",
        validator_pattern: "[/34x$]11c",
        components: ACCOUNT_AND_BIC,
    },
    CatalogEntry {
        name: "59",
        parser_pattern: "[/S$]S[$S]*3",
        validator_pattern: "[/34x$]35x[$35x]*3",
        components: ACCOUNT_AND_ADDRESS,
    },
    CatalogEntry {
        name: "59A",
        parser_pattern: "[/S$]S",
        validator_pattern: "[/34x$]11c",
        components: ACCOUNT_AND_BIC,
    },
    CatalogEntry {
        name: "70",
        parser_pattern: "4*S",
        validator_pattern: "4*35x",
        components: NARRATIVE,
    },
    CatalogEntry {
        name: "71A",
        parser_pattern: "S",
        validator_pattern: "3!a",
        components: &[("Code", None)],
    },
    CatalogEntry {
        name: "72",
        parser_pattern: "6*S",
        validator_pattern: "6*35x",
        components: NARRATIVE,
    },
    CatalogEntry {
        name: "79",
        parser_pattern: "35*S",
        validator_pattern: "35*50x",
        components: NARRATIVE,
    },
    CatalogEntry {
        name: "90A",
        parser_pattern: ":S//S/S",
        validator_pattern: ":4!c//4!c/15d",
        components: &[
            ("Qualifier", None),
            ("Percentage Type Code", None),
            ("Price", Some(Amount)),
        ],
    },
    CatalogEntry {
        name: "95P",
        parser_pattern: ":S//S",
        validator_pattern: ":4!c//11c",
        components: &[("Qualifier", None), ("BIC", Some(Bic))],
    },
    CatalogEntry {
        name: "95Q",
        parser_pattern: ":S//4*S",
        validator_pattern: ":4!c//4*35x",
        components: &[("Qualifier", None), ("Name And Address", None)],
    },
    CatalogEntry {
        name: "98A",
        parser_pattern: ":S//S",
        validator_pattern: ":4!c//8!n",
        components: &[("Qualifier", None), ("Date", Some(Date8))],
    },
    CatalogEntry {
        name: "98C",
        parser_pattern: ":S//8!SS",
        validator_pattern: ":4!c//8!n6!n",
        components: &[
            ("Qualifier", None),
            ("Date", Some(Date8)),
            ("Time", Some(Time6)),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_standard_catalog_compiles() {
        for entry in STANDARD {
            let descriptor = entry
                .to_spec()
                .compile()
                .unwrap_or_else(|err| panic!("{}: {err}", entry.name));
            assert_eq!(descriptor.component_count(), entry.components.len());
        }
    }

    #[test]
    fn test_standard_names_unique() {
        let names: HashSet<_> = STANDARD.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), STANDARD.len());
    }
}
